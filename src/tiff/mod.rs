//! TIFF file format parsing module
//!
//! This module reads TIFF and BigTIFF headers and image file directories
//! far enough to reach the GDAL metadata tag, which carries the
//! dataset-level attributes of a GeoTIFF.

pub mod ifd;
pub mod reader;
pub mod gdal_metadata;
pub(crate) mod types;
pub(crate) mod constants;
pub(crate) mod validation;
#[cfg(test)]
mod tests;

pub use ifd::{IFD, IFDEntry};
pub use reader::TiffReader;
pub use types::TIFF;
pub use gdal_metadata::parse_gdal_metadata;
