//! HDF4 file format parsing module
//!
//! This module reads the HDF4 data descriptor index and the Vdata/Vgroup
//! objects the SD interface uses to store global attributes.

pub mod dd;
pub mod reader;
pub mod vdata;
pub(crate) mod constants;
#[cfg(test)]
pub(crate) mod tests;

pub use dd::DataDescriptor;
pub use reader::HdfReader;
pub use vdata::{VdataField, VdataHeader, Vgroup};
