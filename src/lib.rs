//! Sensing time extraction for Landsat scenes
//!
//! Reads the `SENSING_TIME` global attribute of an HDF4 or GeoTIFF scene
//! and renders its clock portion as `HHMMSS`.

pub mod io;
pub mod errors;
pub mod tiff;
pub mod hdf;
pub mod dataset;
pub mod sensing_time;
pub mod utils;
pub mod commands;
pub mod cli;
pub mod api;

pub use crate::api::{extract_hms, SensingTimeExtractor};

pub use dataset::{AttributeMap, RasterDataset, RasterFormat};
pub use errors::{RasterError, RasterResult};
pub use sensing_time::{SensingTime, SENSING_TIME_KEY};
