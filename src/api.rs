use log::info;

use crate::dataset::{AttributeMap, RasterDataset, RasterFormat};
use crate::errors::RasterResult;
use crate::sensing_time::{SensingTime, SENSING_TIME_KEY};

/// Main interface to the library
///
/// Opens a scene, reads its `SENSING_TIME` attribute and turns it into a
/// clock value. Each call opens and closes the file; nothing is cached.
#[derive(Debug, Clone, Copy, Default)]
pub struct SensingTimeExtractor {
    format: Option<RasterFormat>,
}

impl SensingTimeExtractor {
    /// Create an extractor that detects the file format
    pub fn new() -> Self {
        SensingTimeExtractor { format: None }
    }

    /// Force a container format instead of detecting it
    pub fn with_format(mut self, format: Option<RasterFormat>) -> Self {
        self.format = format;
        self
    }

    /// Read and parse the sensing time of a scene
    ///
    /// # Arguments
    /// * `input_path` - Path to the HDF4 or GeoTIFF scene
    pub fn extract(&self, input_path: &str) -> RasterResult<SensingTime> {
        let dataset = RasterDataset::open(input_path, self.format)?;
        let value = dataset.attribute(SENSING_TIME_KEY)?;
        info!("{} of {}: {}", SENSING_TIME_KEY, input_path, value);

        SensingTime::parse(value)
    }

    /// Read the sensing time of a scene as a 6-digit `HHMMSS` string
    pub fn extract_hms(&self, input_path: &str) -> RasterResult<String> {
        self.extract(input_path).map(|time| time.hhmmss())
    }

    /// Read every global attribute of a scene
    pub fn attributes(&self, input_path: &str) -> RasterResult<AttributeMap> {
        RasterDataset::open(input_path, self.format).map(|dataset| dataset.attributes().clone())
    }
}

/// Returns the `HHMMSS` sensing time of a scene, detecting its format
pub fn extract_hms(input_path: &str) -> RasterResult<String> {
    SensingTimeExtractor::new().extract_hms(input_path)
}
