//! Raster dataset access
//!
//! This module opens a raster file read-only, works out which container it
//! is, and hands the stream to the matching attribute source. The result is
//! a flat, string-keyed attribute map; the file is closed before `open`
//! returns.

use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::str::FromStr;
use log::{debug, info};

use crate::errors::{RasterError, RasterResult};
use crate::hdf::HdfReader;
use crate::io::seekable::SeekableReader;
use crate::tiff::TiffReader;
use crate::utils::{file_utils, format_utils};

/// Raster container formats understood by the crate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RasterFormat {
    /// HDF4 scientific data file
    Hdf4,
    /// TIFF or BigTIFF, with GDAL metadata
    Tiff,
}

impl RasterFormat {
    /// Returns a short name for this format
    pub fn name(&self) -> &'static str {
        match self {
            RasterFormat::Hdf4 => "HDF4",
            RasterFormat::Tiff => "TIFF",
        }
    }

    /// Creates the attribute source that reads this format
    pub fn create_source(&self) -> Box<dyn AttributeSource> {
        match self {
            RasterFormat::Hdf4 => Box::new(HdfReader::new()),
            RasterFormat::Tiff => Box::new(TiffReader::new()),
        }
    }
}

impl fmt::Display for RasterFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RasterFormat {
    type Err = RasterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hdf" | "hdf4" => Ok(RasterFormat::Hdf4),
            "tif" | "tiff" | "geotiff" => Ok(RasterFormat::Tiff),
            other => Err(RasterError::UnsupportedFormat(format!("unknown format name '{}'", other))),
        }
    }
}

/// Ordered map of global attribute names to their string values
///
/// The first value stored under a key wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeMap {
    entries: Vec<(String, String)>,
}

impl AttributeMap {
    /// Creates an empty attribute map
    pub fn new() -> Self {
        AttributeMap { entries: Vec::new() }
    }

    /// Stores a value unless the key is already present
    ///
    /// # Returns
    /// true if the value was stored
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> bool {
        let key = key.into();
        if self.contains(&key) {
            debug!("Ignoring duplicate attribute {}", key);
            return false;
        }
        self.entries.push((key, value.into()));
        true
    }

    /// Looks up an attribute by exact name
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Checks whether an attribute is present
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Iterates over (name, value) pairs in file order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of attributes
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map holds no attributes
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A reader that exposes a container's global attributes
pub trait AttributeSource {
    /// Reads every global attribute from the stream
    ///
    /// # Arguments
    /// * `reader` - Stream positioned anywhere; sources seek as needed
    fn read_attributes(&mut self, reader: &mut dyn SeekableReader) -> RasterResult<AttributeMap>;
}

/// A raster file whose metadata has been read
#[derive(Debug, Clone)]
pub struct RasterDataset {
    path: String,
    format: RasterFormat,
    attributes: AttributeMap,
}

impl RasterDataset {
    /// Opens a raster file and reads its global attributes
    ///
    /// # Arguments
    /// * `path` - Path to an existing regular file
    /// * `format` - Forced format, or None to detect from the magic bytes
    pub fn open(path: &str, format: Option<RasterFormat>) -> RasterResult<Self> {
        file_utils::validate_input_path(path)?;

        info!("Opening raster file: {}", path);
        let file = File::open(path)
            .map_err(|e| RasterError::FileAccess(format!("{}: {}", path, e)))?;
        let mut reader = BufReader::with_capacity(64 * 1024, file);

        let dataset = Self::read(&mut reader, format).map(|(format, attributes)| RasterDataset {
            path: path.to_string(),
            format,
            attributes,
        });

        drop(reader);
        debug!("Closed raster file: {}", path);
        dataset
    }

    /// Reads format and attributes from an already opened stream
    pub fn read(
        reader: &mut dyn SeekableReader,
        format: Option<RasterFormat>,
    ) -> RasterResult<(RasterFormat, AttributeMap)> {
        let format = match format {
            Some(forced) => {
                debug!("Using forced format {}", forced);
                forced
            }
            None => format_utils::detect_raster_format(reader)?,
        };
        info!("Reading {} attributes", format);

        let mut source = format.create_source();
        let attributes = source.read_attributes(reader)?;
        info!("Found {} global attributes", attributes.len());

        Ok((format, attributes))
    }

    /// Looks up a global attribute, failing if it is absent
    pub fn attribute(&self, key: &str) -> RasterResult<&str> {
        self.attributes
            .get(key)
            .ok_or_else(|| RasterError::MissingAttribute(key.to_string()))
    }

    /// All global attributes of the file
    pub fn attributes(&self) -> &AttributeMap {
        &self.attributes
    }

    /// Container format of the file
    pub fn format(&self) -> RasterFormat {
        self.format
    }

    /// Path the dataset was opened from
    pub fn path(&self) -> &str {
        &self.path
    }
}
