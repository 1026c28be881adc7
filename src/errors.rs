//! Custom error types for raster metadata processing

use std::fmt;
use std::io;

/// Errors raised while opening a raster file or interpreting its metadata
#[derive(Debug)]
pub enum RasterError {
    /// I/O error
    IoError(io::Error),
    /// Input path does not exist, is a directory, or cannot be read
    FileAccess(String),
    /// File is not in a supported raster container format
    UnsupportedFormat(String),
    /// Invalid byte order marker
    InvalidByteOrder(u16),
    /// Invalid BigTIFF header
    InvalidBigTIFFHeader,
    /// Unsupported TIFF version
    UnsupportedVersion(u16),
    /// Corrupt HDF4 header or data descriptor block
    InvalidHdfHeader(String),
    /// Metadata block could not be decoded
    MalformedMetadata(String),
    /// Requested attribute not present in the file
    MissingAttribute(String),
    /// Timestamp value does not match the expected pattern
    MalformedTimestamp(String, chrono::ParseError),
    /// Generic error with message
    GenericError(String),
}

impl fmt::Display for RasterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RasterError::IoError(e) => write!(f, "I/O error: {}", e),
            RasterError::FileAccess(msg) => write!(f, "Cannot access input file: {}", msg),
            RasterError::UnsupportedFormat(msg) => write!(f, "Unsupported file format: {}", msg),
            RasterError::InvalidByteOrder(v) => write!(f, "Invalid byte order marker: {:#06x}", v),
            RasterError::InvalidBigTIFFHeader => write!(f, "Invalid BigTIFF header"),
            RasterError::UnsupportedVersion(v) => write!(f, "Unsupported TIFF version: {}", v),
            RasterError::InvalidHdfHeader(msg) => write!(f, "Invalid HDF4 structure: {}", msg),
            RasterError::MalformedMetadata(msg) => write!(f, "Malformed metadata: {}", msg),
            RasterError::MissingAttribute(key) => write!(f, "Attribute not found: {}", key),
            RasterError::MalformedTimestamp(value, e) => {
                write!(f, "Malformed timestamp '{}': {}", value, e)
            }
            RasterError::GenericError(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for RasterError {}

impl From<io::Error> for RasterError {
    fn from(error: io::Error) -> Self {
        RasterError::IoError(error)
    }
}

impl From<String> for RasterError {
    fn from(msg: String) -> Self {
        RasterError::GenericError(msg)
    }
}

impl From<quick_xml::Error> for RasterError {
    fn from(error: quick_xml::Error) -> Self {
        RasterError::MalformedMetadata(format!("GDAL metadata XML: {}", error))
    }
}

/// Result type for raster operations
pub type RasterResult<T> = Result<T, RasterError>;
