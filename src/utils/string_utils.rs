//! String utility functions
//!
//! Utilities for turning raw metadata bytes into Rust strings.

use crate::errors::{RasterError, RasterResult};

/// Trims trailing null characters from a byte buffer
pub fn trim_trailing_nulls(buffer: &mut Vec<u8>) {
    while buffer.last() == Some(&0) {
        buffer.pop();
    }
}

/// Converts a NUL-padded byte buffer into a String
///
/// # Arguments
/// * `buffer` - Raw bytes as stored in the file
/// * `what` - Description of the value, used in the error message
pub fn bytes_to_string(mut buffer: Vec<u8>, what: &str) -> RasterResult<String> {
    trim_trailing_nulls(&mut buffer);

    String::from_utf8(buffer)
        .map_err(|e| RasterError::MalformedMetadata(format!("{} is not valid UTF-8: {}", what, e)))
}
