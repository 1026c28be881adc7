//! File utilities
//!
//! Checks on the input path and helpers for measuring the stream being read.

use std::fs;
use std::io::{self, SeekFrom};
use std::path::Path;
use log::{debug, warn};

use crate::errors::{RasterError, RasterResult};
use crate::io::seekable::SeekableReader;

/// Ensures the input path names an existing regular file
///
/// # Arguments
/// * `path` - Path given on the command line
pub fn validate_input_path(path: &str) -> RasterResult<()> {
    let metadata = fs::metadata(Path::new(path)).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => RasterError::FileAccess(format!("{}: no such file", path)),
        io::ErrorKind::PermissionDenied => RasterError::FileAccess(format!("{}: permission denied", path)),
        _ => RasterError::FileAccess(format!("{}: {}", path, e)),
    })?;

    if metadata.is_dir() {
        return Err(RasterError::FileAccess(format!("{}: is a directory", path)));
    }

    debug!("Input file {} ({} bytes)", path, metadata.len());
    Ok(())
}

/// Gets the stream size for validation purposes
///
/// The current position is restored afterwards. Returns u64::MAX if the
/// size could not be determined.
pub fn get_file_size(reader: &mut dyn SeekableReader) -> RasterResult<u64> {
    let current_position = reader.stream_position()?;
    let file_size = match reader.seek(SeekFrom::End(0)) {
        Ok(size) => size,
        Err(e) => {
            warn!("Could not determine file size: {}", e);
            u64::MAX
        }
    };
    reader.seek(SeekFrom::Start(current_position))?;

    Ok(file_size)
}

/// Reads `len` bytes starting at `offset`, checking the range against the stream size
pub fn read_bytes_at(reader: &mut dyn SeekableReader, offset: u64, len: u64) -> RasterResult<Vec<u8>> {
    let file_size = get_file_size(reader)?;
    let end = offset.checked_add(len).ok_or_else(|| {
        RasterError::MalformedMetadata(format!("Byte range overflows at offset {}", offset))
    })?;
    if end > file_size {
        return Err(RasterError::MalformedMetadata(format!(
            "Byte range {}..{} exceeds file size {}",
            offset, end, file_size
        )));
    }

    reader.seek(SeekFrom::Start(offset))?;
    let mut buffer = vec![0u8; len as usize];
    reader.read_exact(&mut buffer)?;
    Ok(buffer)
}
