//! TIFF validation utilities
//!
//! Header and offset checks that stop the reader from following
//! pointers outside the file.

use log::{debug, error};

use crate::errors::{RasterError, RasterResult};
use crate::io::byte_order::ByteOrderHandler;
use crate::io::seekable::SeekableReader;
use crate::tiff::constants::header;

/// Validates an IFD offset to ensure it's within reasonable bounds
///
/// # Arguments
/// * `offset` - The offset to validate
/// * `file_size` - The file size for validation
pub fn validate_ifd_offset(offset: u64, file_size: u64) -> RasterResult<()> {
    if offset >= file_size || offset < header::MIN_IFD_OFFSET {
        return Err(RasterError::UnsupportedFormat(format!(
            "Invalid IFD offset: {} (file size: {})",
            offset, file_size
        )));
    }

    Ok(())
}

/// Validates the BigTIFF header
///
/// In BigTIFF, the version number (43) is followed by the offset size,
/// which must be 8, and a reserved value, which must be 0.
///
/// # Arguments
/// * `reader` - The seekable reader to use
/// * `byte_order_handler` - Handler for the file's byte order
pub fn validate_bigtiff_header(
    reader: &mut dyn SeekableReader,
    byte_order_handler: &dyn ByteOrderHandler,
) -> RasterResult<()> {
    let offset_size = byte_order_handler.read_u16(reader)?;
    let zeros = byte_order_handler.read_u16(reader)?;

    debug!("BigTIFF offset size: {}, reserved: {}", offset_size, zeros);

    if offset_size != header::BIGTIFF_OFFSET_SIZE || zeros != 0 {
        error!("Invalid BigTIFF header: offset_size={}, zeros={}", offset_size, zeros);
        return Err(RasterError::InvalidBigTIFFHeader);
    }

    Ok(())
}
