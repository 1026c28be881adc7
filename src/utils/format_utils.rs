//! Container format utilities
//!
//! Utilities for recognising raster containers from their magic bytes and
//! for TIFF specifics like byte order and classic/BigTIFF detection.

use std::io::{Read, SeekFrom};
use log::debug;

use crate::dataset::RasterFormat;
use crate::errors::{RasterError, RasterResult};
use crate::hdf::constants::{HDF4_MAGIC, HDF5_SIGNATURE};
use crate::io::byte_order::{ByteOrder, ByteOrderHandler};
use crate::io::seekable::SeekableReader;
use crate::tiff::constants::header;
use crate::tiff::validation;

/// Identifies the container format from the first bytes of the stream
///
/// The reader is rewound to the start afterwards.
pub fn detect_raster_format(reader: &mut dyn SeekableReader) -> RasterResult<RasterFormat> {
    reader.seek(SeekFrom::Start(0))?;
    let mut magic = Vec::with_capacity(HDF5_SIGNATURE.len());
    (&mut *reader).take(HDF5_SIGNATURE.len() as u64).read_to_end(&mut magic)?;
    reader.seek(SeekFrom::Start(0))?;

    debug!("Magic bytes: {:02x?}", magic);

    if magic.starts_with(&HDF4_MAGIC) {
        return Ok(RasterFormat::Hdf4);
    }
    if magic.starts_with(&HDF5_SIGNATURE) {
        return Err(RasterError::UnsupportedFormat(
            "HDF5 files are not supported, expected HDF4 or TIFF".to_string(),
        ));
    }
    if magic.len() >= 4 {
        let version = if magic.starts_with(&header::LITTLE_ENDIAN_MARKER) {
            Some(u16::from_le_bytes([magic[2], magic[3]]))
        } else if magic.starts_with(&header::BIG_ENDIAN_MARKER) {
            Some(u16::from_be_bytes([magic[2], magic[3]]))
        } else {
            None
        };
        if matches!(version, Some(header::TIFF_VERSION) | Some(header::BIG_TIFF_VERSION)) {
            return Ok(RasterFormat::Tiff);
        }
    }

    Err(RasterError::UnsupportedFormat(format!(
        "unrecognised file signature {:02x?}",
        magic
    )))
}

/// Detects and returns the byte order for a TIFF file
pub fn detect_byte_order(reader: &mut dyn SeekableReader) -> RasterResult<Box<dyn ByteOrderHandler>> {
    let byte_order = ByteOrder::detect(reader)?;
    debug!("Detected byte order: {}", byte_order.name());

    Ok(byte_order.create_handler())
}

/// Detects whether a file is TIFF or BigTIFF based on its version number
///
/// # Arguments
/// * `reader` - The seekable reader to use
/// * `byte_order_handler` - Handler for the file's byte order
///
/// # Returns
/// A tuple with (is_big_tiff, version_number)
pub fn detect_tiff_format(
    reader: &mut dyn SeekableReader,
    byte_order_handler: &dyn ByteOrderHandler,
) -> RasterResult<(bool, u16)> {
    let version = byte_order_handler.read_u16(reader)?;
    debug!("TIFF version: {}", version);

    let is_big_tiff = match version {
        header::BIG_TIFF_VERSION => {
            debug!("Detected BigTIFF format");
            validation::validate_bigtiff_header(reader, byte_order_handler)?;
            true
        },
        header::TIFF_VERSION => {
            debug!("Detected standard TIFF format");
            false
        },
        _ => return Err(RasterError::UnsupportedVersion(version)),
    };

    Ok((is_big_tiff, version))
}
