//! TIFF file reader implementation
//!
//! This module implements the TIFF/BigTIFF metadata reader. It uses the
//! byte order Strategy from `io::byte_order` to decode the header and the
//! IFD chain, then exposes the GDAL metadata tag as an attribute source.

use log::{debug, info, warn};
use std::io::{Cursor, SeekFrom};

use crate::dataset::{AttributeMap, AttributeSource};
use crate::errors::{RasterError, RasterResult};
use crate::io::byte_order::ByteOrderHandler;
use crate::io::seekable::SeekableReader;
use crate::tiff::constants::{field_types, header, tags};
use crate::tiff::gdal_metadata;
use crate::tiff::ifd::{IFD, IFDEntry};
use crate::tiff::types::TIFF;
use crate::tiff::validation;
use crate::utils::{file_utils, format_utils, string_utils, tag_utils};

/// Reader for TIFF and BigTIFF files
pub struct TiffReader {
    /// Current byte order handler
    byte_order_handler: Option<Box<dyn ByteOrderHandler>>,
    /// Whether currently reading BigTIFF format
    is_big_tiff: bool,
}

impl Default for TiffReader {
    fn default() -> Self {
        Self::new()
    }
}

impl TiffReader {
    /// Creates a new TIFF reader
    pub fn new() -> Self {
        TiffReader {
            byte_order_handler: None,
            is_big_tiff: false,
        }
    }

    /// Returns the byte order handler, with proper error handling for None case
    fn handler(&self) -> RasterResult<&dyn ByteOrderHandler> {
        self.byte_order_handler
            .as_deref()
            .ok_or_else(|| RasterError::GenericError("Byte order not yet determined".to_string()))
    }

    /// Reads the TIFF structure from the given reader
    ///
    /// This method handles the core process of reading a TIFF file:
    /// 1. Detect byte order (little/big endian)
    /// 2. Check for TIFF or BigTIFF format
    /// 3. Read all IFDs (Image File Directories)
    ///
    /// # Arguments
    /// * `reader` - Any struct implementing the SeekableReader trait
    pub fn read(&mut self, reader: &mut dyn SeekableReader) -> RasterResult<TIFF> {
        debug!("TiffReader::read starting");
        reader.seek(SeekFrom::Start(0))?;

        self.byte_order_handler = Some(format_utils::detect_byte_order(reader)?);

        let (is_big_tiff, _) = format_utils::detect_tiff_format(reader, self.handler()?)?;
        self.is_big_tiff = is_big_tiff;

        let first_ifd_offset = self.read_offset(reader)?;
        debug!("First IFD offset: {}", first_ifd_offset);

        let file_size = file_utils::get_file_size(reader)?;
        validation::validate_ifd_offset(first_ifd_offset, file_size)?;

        let mut tiff = TIFF::new(self.is_big_tiff);
        tiff.ifds = self.read_ifd_chain(reader, first_ifd_offset, file_size)?;

        info!("Read {} IFDs from TIFF file", tiff.ifd_count());
        Ok(tiff)
    }

    /// Reads a chain of IFDs starting from the given offset
    ///
    /// A broken link ends the chain with a warning; the IFDs read so far
    /// are kept.
    fn read_ifd_chain(
        &self,
        reader: &mut dyn SeekableReader,
        first_ifd_offset: u64,
        file_size: u64,
    ) -> RasterResult<Vec<IFD>> {
        let mut ifds = Vec::new();
        let mut ifd_offset = first_ifd_offset;

        while ifd_offset != 0 && ifds.len() < header::MAX_IFDS {
            debug!("Reading IFD at offset: {}", ifd_offset);

            let ifd = match self.read_ifd(reader, ifd_offset, ifds.len()) {
                Ok(ifd) => ifd,
                Err(e) => {
                    warn!("Error reading IFD {}: {}", ifds.len(), e);
                    break;
                }
            };

            // The reader now sits on the next-IFD offset field
            let next_ifd_offset = match self.read_offset(reader) {
                Ok(offset) => offset,
                Err(e) => {
                    warn!("Error reading next IFD offset: {}", e);
                    ifds.push(ifd);
                    break;
                }
            };
            debug!("Next IFD offset: {}", next_ifd_offset);

            ifds.push(ifd);

            if next_ifd_offset != 0 && validation::validate_ifd_offset(next_ifd_offset, file_size).is_err() {
                warn!("Invalid next IFD offset: {}, stopping IFD chain", next_ifd_offset);
                break;
            }
            ifd_offset = next_ifd_offset;
        }

        Ok(ifds)
    }

    /// Reads an IFD from the reader
    ///
    /// # Arguments
    /// * `reader` - The seekable reader to use
    /// * `offset` - Offset in the file where the IFD starts
    /// * `number` - The index of this IFD in the file
    pub fn read_ifd(&self, reader: &mut dyn SeekableReader, offset: u64, number: usize) -> RasterResult<IFD> {
        reader.seek(SeekFrom::Start(offset))?;

        let handler = self.handler()?;
        let entry_count = if self.is_big_tiff {
            handler.read_u64(reader)?
        } else {
            handler.read_u16(reader)? as u64
        };
        debug!("IFD entry count: {}", entry_count);

        let mut ifd = IFD::new(number, offset);
        for _ in 0..entry_count {
            let entry = self.read_ifd_entry(reader)?;
            ifd.add_entry(entry);
        }

        debug!("Read IFD #{} with {} entries", number, ifd.entry_count());
        Ok(ifd)
    }

    /// Reads a single IFD entry
    fn read_ifd_entry(&self, reader: &mut dyn SeekableReader) -> RasterResult<IFDEntry> {
        let handler = self.handler()?;

        let tag = handler.read_u16(reader)?;
        let field_type = handler.read_u16(reader)?;
        let count = if self.is_big_tiff {
            handler.read_u64(reader)?
        } else {
            handler.read_u32(reader)? as u64
        };

        let field_len = if self.is_big_tiff { 8 } else { 4 };
        let mut value_bytes = [0u8; 8];
        reader.read_exact(&mut value_bytes[..field_len])?;

        let mut field = Cursor::new(&value_bytes[..field_len]);
        let value_offset = if self.is_big_tiff {
            handler.read_u64(&mut field)?
        } else {
            handler.read_u32(&mut field)? as u64
        };

        Ok(IFDEntry::new(tag, field_type, count, value_offset, value_bytes))
    }

    /// Reads an offset field (4 bytes for TIFF, 8 for BigTIFF)
    fn read_offset(&self, reader: &mut dyn SeekableReader) -> RasterResult<u64> {
        let handler = self.handler()?;
        if self.is_big_tiff {
            Ok(handler.read_u64(reader)?)
        } else {
            Ok(handler.read_u32(reader)? as u64)
        }
    }

    /// Reads an ASCII tag's value from an IFD
    ///
    /// # Returns
    /// None if the tag is absent or is not of ASCII type
    pub fn read_ascii_tag(&self, reader: &mut dyn SeekableReader, ifd: &IFD, tag: u16) -> RasterResult<Option<String>> {
        let entry = match ifd.get_entry(tag) {
            Some(entry) => entry,
            None => return Ok(None),
        };

        if entry.field_type != field_types::ASCII {
            warn!("Tag {} ({}) has field type {} ({}), expected ASCII",
                  tag, tag_utils::get_tag_name(tag),
                  entry.field_type, tag_utils::get_field_type_name(entry.field_type));
            return Ok(None);
        }

        let buffer = if entry.is_value_inline(self.is_big_tiff) {
            entry.value_bytes[..entry.count as usize].to_vec()
        } else {
            file_utils::read_bytes_at(reader, entry.value_offset, entry.count)?
        };

        string_utils::bytes_to_string(buffer, tag_utils::get_tag_name(tag)).map(Some)
    }

    /// Returns whether the current file is a BigTIFF
    pub fn is_big_tiff(&self) -> bool {
        self.is_big_tiff
    }
}

impl AttributeSource for TiffReader {
    fn read_attributes(&mut self, reader: &mut dyn SeekableReader) -> RasterResult<AttributeMap> {
        let tiff = self.read(reader)?;
        let ifd = tiff.main_ifd().ok_or_else(|| {
            RasterError::UnsupportedFormat("TIFF file has no readable image file directory".to_string())
        })?;

        match self.read_ascii_tag(reader, ifd, tags::GDAL_METADATA)? {
            Some(xml) => gdal_metadata::parse_gdal_metadata(&xml),
            None => {
                debug!("No GDAL metadata in IFD #{}", ifd.number);
                Ok(AttributeMap::new())
            }
        }
    }
}
