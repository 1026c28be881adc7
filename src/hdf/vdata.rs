//! HDF4 Vdata and Vgroup decoding
//!
//! The SD interface stores each attribute as a one-record Vdata of class
//! `Attr0.0` with a single field named `VALUES`. Global attributes hang
//! off the `CDF0.0` Vgroup that roots the file.

use std::io::{self, Cursor};
use byteorder::ReadBytesExt;
use log::{trace, warn};

use crate::errors::{RasterError, RasterResult};
use crate::hdf::constants::{classes, number_types};
use crate::io::byte_order::{BigEndianHandler, ByteOrder, ByteOrderHandler};
use crate::io::seekable::SeekableReader;

/// One field of a Vdata record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VdataField {
    /// Field name
    pub name: String,
    /// HDF number type (DFNT_*)
    pub number_type: u16,
    /// Size of the field in a record, in bytes
    pub size: u16,
    /// Offset of the field inside a record
    pub offset: u16,
    /// Number of elements per record
    pub order: u16,
}

/// Decoded Vdata header (DFTAG_VH)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VdataHeader {
    /// Interlace mode
    pub interlace: u16,
    /// Number of records
    pub record_count: u32,
    /// Size of one record in bytes
    pub record_size: u16,
    /// Record layout
    pub fields: Vec<VdataField>,
    /// Vdata name (the attribute name for attribute vdatas)
    pub name: String,
    /// Vdata class
    pub class: String,
}

impl VdataHeader {
    /// Parses a Vdata header element
    pub fn parse(bytes: &[u8]) -> RasterResult<Self> {
        Self::parse_fields(&mut Cursor::new(bytes)).map_err(|e| {
            RasterError::MalformedMetadata(format!("truncated Vdata header: {}", e))
        })
    }

    fn parse_fields(reader: &mut dyn SeekableReader) -> io::Result<Self> {
        let h = BigEndianHandler;

        let interlace = h.read_u16(reader)?;
        let record_count = h.read_u32(reader)?;
        let record_size = h.read_u16(reader)?;
        let field_count = h.read_u16(reader)? as usize;

        let mut types = Vec::with_capacity(field_count);
        for _ in 0..field_count {
            types.push(h.read_u16(reader)?);
        }
        let mut sizes = Vec::with_capacity(field_count);
        for _ in 0..field_count {
            sizes.push(h.read_u16(reader)?);
        }
        let mut offsets = Vec::with_capacity(field_count);
        for _ in 0..field_count {
            offsets.push(h.read_u16(reader)?);
        }
        let mut orders = Vec::with_capacity(field_count);
        for _ in 0..field_count {
            orders.push(h.read_u16(reader)?);
        }

        let mut fields = Vec::with_capacity(field_count);
        for i in 0..field_count {
            fields.push(VdataField {
                name: read_name(reader)?,
                number_type: types[i],
                size: sizes[i],
                offset: offsets[i],
                order: orders[i],
            });
        }

        let name = read_name(reader)?;
        let class = read_name(reader)?;

        Ok(VdataHeader {
            interlace,
            record_count,
            record_size,
            fields,
            name,
            class,
        })
    }

    /// Whether this vdata holds an SD attribute
    pub fn is_attribute(&self) -> bool {
        self.class == classes::ATTRIBUTE
    }

    /// Number of bytes of record data the storage element must hold
    pub fn data_len(&self) -> u64 {
        self.record_count as u64 * self.record_size as u64
    }

    /// Renders the attribute value stored in `data` as a string
    ///
    /// Character data becomes text with trailing NULs trimmed; numbers
    /// become decimal renderings joined with ", ".
    ///
    /// # Returns
    /// None for multi-field vdatas and number types that are not understood
    pub fn decode_value(&self, data: &[u8]) -> Option<String> {
        let field = match self.fields.as_slice() {
            [field] => field,
            _ => {
                trace!("Vdata {} has {} fields, not an attribute layout", self.name, self.fields.len());
                return None;
            }
        };

        let base_type = field.number_type & !(number_types::LITTLE_ENDIAN_FLAG | number_types::NATIVE_FLAG);
        let element_size = element_size(base_type)?;
        let order = if field.number_type & number_types::LITTLE_ENDIAN_FLAG != 0 {
            ByteOrder::LittleEndian
        } else {
            ByteOrder::BigEndian
        };

        let field_end = field.offset as u64 + (element_size * field.order as usize) as u64;
        if self.record_count > 0 && (self.record_size == 0 || field_end > self.record_size as u64) {
            warn!("Vdata {} field ends at byte {} of a {}-byte record",
                  self.name, field_end, self.record_size);
            return None;
        }

        let mut raw = Vec::new();
        for record in 0..self.record_count as usize {
            let start = record * self.record_size as usize + field.offset as usize;
            let end = start + element_size * field.order as usize;
            raw.extend_from_slice(data.get(start..end)?);
        }

        if matches!(base_type, number_types::CHAR8 | number_types::UCHAR8) {
            let end = raw.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
            return Some(String::from_utf8_lossy(&raw[..end]).into_owned());
        }

        let handler = order.create_handler();
        let mut cursor = Cursor::new(raw.as_slice());
        let mut values = Vec::with_capacity(raw.len() / element_size);
        for _ in 0..raw.len() / element_size {
            values.push(decode_number(&mut cursor, handler.as_ref(), base_type).ok()?);
        }

        Some(values.join(", "))
    }
}

/// Decoded Vgroup (DFTAG_VG)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vgroup {
    /// Member objects as (tag, ref) pairs
    pub children: Vec<(u16, u16)>,
    /// Vgroup name
    pub name: String,
    /// Vgroup class
    pub class: String,
}

impl Vgroup {
    /// Parses a Vgroup element
    pub fn parse(bytes: &[u8]) -> RasterResult<Self> {
        Self::parse_fields(&mut Cursor::new(bytes)).map_err(|e| {
            RasterError::MalformedMetadata(format!("truncated Vgroup: {}", e))
        })
    }

    fn parse_fields(reader: &mut dyn SeekableReader) -> io::Result<Self> {
        let h = BigEndianHandler;

        let count = h.read_u16(reader)? as usize;
        let mut child_tags = Vec::with_capacity(count);
        for _ in 0..count {
            child_tags.push(h.read_u16(reader)?);
        }
        let mut children = Vec::with_capacity(count);
        for tag in child_tags {
            children.push((tag, h.read_u16(reader)?));
        }

        let name = read_name(reader)?;
        let class = read_name(reader)?;

        Ok(Vgroup { children, name, class })
    }

    /// Whether this vgroup roots an SD file
    pub fn is_sd_root(&self) -> bool {
        self.class == classes::SD_ROOT
    }
}

/// Reads a u16 length-prefixed, non-terminated name
fn read_name(reader: &mut dyn SeekableReader) -> io::Result<String> {
    let len = BigEndianHandler.read_u16(reader)? as usize;
    let mut buffer = vec![0u8; len];
    reader.read_exact(&mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

fn element_size(base_type: u16) -> Option<usize> {
    match base_type {
        number_types::CHAR8 | number_types::UCHAR8 | number_types::INT8 | number_types::UINT8 => Some(1),
        number_types::INT16 | number_types::UINT16 => Some(2),
        number_types::INT32 | number_types::UINT32 | number_types::FLOAT32 => Some(4),
        number_types::INT64 | number_types::UINT64 | number_types::FLOAT64 => Some(8),
        other => {
            trace!("Unsupported HDF number type {}", other);
            None
        }
    }
}

fn decode_number(reader: &mut dyn SeekableReader, h: &dyn ByteOrderHandler, base_type: u16) -> io::Result<String> {
    Ok(match base_type {
        number_types::INT8 => reader.read_i8()?.to_string(),
        number_types::UINT8 => reader.read_u8()?.to_string(),
        number_types::INT16 => h.read_i16(reader)?.to_string(),
        number_types::UINT16 => h.read_u16(reader)?.to_string(),
        number_types::INT32 => h.read_i32(reader)?.to_string(),
        number_types::UINT32 => h.read_u32(reader)?.to_string(),
        number_types::INT64 => h.read_i64(reader)?.to_string(),
        number_types::UINT64 => h.read_u64(reader)?.to_string(),
        number_types::FLOAT32 => h.read_f32(reader)?.to_string(),
        number_types::FLOAT64 => h.read_f64(reader)?.to_string(),
        other => {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("unsupported number type {}", other),
            ))
        }
    })
}
