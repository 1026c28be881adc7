//! HDF4 data descriptors
//!
//! An HDF4 file is indexed by a linked list of DD blocks. Each block holds
//! a count, the offset of the next block, and that many descriptors of
//! the form (tag, ref, offset, length).

use std::collections::HashSet;
use std::io::SeekFrom;
use log::{debug, trace, warn};

use crate::errors::{RasterError, RasterResult};
use crate::hdf::constants::{self, tags, DD_BLOCK_HEADER_LEN, DD_LEN, HDF4_MAGIC, MAX_DD_BLOCKS};
use crate::io::byte_order::ByteOrderHandler;
use crate::io::seekable::SeekableReader;
use crate::utils::file_utils;

/// A single (tag, ref, offset, length) descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataDescriptor {
    /// Object tag, possibly with the special-storage flag set
    pub tag: u16,
    /// Reference number, unique per tag
    pub reference: u16,
    /// Offset of the element in the file
    pub offset: u32,
    /// Length of the element in bytes
    pub length: u32,
}

impl DataDescriptor {
    /// Whether this slot is unused
    pub fn is_null(&self) -> bool {
        self.tag == tags::NULL
    }

    /// Whether the element uses special storage
    pub fn is_special(&self) -> bool {
        self.tag & tags::SPECIAL_FLAG != 0
    }

    /// Tag with the special-storage flag cleared
    pub fn base_tag(&self) -> u16 {
        self.tag & !tags::SPECIAL_FLAG
    }
}

/// Reads every non-null descriptor of the file
///
/// The DD block chain is followed until a zero link, an out-of-range
/// link, or a link back to a block already visited. Failing to read the
/// first block is an error; later failures end the chain with a warning.
pub fn read_dd_chain(
    reader: &mut dyn SeekableReader,
    handler: &dyn ByteOrderHandler,
) -> RasterResult<Vec<DataDescriptor>> {
    let file_size = file_utils::get_file_size(reader)?;
    let mut descriptors = Vec::new();
    let mut visited = HashSet::new();
    let mut block_offset = HDF4_MAGIC.len() as u64;

    while visited.len() < MAX_DD_BLOCKS {
        if block_offset + DD_BLOCK_HEADER_LEN > file_size || !visited.insert(block_offset) {
            let message = format!("DD block offset {} is invalid (file size {})", block_offset, file_size);
            if descriptors.is_empty() && visited.len() <= 1 {
                return Err(RasterError::InvalidHdfHeader(message));
            }
            warn!("{}, stopping DD chain", message);
            break;
        }

        match read_dd_block(reader, handler, block_offset, &mut descriptors) {
            Ok(0) => break,
            Ok(next) => block_offset = next as u64,
            Err(e) if visited.len() == 1 => return Err(e),
            Err(e) => {
                warn!("Error reading DD block at {}: {}", block_offset, e);
                break;
            }
        }
    }

    debug!("Read {} data descriptors from {} DD blocks", descriptors.len(), visited.len());
    Ok(descriptors)
}

/// Reads one DD block, appending its descriptors
///
/// # Returns
/// Offset of the next block, 0 at the end of the chain
fn read_dd_block(
    reader: &mut dyn SeekableReader,
    handler: &dyn ByteOrderHandler,
    block_offset: u64,
    descriptors: &mut Vec<DataDescriptor>,
) -> RasterResult<u32> {
    reader.seek(SeekFrom::Start(block_offset))?;

    let ndds = handler.read_u16(reader)?;
    let next = handler.read_u32(reader)?;
    debug!("DD block at {}: {} descriptors, next block at {}", block_offset, ndds, next);

    let block_end = block_offset + DD_BLOCK_HEADER_LEN + DD_LEN * ndds as u64;
    if block_end > file_utils::get_file_size(reader)? {
        return Err(RasterError::InvalidHdfHeader(format!(
            "DD block at {} with {} descriptors runs past the end of the file",
            block_offset, ndds
        )));
    }

    for _ in 0..ndds {
        let dd = DataDescriptor {
            tag: handler.read_u16(reader)?,
            reference: handler.read_u16(reader)?,
            offset: handler.read_u32(reader)?,
            length: handler.read_u32(reader)?,
        };

        if dd.is_null() {
            continue;
        }
        trace!("DD {} ({}) ref={} offset={} length={}",
               dd.tag, constants::get_tag_name(dd.tag), dd.reference, dd.offset, dd.length);
        descriptors.push(dd);
    }

    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::byte_order::BigEndianHandler;
    use std::io::Cursor;

    fn dd_block(ndds: u16, next: u32, dds: &[(u16, u16, u32, u32)]) -> Vec<u8> {
        let mut block = Vec::new();
        block.extend_from_slice(&ndds.to_be_bytes());
        block.extend_from_slice(&next.to_be_bytes());
        for (tag, reference, offset, length) in dds {
            block.extend_from_slice(&tag.to_be_bytes());
            block.extend_from_slice(&reference.to_be_bytes());
            block.extend_from_slice(&offset.to_be_bytes());
            block.extend_from_slice(&length.to_be_bytes());
        }
        block
    }

    #[test]
    fn test_null_descriptors_are_skipped() {
        let mut bytes = HDF4_MAGIC.to_vec();
        bytes.extend(dd_block(2, 0, &[(tags::VERSION, 1, 0, 0), (tags::NULL, 0, 0, 0)]));

        let dds = read_dd_chain(&mut Cursor::new(bytes), &BigEndianHandler).unwrap();
        assert_eq!(dds.len(), 1);
        assert_eq!(dds[0].tag, tags::VERSION);
    }

    #[test]
    fn test_chain_follows_next_block() {
        let mut bytes = HDF4_MAGIC.to_vec();
        // First block is 6 + 12 bytes long, so the second starts at 22
        bytes.extend(dd_block(1, 22, &[(tags::VH, 2, 0, 0)]));
        bytes.extend(dd_block(1, 0, &[(tags::VS | tags::SPECIAL_FLAG, 2, 0, 0)]));

        let dds = read_dd_chain(&mut Cursor::new(bytes), &BigEndianHandler).unwrap();
        assert_eq!(dds.len(), 2);
        assert!(dds[1].is_special());
        assert_eq!(dds[1].base_tag(), tags::VS);
    }

    #[test]
    fn test_cycle_stops_chain() {
        let mut bytes = HDF4_MAGIC.to_vec();
        bytes.extend(dd_block(1, 4, &[(tags::VERSION, 1, 0, 0)]));

        let dds = read_dd_chain(&mut Cursor::new(bytes), &BigEndianHandler).unwrap();
        assert_eq!(dds.len(), 1);
    }

    #[test]
    fn test_truncated_first_block_is_an_error() {
        let mut bytes = HDF4_MAGIC.to_vec();
        bytes.extend(dd_block(3, 0, &[(tags::VERSION, 1, 0, 0)]));

        let result = read_dd_chain(&mut Cursor::new(bytes), &BigEndianHandler);
        assert!(matches!(result, Err(RasterError::InvalidHdfHeader(_))));
    }
}
