//! Tests for the TIFF reader against synthetic files


use std::io::Cursor;
use byteorder::LittleEndian;

use crate::dataset::AttributeSource;
use crate::errors::RasterError;
use crate::io::byte_order::ByteOrder;
use crate::tiff::constants::tags;
use crate::tiff::reader::TiffReader;
use test_utils::{create_tiff_with_metadata, gdal_metadata_xml, TiffWriter};

#[test]
fn test_reads_classic_little_endian_structure() {
    let bytes = create_tiff_with_metadata(ByteOrder::LittleEndian, false, None);
    let mut reader = TiffReader::new();

    let tiff = reader.read(&mut Cursor::new(bytes)).unwrap();
    assert!(!tiff.is_big_tiff);
    assert_eq!(tiff.ifd_count(), 1);

    let ifd = tiff.main_ifd().unwrap();
    assert_eq!(ifd.entry_count(), 2);
    assert_eq!(ifd.get_entry(tags::IMAGE_WIDTH).map(|e| e.value_offset), Some(1));
}

#[test]
fn test_gdal_metadata_in_every_layout() {
    let xml = gdal_metadata_xml("SENSING_TIME", "2021-03-15T07:05:09.123456");

    for order in [ByteOrder::LittleEndian, ByteOrder::BigEndian] {
        for big_tiff in [false, true] {
            let bytes = create_tiff_with_metadata(order, big_tiff, Some(&xml));
            let mut reader = TiffReader::new();

            let attributes = reader.read_attributes(&mut Cursor::new(bytes)).unwrap();
            assert_eq!(reader.is_big_tiff(), big_tiff);
            assert_eq!(
                attributes.get("SENSING_TIME"),
                Some("2021-03-15T07:05:09.123456"),
                "order={:?} big_tiff={}", order, big_tiff
            );
        }
    }
}

#[test]
fn test_tiff_without_gdal_metadata_has_no_attributes() {
    let bytes = create_tiff_with_metadata(ByteOrder::BigEndian, false, None);
    let attributes = TiffReader::new().read_attributes(&mut Cursor::new(bytes)).unwrap();
    assert!(attributes.is_empty());
}

#[test]
fn test_inline_ascii_value_is_read_from_entry() {
    let bytes = create_tiff_with_metadata(ByteOrder::LittleEndian, true, Some("abc"));
    let mut cursor = Cursor::new(bytes);
    let mut reader = TiffReader::new();

    let tiff = reader.read(&mut cursor).unwrap();
    let ifd = tiff.main_ifd().unwrap();
    let value = reader.read_ascii_tag(&mut cursor, ifd, tags::GDAL_METADATA).unwrap();
    assert_eq!(value.as_deref(), Some("abc"));
}

#[test]
fn test_metadata_offset_past_end_of_file() {
    let xml = gdal_metadata_xml("SENSING_TIME", "2021-03-15T07:05:09");
    let mut bytes = create_tiff_with_metadata(ByteOrder::LittleEndian, false, Some(&xml));
    // Drop the metadata payload but keep the entry pointing at it
    bytes.truncate(8 + 2 + 3 * 12 + 4);

    let result = TiffReader::new().read_attributes(&mut Cursor::new(bytes));
    assert!(matches!(result, Err(RasterError::MalformedMetadata(_))));
}

#[test]
fn test_bad_version_is_rejected() {
    let mut w = TiffWriter::<LittleEndian>::new();
    w.buffer.extend_from_slice(b"II");
    w.u16(44);
    w.u32(8);

    let result = TiffReader::new().read(&mut Cursor::new(w.buffer));
    assert!(matches!(result, Err(RasterError::UnsupportedVersion(44))));
}

#[test]
fn test_first_ifd_offset_outside_file() {
    let mut w = TiffWriter::<LittleEndian>::new();
    w.buffer.extend_from_slice(b"II");
    w.u16(42);
    w.u32(4096);

    let result = TiffReader::new().read(&mut Cursor::new(w.buffer));
    assert!(matches!(result, Err(RasterError::UnsupportedFormat(_))));
}
