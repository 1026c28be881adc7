//! Tests for the HDF4 reader against synthetic files


use std::io::Cursor;

use crate::dataset::AttributeSource;
use crate::errors::RasterError;
use crate::hdf::constants::{classes, number_types, tags};
use crate::hdf::reader::HdfReader;
use test_utils::{attribute_header, build_hdf, char_attribute, sd_file_with_attributes, vgroup, Element};

#[test]
fn test_global_attributes_are_read() {
    let bytes = sd_file_with_attributes(&[
        ("SENSING_TIME", "2021-03-15T07:05:09.123456"),
        ("SPACECRAFT", "LANDSAT_8"),
    ]);

    let attributes = HdfReader::new().read_attributes(&mut Cursor::new(bytes)).unwrap();
    assert_eq!(attributes.len(), 2);
    assert_eq!(attributes.get("SENSING_TIME"), Some("2021-03-15T07:05:09.123456"));
    assert_eq!(attributes.get("SPACECRAFT"), Some("LANDSAT_8"));
}

#[test]
fn test_dataset_attributes_are_not_global() {
    let mut elements = char_attribute(2, "SENSING_TIME", "2021-03-15T23:59:00");
    // Attribute of a dataset vgroup, not referenced by the root
    elements.extend(char_attribute(3, "long_name", "surface reflectance"));
    elements.push(Element {
        tag: tags::VG,
        reference: 1,
        data: vgroup(&[(tags::VH, 2)], "scene.hdf", classes::SD_ROOT),
    });
    elements.push(Element {
        tag: tags::VG,
        reference: 4,
        data: vgroup(&[(tags::VH, 3)], "sr_band1", "Var0.0"),
    });

    let attributes = HdfReader::new()
        .read_attributes(&mut Cursor::new(build_hdf(&[elements])))
        .unwrap();
    assert_eq!(attributes.len(), 1);
    assert!(!attributes.contains("long_name"));
}

#[test]
fn test_without_root_vgroup_every_attribute_is_used() {
    let mut elements = char_attribute(7, "SENSING_TIME", "2021-01-01T00:00:00.0");
    elements.push(Element {
        tag: tags::VH,
        reference: 8,
        data: attribute_header("SUN_ZENITH", number_types::FLOAT32, 1, 1),
    });
    elements.push(Element {
        tag: tags::VS,
        reference: 8,
        data: 30.5f32.to_be_bytes().to_vec(),
    });

    let attributes = HdfReader::new()
        .read_attributes(&mut Cursor::new(build_hdf(&[elements])))
        .unwrap();
    assert_eq!(attributes.get("SENSING_TIME"), Some("2021-01-01T00:00:00.0"));
    assert_eq!(attributes.get("SUN_ZENITH"), Some("30.5"));
}

#[test]
fn test_descriptors_spread_over_blocks() {
    let first = char_attribute(2, "SENSING_TIME", "2021-03-15T07:05:09");
    let second = vec![Element {
        tag: tags::VG,
        reference: 1,
        data: vgroup(&[(tags::VH, 2)], "scene.hdf", classes::SD_ROOT),
    }];

    let bytes = build_hdf(&[first, second]);
    let mut reader = HdfReader::new();
    let attributes = reader.read_attributes(&mut Cursor::new(bytes)).unwrap();

    assert_eq!(reader.descriptors().len(), 3);
    assert_eq!(attributes.get("SENSING_TIME"), Some("2021-03-15T07:05:09"));
}

#[test]
fn test_attribute_without_storage_is_skipped() {
    let elements = vec![Element {
        tag: tags::VH,
        reference: 2,
        data: attribute_header("SENSING_TIME", number_types::CHAR8, 19, 1),
    }];

    let attributes = HdfReader::new()
        .read_attributes(&mut Cursor::new(build_hdf(&[elements])))
        .unwrap();
    assert!(attributes.is_empty());
}

#[test]
fn test_zero_record_size_is_skipped() {
    let mut header = attribute_header("SENSING_TIME", number_types::CHAR8, 1, 50_000_000);
    header[6..8].copy_from_slice(&[0, 0]);
    let elements = vec![
        Element { tag: tags::VH, reference: 2, data: header },
        Element { tag: tags::VS, reference: 2, data: b"2".to_vec() },
    ];

    let attributes = HdfReader::new()
        .read_attributes(&mut Cursor::new(build_hdf(&[elements])))
        .unwrap();
    assert!(attributes.get("SENSING_TIME").is_none());
}

#[test]
fn test_bad_magic() {
    let mut bytes = sd_file_with_attributes(&[("SENSING_TIME", "2021-03-15T07:05:09")]);
    bytes[0] = 0;

    let result = HdfReader::new().read_attributes(&mut Cursor::new(bytes));
    assert!(matches!(result, Err(RasterError::InvalidHdfHeader(_))));
}

#[test]
fn test_element_past_end_of_file() {
    let mut bytes = sd_file_with_attributes(&[("SENSING_TIME", "2021-03-15T07:05:09")]);
    bytes.truncate(bytes.len() - 5);

    let result = HdfReader::new().read_attributes(&mut Cursor::new(bytes));
    assert!(matches!(result, Err(RasterError::MalformedMetadata(_))));
}
