//! Synthetic Landsat scenes for integration tests

#![allow(dead_code)]

use std::io::Write;
use byteorder::{BigEndian, LittleEndian, WriteBytesExt};
use tempfile::NamedTempFile;

const HDF4_MAGIC: [u8; 4] = [0x0e, 0x03, 0x13, 0x01];
const DFTAG_VH: u16 = 1962;
const DFTAG_VS: u16 = 1963;
const DFTAG_VG: u16 = 1965;
const DFNT_CHAR8: u16 = 4;

fn push_name(buffer: &mut Vec<u8>, name: &str) {
    buffer.write_u16::<BigEndian>(name.len() as u16).unwrap();
    buffer.extend_from_slice(name.as_bytes());
}

/// HDF4 file whose SD root vgroup carries the given character attributes
pub fn hdf_scene(attributes: &[(&str, &str)]) -> Vec<u8> {
    // (tag, ref, payload)
    let mut elements: Vec<(u16, u16, Vec<u8>)> = Vec::new();
    let mut members = Vec::new();

    for (i, (name, value)) in attributes.iter().enumerate() {
        let reference = i as u16 + 2;
        let len = value.len() as u16;

        let mut header = Vec::new();
        header.write_u16::<BigEndian>(0).unwrap();
        header.write_u32::<BigEndian>(1).unwrap();
        header.write_u16::<BigEndian>(len).unwrap();
        header.write_u16::<BigEndian>(1).unwrap();
        header.write_u16::<BigEndian>(DFNT_CHAR8).unwrap();
        header.write_u16::<BigEndian>(len).unwrap();
        header.write_u16::<BigEndian>(0).unwrap();
        header.write_u16::<BigEndian>(len).unwrap();
        push_name(&mut header, "VALUES");
        push_name(&mut header, name);
        push_name(&mut header, "Attr0.0");
        for v in [0u16, 0, 3, 0] {
            header.write_u16::<BigEndian>(v).unwrap();
        }

        elements.push((DFTAG_VH, reference, header));
        elements.push((DFTAG_VS, reference, value.as_bytes().to_vec()));
        members.push(reference);
    }

    let mut group = Vec::new();
    group.write_u16::<BigEndian>(members.len() as u16).unwrap();
    for _ in &members {
        group.write_u16::<BigEndian>(DFTAG_VH).unwrap();
    }
    for reference in &members {
        group.write_u16::<BigEndian>(*reference).unwrap();
    }
    push_name(&mut group, "scene.hdf");
    push_name(&mut group, "CDF0.0");
    for v in [0u16, 0, 3, 0] {
        group.write_u16::<BigEndian>(v).unwrap();
    }
    elements.push((DFTAG_VG, 1, group));

    let mut buffer = HDF4_MAGIC.to_vec();
    buffer.write_u16::<BigEndian>(elements.len() as u16).unwrap();
    buffer.write_u32::<BigEndian>(0).unwrap();
    let mut offset = (HDF4_MAGIC.len() + 6 + 12 * elements.len()) as u32;
    for (tag, reference, payload) in &elements {
        buffer.write_u16::<BigEndian>(*tag).unwrap();
        buffer.write_u16::<BigEndian>(*reference).unwrap();
        buffer.write_u32::<BigEndian>(offset).unwrap();
        buffer.write_u32::<BigEndian>(payload.len() as u32).unwrap();
        offset += payload.len() as u32;
    }
    for (_, _, payload) in &elements {
        buffer.extend_from_slice(payload);
    }

    buffer
}

/// Little-endian GeoTIFF whose only IFD entry is a GDAL_METADATA tag
pub fn tiff_scene(metadata_xml: &str) -> Vec<u8> {
    let mut ascii = metadata_xml.as_bytes().to_vec();
    ascii.push(0);

    let mut buffer = Vec::new();
    buffer.extend_from_slice(b"II");
    buffer.write_u16::<LittleEndian>(42).unwrap();
    buffer.write_u32::<LittleEndian>(8).unwrap();

    buffer.write_u16::<LittleEndian>(1).unwrap();
    buffer.write_u16::<LittleEndian>(42112).unwrap();
    buffer.write_u16::<LittleEndian>(2).unwrap();
    buffer.write_u32::<LittleEndian>(ascii.len() as u32).unwrap();
    buffer.write_u32::<LittleEndian>(26).unwrap();
    buffer.write_u32::<LittleEndian>(0).unwrap();

    buffer.extend_from_slice(&ascii);
    buffer
}

/// GDAL metadata document with the given dataset-level items
pub fn gdal_metadata(items: &[(&str, &str)]) -> String {
    let mut xml = String::from("<GDALMetadata>\n");
    for (name, value) in items {
        xml.push_str(&format!("  <Item name=\"{}\">{}</Item>\n", name, value));
    }
    xml.push_str("</GDALMetadata>");
    xml
}

/// Writes bytes to a temporary file with the given suffix
pub fn write_scene(bytes: &[u8], suffix: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("landsat_scene")
        .suffix(suffix)
        .tempfile()
        .unwrap();
    file.write_all(bytes).unwrap();
    file.flush().unwrap();
    file
}
