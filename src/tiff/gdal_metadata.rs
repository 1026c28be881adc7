//! GDAL metadata XML parsing
//!
//! GDAL stores dataset and band metadata of a GeoTIFF in the
//! GDAL_METADATA tag (42112) as a small XML document:
//!
//! ```xml
//! <GDALMetadata>
//!   <Item name="SENSING_TIME">2021-03-15T07:05:09.123456</Item>
//!   <Item name="STATISTICS_MEAN" sample="0" role="description">12.5</Item>
//! </GDALMetadata>
//! ```
//!
//! Only dataset-level items of the default domain become attributes.

use log::{debug, trace};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::dataset::AttributeMap;
use crate::errors::{RasterError, RasterResult};

const ITEM_ELEMENT: &[u8] = b"Item";

/// Parses a GDAL metadata document into an attribute map
pub fn parse_gdal_metadata(xml: &str) -> RasterResult<AttributeMap> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut attributes = AttributeMap::new();
    let mut current: Option<String> = None;
    let mut value = String::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) if e.name().as_ref() == ITEM_ELEMENT => {
                current = dataset_item_name(&e)?;
                value.clear();
            }
            Event::Empty(e) if e.name().as_ref() == ITEM_ELEMENT => {
                if let Some(name) = dataset_item_name(&e)? {
                    attributes.insert(name, "");
                }
            }
            Event::Text(t) => {
                if current.is_some() {
                    let text = t.unescape().map_err(|e| {
                        RasterError::MalformedMetadata(format!("GDAL metadata text: {}", e))
                    })?;
                    value.push_str(&text);
                }
            }
            Event::CData(c) => {
                if current.is_some() {
                    value.push_str(&String::from_utf8_lossy(&c));
                }
            }
            Event::End(e) if e.name().as_ref() == ITEM_ELEMENT => {
                if let Some(name) = current.take() {
                    trace!("GDAL metadata item {}={}", name, value);
                    attributes.insert(name, value.as_str());
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    debug!("Parsed {} dataset-level GDAL metadata items", attributes.len());
    Ok(attributes)
}

/// Returns the item name if the element describes dataset-level metadata
///
/// Band items carry a `sample` attribute; items of other domains (for
/// example `IMAGE_STRUCTURE`) carry a non-empty `domain`.
fn dataset_item_name(element: &BytesStart<'_>) -> RasterResult<Option<String>> {
    let mut name = None;
    let mut is_dataset_level = true;

    for attr in element.attributes() {
        let attr = attr.map_err(|e| {
            RasterError::MalformedMetadata(format!("GDAL metadata attribute: {}", e))
        })?;
        let attr_value = attr.unescape_value().map_err(|e| {
            RasterError::MalformedMetadata(format!("GDAL metadata attribute value: {}", e))
        })?;

        match attr.key.as_ref() {
            b"name" => name = Some(attr_value.into_owned()),
            b"sample" => is_dataset_level = false,
            b"domain" if !attr_value.is_empty() => is_dataset_level = false,
            _ => {}
        }
    }

    match name {
        Some(name) if is_dataset_level => Ok(Some(name)),
        Some(name) => {
            trace!("Skipping band or domain item {}", name);
            Ok(None)
        }
        None => Err(RasterError::MalformedMetadata(
            "GDAL metadata item without a name".to_string(),
        )),
    }
}
