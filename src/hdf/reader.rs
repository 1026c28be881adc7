//! HDF4 file reader implementation
//!
//! Reads the data descriptor index of an HDF4 file and exposes the
//! scientific dataset (SD) global attributes as an attribute source.

use std::collections::HashSet;
use std::io::SeekFrom;
use log::{debug, info, warn};

use crate::dataset::{AttributeMap, AttributeSource};
use crate::errors::{RasterError, RasterResult};
use crate::hdf::constants::{tags, HDF4_MAGIC};
use crate::hdf::dd::{self, DataDescriptor};
use crate::hdf::vdata::{VdataHeader, Vgroup};
use crate::io::byte_order::BigEndianHandler;
use crate::io::seekable::SeekableReader;
use crate::utils::file_utils;

/// Reader for HDF4 files
#[derive(Debug, Default)]
pub struct HdfReader {
    /// Descriptors of every object in the file
    descriptors: Vec<DataDescriptor>,
}

impl HdfReader {
    /// Creates a new HDF4 reader
    pub fn new() -> Self {
        HdfReader { descriptors: Vec::new() }
    }

    /// Checks the magic number and reads the DD index
    ///
    /// # Returns
    /// The number of data descriptors found
    pub fn read(&mut self, reader: &mut dyn SeekableReader) -> RasterResult<usize> {
        debug!("HdfReader::read starting");
        reader.seek(SeekFrom::Start(0))?;

        let mut magic = [0u8; 4];
        reader.read_exact(&mut magic).map_err(|_| {
            RasterError::InvalidHdfHeader("file too short for an HDF4 header".to_string())
        })?;
        if magic != HDF4_MAGIC {
            return Err(RasterError::InvalidHdfHeader(format!("bad magic number {:02x?}", magic)));
        }

        self.descriptors = dd::read_dd_chain(reader, &BigEndianHandler)?;
        info!("Read {} data descriptors from HDF4 file", self.descriptors.len());
        Ok(self.descriptors.len())
    }

    /// Descriptors read by the last call to `read`
    pub fn descriptors(&self) -> &[DataDescriptor] {
        &self.descriptors
    }

    /// Finds the descriptor of an object stored with plain storage
    fn find(&self, tag: u16, reference: u16) -> Option<&DataDescriptor> {
        self.descriptors
            .iter()
            .find(|dd| dd.tag == tag && dd.reference == reference)
    }

    /// Reads the bytes of the element a descriptor points at
    fn read_element(&self, reader: &mut dyn SeekableReader, dd: &DataDescriptor) -> RasterResult<Vec<u8>> {
        file_utils::read_bytes_at(reader, dd.offset as u64, dd.length as u64)
    }

    /// Decodes every Vdata header in the file
    ///
    /// Headers that cannot be decoded are skipped with a warning.
    ///
    /// # Returns
    /// (reference, header) pairs in index order
    pub fn vdata_headers(&self, reader: &mut dyn SeekableReader) -> RasterResult<Vec<(u16, VdataHeader)>> {
        let mut headers = Vec::new();

        for dd in self.descriptors.iter().filter(|dd| dd.tag == tags::VH) {
            let bytes = self.read_element(reader, dd)?;
            match VdataHeader::parse(&bytes) {
                Ok(header) => headers.push((dd.reference, header)),
                Err(e) => warn!("Skipping Vdata header ref={}: {}", dd.reference, e),
            }
        }

        Ok(headers)
    }

    /// Decodes every Vgroup in the file
    pub fn vgroups(&self, reader: &mut dyn SeekableReader) -> RasterResult<Vec<Vgroup>> {
        let mut groups = Vec::new();

        for dd in self.descriptors.iter().filter(|dd| dd.tag == tags::VG) {
            let bytes = self.read_element(reader, dd)?;
            match Vgroup::parse(&bytes) {
                Ok(group) => groups.push(group),
                Err(e) => warn!("Skipping Vgroup ref={}: {}", dd.reference, e),
            }
        }

        Ok(groups)
    }

    /// References of the attribute vdatas attached to the SD root vgroup
    ///
    /// # Returns
    /// None when the file has no SD root vgroup
    fn global_attribute_refs(&self, reader: &mut dyn SeekableReader) -> RasterResult<Option<HashSet<u16>>> {
        let roots: Vec<Vgroup> = self.vgroups(reader)?
            .into_iter()
            .filter(Vgroup::is_sd_root)
            .collect();

        if roots.is_empty() {
            return Ok(None);
        }

        let refs = roots
            .iter()
            .flat_map(|group| group.children.iter())
            .filter(|(tag, _)| *tag == tags::VH)
            .map(|(_, reference)| *reference)
            .collect();
        Ok(Some(refs))
    }

    /// Reads and renders the value of one attribute vdata
    fn read_attribute_value(
        &self,
        reader: &mut dyn SeekableReader,
        reference: u16,
        header: &VdataHeader,
    ) -> RasterResult<Option<String>> {
        let dd = match self.find(tags::VS, reference) {
            Some(dd) => dd,
            None => {
                let special = self.descriptors.iter().any(|dd| {
                    dd.is_special() && dd.base_tag() == tags::VS && dd.reference == reference
                });
                if special {
                    warn!("Attribute {} uses special storage, skipping", header.name);
                } else {
                    warn!("Attribute {} has no Vdata storage element", header.name);
                }
                return Ok(None);
            }
        };

        if (dd.length as u64) < header.data_len() {
            warn!("Attribute {} storage holds {} bytes, expected {}",
                  header.name, dd.length, header.data_len());
            return Ok(None);
        }

        let data = self.read_element(reader, dd)?;
        let value = header.decode_value(&data);
        if value.is_none() {
            debug!("Attribute {} has a layout that cannot be rendered", header.name);
        }
        Ok(value)
    }
}

impl AttributeSource for HdfReader {
    fn read_attributes(&mut self, reader: &mut dyn SeekableReader) -> RasterResult<AttributeMap> {
        self.read(reader)?;

        let global_refs = self.global_attribute_refs(reader)?;
        if global_refs.is_none() {
            debug!("No SD root vgroup, using every attribute vdata");
        }

        let mut attributes = AttributeMap::new();
        for (reference, header) in self.vdata_headers(reader)? {
            if !header.is_attribute() {
                continue;
            }
            if let Some(refs) = &global_refs {
                if !refs.contains(&reference) {
                    debug!("Attribute {} (ref={}) is not global", header.name, reference);
                    continue;
                }
            }

            if let Some(value) = self.read_attribute_value(reader, reference, &header)? {
                attributes.insert(header.name, value);
            }
        }

        Ok(attributes)
    }
}
