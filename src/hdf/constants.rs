//! HDF4 format constants
//!
//! Tag numbers, number types and class names of the HDF4 file format.
//! All multi-byte fields in an HDF4 file are big-endian.

use std::collections::HashMap;
use lazy_static::lazy_static;

/// HDF4 magic number at the start of every file
pub const HDF4_MAGIC: [u8; 4] = [0x0e, 0x03, 0x13, 0x01];

/// HDF5 superblock signature, recognised only to reject it clearly
pub const HDF5_SIGNATURE: [u8; 8] = [0x89, b'H', b'D', b'F', b'\r', b'\n', 0x1a, b'\n'];

/// Size of a DD block header (ndds u16 + next block offset u32)
pub const DD_BLOCK_HEADER_LEN: u64 = 6;

/// Size of a single data descriptor
pub const DD_LEN: u64 = 12;

/// Upper bound on the number of DD blocks followed in a chain
pub const MAX_DD_BLOCKS: usize = 4096;

/// Data object tags
pub mod tags {
    pub const NULL: u16 = 1;          // Unused descriptor slot
    pub const VERSION: u16 = 30;      // Library version
    pub const NUMBER_TYPE: u16 = 106; // Number type
    pub const SDD: u16 = 701;         // Scientific data dimension record
    pub const SD: u16 = 702;          // Scientific data
    pub const NDG: u16 = 720;         // Numeric data group
    pub const VH: u16 = 1962;         // Vdata header
    pub const VS: u16 = 1963;         // Vdata storage
    pub const VG: u16 = 1965;         // Vgroup

    /// Set on tags whose element uses special (linked/external/compressed) storage
    pub const SPECIAL_FLAG: u16 = 0x4000;
}

/// Vdata and Vgroup class names written by the SD interface
pub mod classes {
    /// Class of a vdata holding one attribute
    pub const ATTRIBUTE: &str = "Attr0.0";
    /// Class of the vgroup that roots an SD file
    pub const SD_ROOT: &str = "CDF0.0";
}

/// Number types (DFNT_*)
pub mod number_types {
    pub const UCHAR8: u16 = 3;
    pub const CHAR8: u16 = 4;
    pub const FLOAT32: u16 = 5;
    pub const FLOAT64: u16 = 6;
    pub const INT8: u16 = 20;
    pub const UINT8: u16 = 21;
    pub const INT16: u16 = 22;
    pub const UINT16: u16 = 23;
    pub const INT32: u16 = 24;
    pub const UINT32: u16 = 25;
    pub const INT64: u16 = 26;
    pub const UINT64: u16 = 27;

    /// Native-format flag
    pub const NATIVE_FLAG: u16 = 0x1000;
    /// Little-endian flag
    pub const LITTLE_ENDIAN_FLAG: u16 = 0x4000;
}

lazy_static! {
    static ref TAG_NAMES: HashMap<u16, &'static str> = {
        let mut names = HashMap::new();
        names.insert(tags::NULL, "DFTAG_NULL");
        names.insert(tags::VERSION, "DFTAG_VERSION");
        names.insert(tags::NUMBER_TYPE, "DFTAG_NT");
        names.insert(tags::SDD, "DFTAG_SDD");
        names.insert(tags::SD, "DFTAG_SD");
        names.insert(tags::NDG, "DFTAG_NDG");
        names.insert(tags::VH, "DFTAG_VH");
        names.insert(tags::VS, "DFTAG_VS");
        names.insert(tags::VG, "DFTAG_VG");
        names
    };
}

/// Get the name of an HDF4 tag, ignoring the special-storage flag
pub fn get_tag_name(tag: u16) -> &'static str {
    TAG_NAMES
        .get(&(tag & !tags::SPECIAL_FLAG))
        .copied()
        .unwrap_or("Unknown")
}
