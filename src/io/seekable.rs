//! Seekable reader trait
//!
//! Both metadata readers walk offset tables, so they need a reader that
//! supports reading and seeking.

use std::io::{Read, Seek};

/// Trait for readers that can both read and seek
pub trait SeekableReader: Read + Seek + Send + Sync {}

// Blanket implementation for any type that implements the required traits
impl<T: Read + Seek + Send + Sync> SeekableReader for T {}
