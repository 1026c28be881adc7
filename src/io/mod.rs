//! I/O utilities for file handling
//!
//! This module provides the seekable reader abstraction and the byte order
//! strategies shared by the TIFF and HDF4 readers.

pub mod seekable;
pub mod byte_order;
