//! Swatch-Exchange (ASE) File Decoding
//!
//! This module decodes the binary swatch-exchange format used to publish
//! color collections.
//!
//! # Structure
//!
//! An ASE file consists of:
//! 1. A 12-byte header (signature, version, block count)
//! 2. A flat sequence of typed, length-prefixed blocks
//!
//! Groups are delimited by group-start/group-end blocks; color entries
//! between them belong to the group.
//!
//! # Example
//!
//! ```ignore
//! use swatch_core::ase::{Block, Blocks};
//!
//! for block in Blocks::new(&bytes)? {
//!     if let Block::ColorEntry(entry) = block? {
//!         println!("{} {:?}", entry.name, entry.values);
//!     }
//! }
//! ```

pub mod blocks;
pub mod entry;
pub mod header;
pub mod reader;

mod error;

pub use blocks::{Block, BlockType, Blocks, UnknownBlockPolicy};
pub use entry::ColorEntry;
pub use error::{AseError, GroupImbalance};
pub use header::{AseHeader, AseVersion, HEADER_SIZE, SIGNATURE};
pub use reader::BinaryReader;
