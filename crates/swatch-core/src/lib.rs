//! # swatch-core - Swatch-Exchange Color Collection Decoder
//!
//! Decodes swatch-exchange (`.ase`) files, the binary format color vendors
//! use to publish their collections, into flat color records.
//!
//! ## Pipeline
//!
//! - [`ase::BinaryReader`]: big-endian cursor with UTF-16 string reads
//! - [`ase::Blocks`]: header validation and the block stream
//! - [`ase::ColorEntry`]: color model, channel values, color type
//! - [`CollectionAssembler`]: group nesting, one [`Collection`] per file
//! - [`decode_all`]: parallel batch decode into a [`Catalog`]
//!
//! ## Quick Start
//!
//! ```no_run
//! use swatch_core::{DecodeOptions, RawFile, decode};
//!
//! let file = RawFile::from_path("workspace/color-preview.ase")?;
//! let collection = decode(&file, &DecodeOptions::default())?;
//!
//! for color in &collection.colors {
//!     println!("{} {} {:?}", color.name(), color.model(), color.values());
//! }
//! # Ok::<(), swatch_core::Error>(())
//! ```

pub mod ase;
pub mod catalog;
pub mod collection;
pub mod color;
pub mod error;
pub mod raw;
pub mod types;

pub use ase::{AseError, AseVersion, Block, Blocks, UnknownBlockPolicy};
pub use catalog::{BatchReport, Catalog, decode_all};
pub use collection::{
    Collection, CollectionAssembler, ColorRecord, DecodeOptions, DecodeWarning, Fallback,
    GroupNaming, TrailingDataPolicy, decode, decode_bytes,
};
pub use error::{Error, FileError, Result};
pub use raw::{
    COLLECTIONS_FILE, CollectionInfo, RawFile, collection_id, collections_in, expand_paths,
    load_collections, save_collections, scan_dir,
};
pub use types::{ColorModel, ColorType};

/// Version of swatch-core
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
