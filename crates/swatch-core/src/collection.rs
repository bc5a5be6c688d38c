//! Collection assembly
//!
//! Turns the block stream of one file into a [`Collection`] of flat
//! [`ColorRecord`]s, each tagged with the group it was found in.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::ase::{
    AseError, AseVersion, Block, BlockType, Blocks, ColorEntry, GroupImbalance, UnknownBlockPolicy,
};
use crate::error::FileError;
use crate::raw::RawFile;
use crate::types::{ColorModel, ColorType};

/// A decoded color, flattened out of its group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RecordFields")]
pub struct ColorRecord {
    collection: String,
    name: String,
    model: ColorModel,
    values: Vec<f32>,
    color_type: ColorType,
}

impl ColorRecord {
    /// Create a record, checking the value count against the model
    pub fn new(
        collection: impl Into<String>,
        name: impl Into<String>,
        model: ColorModel,
        values: Vec<f32>,
        color_type: ColorType,
    ) -> Result<Self, AseError> {
        if values.len() != model.arity() {
            return Err(AseError::ArityMismatch {
                model,
                expected: model.arity(),
                actual: values.len(),
            });
        }

        Ok(Self {
            collection: collection.into(),
            name: name.into(),
            model,
            values,
            color_type,
        })
    }

    /// Tag a decoded entry with its group name
    pub fn from_entry(collection: impl Into<String>, entry: ColorEntry) -> Result<Self, AseError> {
        Self::new(
            collection,
            entry.name,
            entry.model,
            entry.values,
            entry.color_type,
        )
    }

    /// Name of the group the color was found in
    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn model(&self) -> ColorModel {
        self.model
    }

    /// Channel values; length is always `model().arity()`
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn color_type(&self) -> ColorType {
        self.color_type
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecordFields {
    collection: String,
    name: String,
    model: ColorModel,
    values: Vec<f32>,
    color_type: ColorType,
}

impl TryFrom<RecordFields> for ColorRecord {
    type Error = AseError;

    fn try_from(fields: RecordFields) -> Result<Self, Self::Error> {
        Self::new(
            fields.collection,
            fields.name,
            fields.model,
            fields.values,
            fields.color_type,
        )
    }
}

/// Condition downgraded from an error by [`DecodeOptions`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeWarning {
    /// Bytes left after the declared number of blocks
    TrailingData { bytes: usize },
    /// Unknown block passed over by its declared length
    SkippedBlock { tag: u16, length: u32 },
}

/// All colors decoded from one file
#[derive(Debug, Clone, PartialEq)]
pub struct Collection {
    /// First top-level group name, else the fallback name, else the source
    pub name: String,
    /// Identifier of the file the colors came from
    pub source: String,
    /// Format version from the file header
    pub version: AseVersion,
    /// Colors in file order
    pub colors: Vec<ColorRecord>,
    pub warnings: Vec<DecodeWarning>,
}

impl Collection {
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

/// Collection name for colors found outside every group
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fallback {
    /// Use the source identifier of the file
    SourceId,
    /// Use a fixed name
    Named(String),
}

/// Which open group a nested color is attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupNaming {
    /// Innermost open group
    #[default]
    Innermost,
    /// Outermost (top-level) open group
    Outermost,
}

/// What to do with bytes after the last declared block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrailingDataPolicy {
    /// Keep the decoded colors and record a warning
    #[default]
    Warn,
    /// Fail the file with [`AseError::TrailingData`]
    Reject,
}

/// Options for decoding a file
#[derive(Debug, Clone, Default)]
pub struct DecodeOptions {
    /// Collection name for ungrouped colors (none: ungrouped colors are an error)
    pub fallback: Option<Fallback>,
    /// Group attribution for nested groups
    pub group_naming: GroupNaming,
    /// Handling of bytes after the last block
    pub trailing_data: TrailingDataPolicy,
    /// Handling of unrecognized block types
    pub unknown_blocks: UnknownBlockPolicy,
}

impl DecodeOptions {
    pub fn with_fallback(mut self, fallback: Fallback) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn with_group_naming(mut self, naming: GroupNaming) -> Self {
        self.group_naming = naming;
        self
    }

    pub fn with_trailing_data(mut self, policy: TrailingDataPolicy) -> Self {
        self.trailing_data = policy;
        self
    }

    pub fn with_unknown_blocks(mut self, policy: UnknownBlockPolicy) -> Self {
        self.unknown_blocks = policy;
        self
    }
}

/// Group state machine for one file
///
/// Open groups are kept on an explicit stack so nesting depth from
/// untrusted input never turns into recursion.
#[derive(Debug)]
pub struct CollectionAssembler<'o> {
    source: String,
    options: &'o DecodeOptions,
    version: AseVersion,
    groups: Vec<String>,
    first_group: Option<String>,
    colors: Vec<ColorRecord>,
    warnings: Vec<DecodeWarning>,
}

impl<'o> CollectionAssembler<'o> {
    pub fn new(source: impl Into<String>, options: &'o DecodeOptions) -> Self {
        Self {
            source: source.into(),
            options,
            version: AseVersion::default(),
            groups: Vec::new(),
            first_group: None,
            colors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Record the header version on the finished collection
    pub fn with_version(mut self, version: AseVersion) -> Self {
        self.version = version;
        self
    }

    /// Number of currently open groups
    pub fn depth(&self) -> usize {
        self.groups.len()
    }

    /// Feed the next block
    pub fn push(&mut self, block: Block) -> Result<(), AseError> {
        match block {
            Block::GroupStart { name } => {
                if self.first_group.is_none() {
                    self.first_group = Some(name.clone());
                }
                self.groups.push(name);
            }
            Block::GroupEnd => {
                self.groups
                    .pop()
                    .ok_or(AseError::UnbalancedGroups(GroupImbalance::UnmatchedEnd))?;
            }
            Block::ColorEntry(entry) => {
                let collection = self.collection_for(&entry.name)?;
                self.colors.push(ColorRecord::from_entry(collection, entry)?);
            }
            Block::Skipped { tag, length } => {
                warn!(source = %self.source, tag = %BlockType(tag), length, "skipped unknown block");
                self.warnings.push(DecodeWarning::SkippedBlock { tag, length });
            }
        }
        Ok(())
    }

    /// Record a condition that was downgraded to a warning
    pub fn warn(&mut self, warning: DecodeWarning) {
        self.warnings.push(warning);
    }

    fn collection_for(&self, color: &str) -> Result<String, AseError> {
        let open = match self.options.group_naming {
            GroupNaming::Innermost => self.groups.last(),
            GroupNaming::Outermost => self.groups.first(),
        };
        if let Some(group) = open {
            return Ok(group.clone());
        }

        match &self.options.fallback {
            Some(Fallback::SourceId) => Ok(self.source.clone()),
            Some(Fallback::Named(name)) => Ok(name.clone()),
            None => Err(AseError::UngroupedColorEntry {
                name: color.to_string(),
            }),
        }
    }

    /// Close the stream and produce the collection
    pub fn finish(self) -> Result<Collection, AseError> {
        if !self.groups.is_empty() {
            return Err(AseError::UnbalancedGroups(GroupImbalance::Unclosed(
                self.groups.len(),
            )));
        }

        let name = match (self.first_group, &self.options.fallback) {
            (Some(group), _) => group,
            (None, Some(Fallback::Named(name))) => name.clone(),
            (None, _) => self.source.clone(),
        };

        Ok(Collection {
            name,
            source: self.source,
            version: self.version,
            colors: self.colors,
            warnings: self.warnings,
        })
    }
}

/// Decode one file into a collection
///
/// Errors carry the file's identifier.
pub fn decode(file: &RawFile, options: &DecodeOptions) -> Result<Collection, FileError> {
    decode_bytes(&file.id, &file.bytes, options).map_err(|error| FileError {
        file: file.id.clone(),
        error,
    })
}

/// Decode raw bytes, naming the source `source`
pub fn decode_bytes(
    source: &str,
    data: &[u8],
    options: &DecodeOptions,
) -> Result<Collection, AseError> {
    let blocks = Blocks::new(data)?.with_unknown_blocks(options.unknown_blocks);
    let mut assembler = CollectionAssembler::new(source, options).with_version(blocks.header().version);

    for block in blocks {
        match block {
            Ok(block) => assembler.push(block)?,
            Err(AseError::TrailingData { bytes })
                if options.trailing_data == TrailingDataPolicy::Warn =>
            {
                warn!(source, bytes, "ignoring trailing data after last block");
                assembler.warn(DecodeWarning::TrailingData { bytes });
            }
            Err(err) => return Err(err),
        }
    }

    let collection = assembler.finish()?;
    info!(
        source,
        collection = %collection.name,
        colors = collection.len(),
        "decoded collection"
    );
    Ok(collection)
}
