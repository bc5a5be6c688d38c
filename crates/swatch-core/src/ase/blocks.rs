//! ASE Block Stream
//!
//! After the header, a file is a flat sequence of blocks:
//!
//! ```text
//! Size    Description
//! 2       Block type (0xC001 group start, 0xC002 group end, 0x0001 color)
//! 4       Body length in bytes (excluding these 6 header bytes)
//! len     Body
//! ```
//!
//! Group nesting is expressed only by the order of group-start and
//! group-end blocks, so the stream is decoded in a single forward pass.

use std::fmt;

use tracing::{debug, trace};

use super::entry::ColorEntry;
use super::error::AseError;
use super::header::AseHeader;
use super::reader::BinaryReader;

/// Block type signature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockType(pub u16);

impl BlockType {
    pub const GROUP_START: Self = Self(0xC001);
    pub const GROUP_END: Self = Self(0xC002);
    pub const COLOR_ENTRY: Self = Self(0x0001);
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04X}", self.0)
    }
}

/// What to do with a block whose type is not recognized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownBlockPolicy {
    /// Fail with [`AseError::UnknownBlockType`]
    #[default]
    Reject,
    /// Jump over the body using its declared length and yield [`Block::Skipped`]
    Skip,
}

/// One decoded block
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Opens a named group
    GroupStart { name: String },
    /// Closes the innermost open group
    GroupEnd,
    /// A single color
    ColorEntry(ColorEntry),
    /// Unrecognized block passed over under [`UnknownBlockPolicy::Skip`]
    Skipped { tag: u16, length: u32 },
}

/// Iterator over the blocks of one file
///
/// Yields exactly `block_count` blocks, then a single
/// [`AseError::TrailingData`] if bytes remain. After any error it yields
/// nothing more.
#[derive(Debug, Clone)]
pub struct Blocks<'a> {
    reader: BinaryReader<'a>,
    header: AseHeader,
    remaining: u32,
    unknown_blocks: UnknownBlockPolicy,
    done: bool,
}

impl<'a> Blocks<'a> {
    /// Validate the header and position the stream at the first block
    pub fn new(data: &'a [u8]) -> Result<Self, AseError> {
        let mut reader = BinaryReader::new(data);
        let header = AseHeader::parse(&mut reader)?;

        debug!(
            version = %header.version,
            blocks = header.block_count,
            bytes = data.len(),
            "parsed ASE header"
        );

        Ok(Self {
            reader,
            header,
            remaining: header.block_count,
            unknown_blocks: UnknownBlockPolicy::default(),
            done: false,
        })
    }

    /// Set how unrecognized block types are handled
    pub fn with_unknown_blocks(mut self, policy: UnknownBlockPolicy) -> Self {
        self.unknown_blocks = policy;
        self
    }

    /// The file header
    pub fn header(&self) -> &AseHeader {
        &self.header
    }

    /// Number of declared blocks not yet produced
    pub fn blocks_remaining(&self) -> u32 {
        self.remaining
    }

    fn next_block(&mut self) -> Result<Block, AseError> {
        let offset = self.reader.position();
        let tag = self.reader.read_u16()?;
        let length = self.reader.read_u32()?;
        let body = self.reader.read_bytes(length as usize)?;

        let mut body_reader = BinaryReader::new(body);
        let block = match BlockType(tag) {
            BlockType::GROUP_START => Block::GroupStart {
                name: body_reader.read_name()?,
            },
            BlockType::GROUP_END => Block::GroupEnd,
            BlockType::COLOR_ENTRY => Block::ColorEntry(ColorEntry::read(&mut body_reader)?),
            _ => match self.unknown_blocks {
                UnknownBlockPolicy::Reject => {
                    return Err(AseError::UnknownBlockType { tag, offset });
                }
                UnknownBlockPolicy::Skip => {
                    debug!(tag = %BlockType(tag), offset, length, "skipping unknown block");
                    return Ok(Block::Skipped { tag, length });
                }
            },
        };

        if body_reader.remaining() > 0 {
            trace!(
                offset,
                unused = body_reader.remaining(),
                "ignoring padding at end of block body"
            );
        }
        debug!(offset, length, ?block, "decoded block");

        Ok(block)
    }
}

impl Iterator for Blocks<'_> {
    type Item = Result<Block, AseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        if self.remaining == 0 {
            self.done = true;
            let bytes = self.reader.remaining();
            return (bytes > 0).then_some(Err(AseError::TrailingData { bytes }));
        }

        self.remaining -= 1;
        let result = self.next_block();
        if result.is_err() {
            self.done = true;
        }
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ColorModel, ColorType};

    fn header(count: u32) -> Vec<u8> {
        let mut data = b"ASEF".to_vec();
        data.extend(1u16.to_be_bytes());
        data.extend(0u16.to_be_bytes());
        data.extend(count.to_be_bytes());
        data
    }

    fn name_body(name: &str) -> Vec<u8> {
        let units: Vec<u16> = name.encode_utf16().chain(std::iter::once(0)).collect();
        let mut body = (units.len() as u16).to_be_bytes().to_vec();
        body.extend(units.iter().flat_map(|u| u.to_be_bytes()));
        body
    }

    fn block(data: &mut Vec<u8>, tag: u16, body: &[u8]) {
        data.extend(tag.to_be_bytes());
        data.extend((body.len() as u32).to_be_bytes());
        data.extend_from_slice(body);
    }

    fn gray_body(name: &str, value: f32) -> Vec<u8> {
        let mut body = name_body(name);
        body.extend_from_slice(b"Gray");
        body.extend(value.to_be_bytes());
        body.extend(2u16.to_be_bytes());
        body
    }

    #[test]
    fn test_yields_declared_blocks() {
        let mut data = header(3);
        block(&mut data, 0xC001, &name_body("Grays"));
        block(&mut data, 0x0001, &gray_body("Mid", 0.5));
        block(&mut data, 0xC002, &[]);

        let blocks = Blocks::new(&data).unwrap();
        assert_eq!(blocks.header().block_count, 3);

        let decoded: Vec<Block> = blocks.collect::<Result<_, _>>().unwrap();
        assert_eq!(
            decoded,
            vec![
                Block::GroupStart {
                    name: "Grays".into()
                },
                Block::ColorEntry(ColorEntry {
                    name: "Mid".into(),
                    model: ColorModel::Gray,
                    values: vec![0.5],
                    color_type: ColorType::Process,
                }),
                Block::GroupEnd,
            ]
        );
    }

    #[test]
    fn test_block_type_display() {
        assert_eq!(BlockType::GROUP_START.to_string(), "0xC001");
        assert_eq!(BlockType(0x42).to_string(), "0x0042");
    }

    #[test]
    fn test_empty_file() {
        let data = header(0);
        let mut blocks = Blocks::new(&data).unwrap();
        assert!(blocks.next().is_none());
    }

    #[test]
    fn test_trailing_data_after_blocks() {
        let mut data = header(1);
        block(&mut data, 0xC002, &[]);
        data.extend([0, 0, 0]);

        let mut blocks = Blocks::new(&data).unwrap();
        assert_eq!(blocks.next(), Some(Ok(Block::GroupEnd)));
        assert_eq!(blocks.next(), Some(Err(AseError::TrailingData { bytes: 3 })));
        assert_eq!(blocks.next(), None);
    }

    #[test]
    fn test_body_padding_is_ignored() {
        let mut data = header(2);
        let mut body = name_body("Padded");
        body.extend([0, 0]);
        block(&mut data, 0xC001, &body);
        block(&mut data, 0xC002, &[]);

        let decoded: Vec<Block> = Blocks::new(&data).unwrap().collect::<Result<_, _>>().unwrap();
        assert_eq!(decoded.len(), 2);
        assert_eq!(
            decoded[0],
            Block::GroupStart {
                name: "Padded".into()
            }
        );
    }

    #[test]
    fn test_unknown_block_rejected_by_default() {
        let mut data = header(2);
        block(&mut data, 0x0BAD, &[1, 2, 3, 4]);
        block(&mut data, 0xC002, &[]);

        let mut blocks = Blocks::new(&data).unwrap();
        assert_eq!(
            blocks.next(),
            Some(Err(AseError::UnknownBlockType {
                tag: 0x0BAD,
                offset: 12
            }))
        );
        // Fused after the first error
        assert_eq!(blocks.next(), None);
    }

    #[test]
    fn test_unknown_block_skipped() {
        let mut data = header(2);
        block(&mut data, 0x0BAD, &[1, 2, 3, 4]);
        block(&mut data, 0xC002, &[]);

        let decoded: Vec<Block> = Blocks::new(&data)
            .unwrap()
            .with_unknown_blocks(UnknownBlockPolicy::Skip)
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(
            decoded,
            vec![
                Block::Skipped {
                    tag: 0x0BAD,
                    length: 4
                },
                Block::GroupEnd
            ]
        );
    }

    #[test]
    fn test_block_longer_than_file() {
        let mut data = header(1);
        data.extend(0xC001u16.to_be_bytes());
        data.extend(100u32.to_be_bytes());
        data.extend(name_body("Cut"));

        let mut blocks = Blocks::new(&data).unwrap();
        assert!(matches!(
            blocks.next(),
            Some(Err(AseError::TruncatedInput { offset: 18, needed: 100, .. }))
        ));
        assert_eq!(blocks.next(), None);
    }

    #[test]
    fn test_fewer_blocks_than_declared() {
        let mut data = header(2);
        block(&mut data, 0xC002, &[]);

        let results: Vec<_> = Blocks::new(&data).unwrap().collect();
        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(AseError::TruncatedInput { .. })));
    }
}
