//! Color Entry Blocks
//!
//! Body layout of a color-entry block (type 0x0001):
//!
//! ```text
//! Size        Description
//! 2           Name length in UTF-16 code units (including NUL)
//! 2 * len     Name, UTF-16BE
//! 4           Color model tag: 'CMYK', 'RGB ', 'LAB ' or 'Gray'
//! 4 * arity   Channel values, f32 big-endian (4, 3, 3 or 1 of them)
//! 2           Color type: 0 global, 1 spot, 2 process
//! ```
//!
//! Channel values are passed through unchanged; range checks are the
//! caller's business.

use super::error::AseError;
use super::reader::BinaryReader;
use crate::types::{ColorModel, ColorType};

/// A decoded color-entry block
#[derive(Debug, Clone, PartialEq)]
pub struct ColorEntry {
    pub name: String,
    pub model: ColorModel,
    /// Exactly `model.arity()` values
    pub values: Vec<f32>,
    pub color_type: ColorType,
}

impl ColorEntry {
    /// Decode a color-entry block body
    pub fn parse(body: &[u8]) -> Result<Self, AseError> {
        let mut reader = BinaryReader::new(body);
        Self::read(&mut reader)
    }

    /// Decode a color entry from the reader's current position
    ///
    /// Bytes after the color type code are left unread.
    pub fn read(reader: &mut BinaryReader<'_>) -> Result<Self, AseError> {
        let name = reader.read_name()?;

        let tag = reader.read_array::<4>()?;
        let model = ColorModel::from_tag(tag).ok_or(AseError::UnknownColorModel { tag })?;

        // Arity comes from the tag, never from the file
        let values = (0..model.arity())
            .map(|_| reader.read_f32())
            .collect::<Result<Vec<_>, _>>()?;

        let code = reader.read_u16()?;
        let color_type = ColorType::from_code(code).ok_or(AseError::UnknownColorType { code })?;

        Ok(Self {
            name,
            model,
            values,
            color_type,
        })
    }
}
