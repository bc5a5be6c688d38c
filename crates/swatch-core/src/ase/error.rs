//! ASE Decode Error Types

use std::fmt;

use thiserror::Error;

/// Errors that can occur when decoding a swatch-exchange file
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AseError {
    /// Fewer bytes remain than the next field or block needs
    #[error("Truncated input at offset {offset}: needed {needed} bytes, {available} available")]
    TruncatedInput {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// A name is not valid big-endian UTF-16
    #[error("Invalid UTF-16 string at offset {offset}")]
    InvalidEncoding { offset: usize },

    /// File does not start with 'ASEF'
    #[error("Invalid file signature: {found:02X?} (expected 'ASEF')")]
    BadSignature { found: [u8; 4] },

    /// Block type tag is not group-start, group-end or color-entry
    #[error("Unknown block type 0x{tag:04X} at offset {offset}")]
    UnknownBlockType { tag: u16, offset: usize },

    /// Color model tag is not CMYK, RGB, LAB or Gray
    #[error("Unknown color model '{}'", String::from_utf8_lossy(.tag))]
    UnknownColorModel { tag: [u8; 4] },

    /// Color type code is not 0 (global), 1 (spot) or 2 (process)
    #[error("Unknown color type code {code}")]
    UnknownColorType { code: u16 },

    /// Color entry appeared outside every group and no fallback was given
    #[error("Color '{name}' is not inside any group")]
    UngroupedColorEntry { name: String },

    /// Group-start and group-end blocks do not pair up
    #[error("Unbalanced groups: {0}")]
    UnbalancedGroups(GroupImbalance),

    /// Bytes left over after the declared number of blocks
    #[error("{bytes} bytes of trailing data after last block")]
    TrailingData { bytes: usize },

    /// Channel count does not match the color model
    #[error("Color model {model} takes {expected} channel values, got {actual}")]
    ArityMismatch {
        model: crate::types::ColorModel,
        expected: usize,
        actual: usize,
    },
}

impl AseError {
    /// Whether the blocks decoded before this error are still usable
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::TrailingData { .. })
    }
}

/// How group-start and group-end blocks failed to pair up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupImbalance {
    /// Block stream ended with this many groups still open
    Unclosed(usize),
    /// Group-end with no open group
    UnmatchedEnd,
}

impl fmt::Display for GroupImbalance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unclosed(depth) => write!(f, "{} group(s) never closed", depth),
            Self::UnmatchedEnd => write!(f, "group end without matching group start"),
        }
    }
}
