//! Public API types for swatch-core
//!
//! Color model and color type as they appear in swatch-exchange files.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Channel encoding of a color entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorModel {
    /// Cyan, magenta, yellow, black fractions (0.0 to 1.0)
    #[serde(rename = "CMYK")]
    Cmyk,
    /// Red, green, blue fractions (0.0 to 1.0)
    #[serde(rename = "RGB")]
    Rgb,
    /// CIELAB: L* 0 to 100, a*/b* roughly -128 to 127
    #[serde(rename = "LAB")]
    Lab,
    /// Single gray fraction (0.0 to 1.0)
    Gray,
}

impl ColorModel {
    /// Number of float channels stored for this model
    pub const fn arity(&self) -> usize {
        match self {
            Self::Cmyk => 4,
            Self::Rgb | Self::Lab => 3,
            Self::Gray => 1,
        }
    }

    /// Parse a 4-byte model tag; trailing spaces are not significant
    pub fn from_tag(tag: [u8; 4]) -> Option<Self> {
        let end = tag.iter().rposition(|&b| b != b' ').map_or(0, |i| i + 1);
        match &tag[..end] {
            b"CMYK" => Some(Self::Cmyk),
            b"RGB" => Some(Self::Rgb),
            b"LAB" => Some(Self::Lab),
            b"Gray" => Some(Self::Gray),
            _ => None,
        }
    }

    /// The 4-byte tag written to files (space padded)
    pub const fn tag(&self) -> [u8; 4] {
        match self {
            Self::Cmyk => *b"CMYK",
            Self::Rgb => *b"RGB ",
            Self::Lab => *b"LAB ",
            Self::Gray => *b"Gray",
        }
    }

    pub const ALL: [Self; 4] = [Self::Cmyk, Self::Rgb, Self::Lab, Self::Gray];
}

impl fmt::Display for ColorModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cmyk => write!(f, "CMYK"),
            Self::Rgb => write!(f, "RGB"),
            Self::Lab => write!(f, "LAB"),
            Self::Gray => write!(f, "Gray"),
        }
    }
}

/// Usage classification of a color entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ColorType {
    /// Global swatch (edits propagate to every use)
    #[default]
    Global,
    /// Spot (named ink)
    Spot,
    /// Process (mixed from process inks)
    Process,
}

impl ColorType {
    /// Map the 16-bit wire code
    pub const fn from_code(code: u16) -> Option<Self> {
        match code {
            0 => Some(Self::Global),
            1 => Some(Self::Spot),
            2 => Some(Self::Process),
            _ => None,
        }
    }

    pub const fn code(&self) -> u16 {
        match self {
            Self::Global => 0,
            Self::Spot => 1,
            Self::Process => 2,
        }
    }
}

impl fmt::Display for ColorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Global => write!(f, "Global"),
            Self::Spot => write!(f, "Spot"),
            Self::Process => write!(f, "Process"),
        }
    }
}
