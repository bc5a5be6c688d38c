//! ASE File Header
//!
//! The header is exactly 12 bytes:
//!
//! ```text
//! Offset  Size  Description
//! 0       4     Signature 'ASEF'
//! 4       2     Major version
//! 6       2     Minor version
//! 8       4     Number of blocks
//! ```

use std::fmt;

use super::error::AseError;
use super::reader::BinaryReader;

/// File signature - must be 'ASEF'
pub const SIGNATURE: [u8; 4] = *b"ASEF";

/// Size of the fixed header in bytes
pub const HEADER_SIZE: usize = 12;

/// Format version (major.minor)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AseVersion {
    pub major: u16,
    pub minor: u16,
}

impl AseVersion {
    pub const fn new(major: u16, minor: u16) -> Self {
        Self { major, minor }
    }
}

impl fmt::Display for AseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// ASE file header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AseHeader {
    /// Format version, recorded but not validated
    pub version: AseVersion,
    /// Number of blocks the file declares
    pub block_count: u32,
}

impl AseHeader {
    /// Parse the header from the start of the reader
    pub fn parse(reader: &mut BinaryReader<'_>) -> Result<Self, AseError> {
        let signature = reader.read_array::<4>()?;
        if signature != SIGNATURE {
            return Err(AseError::BadSignature { found: signature });
        }

        let major = reader.read_u16()?;
        let minor = reader.read_u16()?;
        let block_count = reader.read_u32()?;

        Ok(Self {
            version: AseVersion::new(major, minor),
            block_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_header() {
        let data = [b'A', b'S', b'E', b'F', 0, 1, 0, 0, 0, 0, 0, 3];
        let mut reader = BinaryReader::new(&data);
        let header = AseHeader::parse(&mut reader).unwrap();

        assert_eq!(header.version, AseVersion::new(1, 0));
        assert_eq!(header.version.to_string(), "1.0");
        assert_eq!(header.block_count, 3);
        assert_eq!(reader.position(), HEADER_SIZE);
    }

    #[test]
    fn test_bad_signature() {
        let data = [b'A', b'C', b'S', b'P', 0, 1, 0, 0, 0, 0, 0, 0];
        let mut reader = BinaryReader::new(&data);

        assert_eq!(
            AseHeader::parse(&mut reader).unwrap_err(),
            AseError::BadSignature { found: *b"ACSP" }
        );
    }

    #[test]
    fn test_header_too_small() {
        let data = [b'A', b'S', b'E', b'F', 0, 1];
        let mut reader = BinaryReader::new(&data);

        assert!(matches!(
            AseHeader::parse(&mut reader),
            Err(AseError::TruncatedInput { offset: 6, .. })
        ));
    }
}
