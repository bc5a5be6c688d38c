//! Big-endian byte cursor
//!
//! All multi-byte values in a swatch-exchange file are big-endian. Strings
//! are UTF-16BE, prefixed by their length in code units (including the NUL
//! terminator).

use super::error::AseError;

/// Forward-only cursor over a byte buffer
#[derive(Debug, Clone)]
pub struct BinaryReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> BinaryReader<'a> {
    /// Create a reader positioned at the start of `data`
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current offset from the start of the buffer
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of unread bytes
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Read exactly `n` bytes
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], AseError> {
        let available = self.remaining();
        if n > available {
            return Err(AseError::TruncatedInput {
                offset: self.pos,
                needed: n,
                available,
            });
        }

        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    /// Read a fixed-size byte array
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], AseError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    pub fn read_u16(&mut self) -> Result<u16, AseError> {
        self.read_array().map(u16::from_be_bytes)
    }

    pub fn read_u32(&mut self) -> Result<u32, AseError> {
        self.read_array().map(u32::from_be_bytes)
    }

    /// Read an IEEE-754 single precision float (bit-exact)
    pub fn read_f32(&mut self) -> Result<f32, AseError> {
        self.read_array().map(f32::from_be_bytes)
    }

    /// Read `units` UTF-16BE code units and decode them
    ///
    /// A single trailing NUL terminator is stripped. Unpaired surrogates
    /// fail with [`AseError::InvalidEncoding`].
    pub fn read_utf16(&mut self, units: usize) -> Result<String, AseError> {
        let offset = self.pos;
        let byte_len = units.checked_mul(2).ok_or(AseError::TruncatedInput {
            offset,
            needed: usize::MAX,
            available: self.remaining(),
        })?;
        let bytes = self.read_bytes(byte_len)?;

        let code_units = bytes
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]));

        let mut text = char::decode_utf16(code_units)
            .collect::<Result<String, _>>()
            .map_err(|_| AseError::InvalidEncoding { offset })?;

        if text.ends_with('\0') {
            text.pop();
        }
        Ok(text)
    }

    /// Read a `u16` length prefix followed by that many UTF-16 code units
    pub fn read_name(&mut self) -> Result<String, AseError> {
        let units = self.read_u16()?;
        self.read_utf16(usize::from(units))
    }
}
