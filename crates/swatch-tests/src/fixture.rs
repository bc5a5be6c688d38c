//! Swatch-exchange fixture encoder
//!
//! Writes ASE files block by block. Besides well-formed files it can produce
//! the malformed shapes the decoder must reject: wrong signature, wrong
//! block count, unknown block types, trailing bytes.

use swatch_core::{ColorModel, ColorRecord, ColorType};

pub const GROUP_START: u16 = 0xC001;
pub const GROUP_END: u16 = 0xC002;
pub const COLOR_ENTRY: u16 = 0x0001;

/// Builder for ASE file bytes
#[derive(Debug, Clone)]
pub struct AseBuilder {
    signature: [u8; 4],
    version: (u16, u16),
    declared_blocks: Option<u32>,
    blocks: Vec<(u16, Vec<u8>)>,
    trailing: Vec<u8>,
}

impl Default for AseBuilder {
    fn default() -> Self {
        Self {
            signature: *b"ASEF",
            version: (1, 0),
            declared_blocks: None,
            blocks: Vec::new(),
            trailing: Vec::new(),
        }
    }
}

impl AseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signature(mut self, signature: [u8; 4]) -> Self {
        self.signature = signature;
        self
    }

    pub fn version(mut self, major: u16, minor: u16) -> Self {
        self.version = (major, minor);
        self
    }

    /// Override the block count written in the header
    pub fn declare_blocks(mut self, count: u32) -> Self {
        self.declared_blocks = Some(count);
        self
    }

    pub fn group_start(self, name: &str) -> Self {
        self.raw_block(GROUP_START, name_field(name))
    }

    pub fn group_end(self) -> Self {
        self.raw_block(GROUP_END, Vec::new())
    }

    pub fn color(self, name: &str, model: ColorModel, values: &[f32], color_type: ColorType) -> Self {
        self.raw_block(COLOR_ENTRY, color_body(name, &model.tag(), values, color_type.code()))
    }

    pub fn record(self, record: &ColorRecord) -> Self {
        self.color(record.name(), record.model(), record.values(), record.color_type())
    }

    /// Append a block with an arbitrary type and body
    pub fn raw_block(mut self, tag: u16, body: Vec<u8>) -> Self {
        self.blocks.push((tag, body));
        self
    }

    /// Bytes written after the last block
    pub fn trailing(mut self, bytes: &[u8]) -> Self {
        self.trailing.extend_from_slice(bytes);
        self
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn build(&self) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&self.signature);
        out.extend(self.version.0.to_be_bytes());
        out.extend(self.version.1.to_be_bytes());
        let count = self.declared_blocks.unwrap_or(self.blocks.len() as u32);
        out.extend(count.to_be_bytes());

        for (tag, body) in &self.blocks {
            out.extend(tag.to_be_bytes());
            out.extend((body.len() as u32).to_be_bytes());
            out.extend_from_slice(body);
        }

        out.extend_from_slice(&self.trailing);
        out
    }
}

/// `u16` length (code units including NUL) followed by UTF-16BE text and NUL
pub fn name_field(name: &str) -> Vec<u8> {
    let units: Vec<u16> = name.encode_utf16().chain(std::iter::once(0)).collect();
    let mut out = (units.len() as u16).to_be_bytes().to_vec();
    out.extend(units.iter().flat_map(|u| u.to_be_bytes()));
    out
}

/// Color-entry body with an arbitrary model tag and type code
pub fn color_body(name: &str, tag: &[u8; 4], values: &[f32], code: u16) -> Vec<u8> {
    let mut body = name_field(name);
    body.extend_from_slice(tag);
    body.extend(values.iter().flat_map(|v| v.to_be_bytes()));
    body.extend(code.to_be_bytes());
    body
}

/// Encode records as one file, one group per distinct `collection()` run
pub fn encode_records(records: &[ColorRecord]) -> Vec<u8> {
    let mut builder = AseBuilder::new();
    let mut open: Option<&str> = None;

    for record in records {
        if open != Some(record.collection()) {
            if open.is_some() {
                builder = builder.group_end();
            }
            builder = builder.group_start(record.collection());
            open = Some(record.collection());
        }
        builder = builder.record(record);
    }
    if open.is_some() {
        builder = builder.group_end();
    }

    builder.build()
}

/// The three-block "Reds" example file
pub fn fire_red() -> Vec<u8> {
    AseBuilder::new()
        .group_start("Reds")
        .color("Fire Red", ColorModel::Rgb, &[0.8, 0.1, 0.05], ColorType::Spot)
        .group_end()
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_field_layout() {
        assert_eq!(name_field("Ab"), vec![0, 3, 0, b'A', 0, b'b', 0, 0]);
    }

    #[test]
    fn test_fire_red_layout() {
        let data = fire_red();
        assert_eq!(&data[0..4], b"ASEF");
        assert_eq!(&data[4..8], &[0, 1, 0, 0]);
        assert_eq!(&data[8..12], &[0, 0, 0, 3]);
        assert_eq!(&data[12..14], &[0xC0, 0x01]);
    }

    #[test]
    fn test_encode_records_groups_runs() {
        let records = vec![
            ColorRecord::new("A", "1", ColorModel::Gray, vec![0.1], ColorType::Global).unwrap(),
            ColorRecord::new("A", "2", ColorModel::Gray, vec![0.2], ColorType::Global).unwrap(),
            ColorRecord::new("B", "3", ColorModel::Gray, vec![0.3], ColorType::Global).unwrap(),
        ];
        let data = encode_records(&records);

        // start A, 2 colors, end, start B, 1 color, end
        assert_eq!(u32::from_be_bytes([data[8], data[9], data[10], data[11]]), 7);
    }
}
