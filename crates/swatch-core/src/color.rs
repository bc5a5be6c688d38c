//! 8-bit previews of decoded colors
//!
//! Only models whose channels are already display fractions get a preview.
//! CMYK and LAB would need a color-managed conversion and return `None`.

use palette::Srgb;

use crate::collection::ColorRecord;
use crate::types::ColorModel;

impl ColorRecord {
    /// 8-bit RGB for RGB and Gray records (rounded, clamped to 0-255)
    pub fn to_rgb8(&self) -> Option<[u8; 3]> {
        let rgb = match (self.model(), self.values()) {
            (ColorModel::Rgb, &[r, g, b]) => Srgb::new(r, g, b),
            (ColorModel::Gray, &[v]) => Srgb::new(v, v, v),
            _ => return None,
        };

        let rgb8: Srgb<u8> = rgb.into_format();
        Some([rgb8.red, rgb8.green, rgb8.blue])
    }

    /// `#rrggbb` hex string for RGB and Gray records
    pub fn hex(&self) -> Option<String> {
        self.to_rgb8()
            .map(|[r, g, b]| format!("#{:02x}{:02x}{:02x}", r, g, b))
    }
}
