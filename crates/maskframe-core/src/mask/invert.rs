//! One-time mask inversion.
//!
//! The mask asset marks the visible region. The overlay needs the opposite
//! so that the area outside the frame is dimmed.

use image::RgbaImage;
use serde::{Deserialize, Serialize};

/// Which channels of the mask are inverted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaskInversion {
    /// `a' = 255 − a`, colour untouched.
    #[default]
    Alpha,
    /// `c' = 255 − c` for RGB, alpha untouched.
    Color,
    /// Invert every channel.
    AlphaAndColor,
}

/// Produce an inverted copy of `mask`.
pub fn invert_mask(mask: &RgbaImage, mode: MaskInversion) -> RgbaImage {
    let mut out = mask.clone();
    for pixel in out.pixels_mut() {
        let [r, g, b, a] = pixel.0;
        pixel.0 = match mode {
            MaskInversion::Alpha => [r, g, b, 255 - a],
            MaskInversion::Color => [255 - r, 255 - g, 255 - b, a],
            MaskInversion::AlphaAndColor => [255 - r, 255 - g, 255 - b, 255 - a],
        };
    }
    out
}
