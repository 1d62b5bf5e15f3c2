//! Mask WASM bindings.
//!
//! Standalone helpers for hosts that want to prepare the overlay themselves
//! instead of routing the mask through [`JsImageEditor`](crate::JsImageEditor).

use maskframe_core::mask::{self, MaskInversion};
use wasm_bindgen::prelude::*;

use crate::types::JsRgbaImage;

/// Decode mask bytes (PNG or JPEG) into an RGBA bitmap.
///
/// # Errors
/// Returns an error if the bytes are not a decodable image.
#[wasm_bindgen]
pub fn decode_mask(bytes: &[u8]) -> Result<JsRgbaImage, JsValue> {
    mask::decode_mask(bytes)
        .map(JsRgbaImage::from_image)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Produce the inverted overlay for a mask bitmap.
///
/// # Arguments
/// * `image` - Mask bitmap
/// * `mode` - 0 = alpha, 1 = colour, 2 = alpha and colour
#[wasm_bindgen]
pub fn invert_mask(image: &JsRgbaImage, mode: u8) -> JsRgbaImage {
    JsRgbaImage::from_image(mask::invert_mask(image.as_image(), inversion_from_u8(mode)))
}

/// Composite `overlay` onto a copy of `base` at the origin with source-over
/// blending.
#[wasm_bindgen]
pub fn composite_mask(base: &JsRgbaImage, overlay: &JsRgbaImage, opacity: f32) -> JsRgbaImage {
    let mut canvas = base.as_image().clone();
    mask::composite_over(&mut canvas, overlay.as_image(), opacity);
    JsRgbaImage::from_image(canvas)
}

/// Convert a u8 inversion mode value to the core enum.
///
/// Any unknown value defaults to alpha inversion.
fn inversion_from_u8(value: u8) -> MaskInversion {
    match value {
        1 => MaskInversion::Color,
        2 => MaskInversion::AlphaAndColor,
        _ => MaskInversion::Alpha,
    }
}
