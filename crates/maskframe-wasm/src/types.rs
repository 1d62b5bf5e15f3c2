//! WASM-compatible wrapper types for bitmap data.
//!
//! This module provides JavaScript-friendly types that wrap the `image` crate's
//! RGBA buffers, handling the conversion between Rust and JavaScript data
//! representations.

use image::RgbaImage;
use maskframe_core::mask::rgba_from_raw;
use wasm_bindgen::prelude::*;

/// An RGBA bitmap wrapper for JavaScript.
///
/// Pixel layout matches canvas `ImageData`: 4 bytes per pixel, row-major,
/// straight (non-premultiplied) alpha.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a copy is made
/// to JavaScript memory. The `free()` method can be called to explicitly release
/// WASM memory, but this is optional as wasm-bindgen's finalizer will handle cleanup
/// automatically.
#[wasm_bindgen]
pub struct JsRgbaImage {
    inner: RgbaImage,
}

#[wasm_bindgen]
impl JsRgbaImage {
    /// Create a new JsRgbaImage from dimensions and pixel data.
    ///
    /// # Errors
    /// Returns an error if `pixels.length != width * height * 4`.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<JsRgbaImage, JsValue> {
        rgba_from_raw(width, height, pixels)
            .map(|inner| JsRgbaImage { inner })
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    /// Get the number of bytes in the pixel buffer (width * height * 4)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.as_raw().len()
    }

    /// Returns RGBA pixel data as Uint8Array.
    ///
    /// Note: This creates a copy of the pixel data.
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.as_raw().clone()
    }

    /// Returns RGBA pixel data as a `Uint8ClampedArray`, ready for
    /// `new ImageData(array, width, height)`.
    pub fn to_clamped_array(&self) -> js_sys::Uint8ClampedArray {
        js_sys::Uint8ClampedArray::from(self.inner.as_raw().as_slice())
    }

    /// Explicitly free WASM memory.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsRgbaImage {
    pub(crate) fn from_image(inner: RgbaImage) -> Self {
        Self { inner }
    }

    pub(crate) fn as_image(&self) -> &RgbaImage {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_rgba_image_creation() {
        let img = JsRgbaImage::from_image(RgbaImage::new(100, 50));
        assert_eq!(img.width(), 100);
        assert_eq!(img.height(), 50);
        assert_eq!(img.byte_length(), 20000);
    }

    #[test]
    fn test_js_rgba_image_pixels() {
        let pixels = vec![255u8, 128, 64, 255, 32, 16, 8, 0]; // 2 RGBA pixels
        let img = JsRgbaImage::from_image(RgbaImage::from_raw(2, 1, pixels.clone()).unwrap());
        assert_eq!(img.pixels(), pixels);
        assert_eq!(img.as_image().get_pixel(1, 0).0, [32, 16, 8, 0]);
    }
}
