//! Maskframe WASM - WebAssembly bindings for Maskframe
//!
//! This crate exposes the maskframe-core editor controller and mask helpers
//! to JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `editor` - The `JsImageEditor` class (gestures, loads, render plan)
//! - `mask` - Mask decoding, inversion and compositing helpers
//! - `types` - WASM-compatible wrapper types for RGBA bitmaps
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsImageEditor } from '@maskframe/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const editor = new JsImageEditor();
//! const ticket = editor.set_image(1000, 500);
//! editor.image_loaded(ticket);
//! console.log(`Zoom ${editor.zoom} in [${editor.min_zoom}, ${editor.max_zoom}]`);
//! ```

use wasm_bindgen::prelude::*;

mod editor;
mod mask;
mod types;

// Re-export public types
pub use editor::JsImageEditor;
pub use mask::{composite_mask, decode_mask, invert_mask};
pub use types::JsRgbaImage;

/// Initialize the WASM module (called automatically on load)
///
/// Routes `log` output to the browser console and installs a panic hook so
/// panics show a readable message.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    // A second init (hot reload) finds the logger already set
    if console_log::init_with_level(log::Level::Info).is_err() {
        log::debug!("console logger already installed");
    }
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
