//! Editor controller WASM bindings.
//!
//! Exposes [`ImageEditor`] as a JavaScript class. Every host event maps to a
//! method call; gesture methods return whether the frame changed so the host
//! knows when to redraw.
//!
//! Load tickets cross the boundary as plain numbers.
//!
//! # Example (TypeScript)
//!
//! ```typescript
//! const editor = new JsImageEditor({ zoom_anchor: 'center' });
//!
//! const maskTicket = editor.begin_mask_load();
//! fetch(maskUrl)
//!   .then((r) => r.arrayBuffer())
//!   .then((buf) => editor.mask_loaded(maskTicket, new Uint8Array(buf)))
//!   .catch((e) => editor.mask_failed(maskTicket, String(e)));
//!
//! const ticket = editor.set_image(img.naturalWidth, img.naturalHeight);
//! img.decode().then(() => {
//!   editor.image_loaded(ticket);
//!   draw(editor.render_plan());
//! });
//!
//! stage.on('wheel', (e) => {
//!   e.evt.preventDefault();
//!   if (editor.wheel(e.evt.deltaY)) draw(editor.render_plan());
//! });
//! ```

use maskframe_core::{
    EditorConfig, EditorError, ImageEditor, ImageTicket, MaskState, MaskTicket, Point, Size,
};
use wasm_bindgen::prelude::*;

use crate::types::JsRgbaImage;

/// Interactive image framing editor for JavaScript.
#[wasm_bindgen]
pub struct JsImageEditor {
    inner: ImageEditor,
}

#[wasm_bindgen]
impl JsImageEditor {
    /// Create an editor. `config` may be `undefined`, `null` or a partial
    /// config object; missing fields take their defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<JsImageEditor, JsValue> {
        let config: Option<EditorConfig> = if config.is_undefined() || config.is_null() {
            None
        } else {
            let parsed = serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Invalid editor config: {}", e)))?;
            Some(parsed)
        };
        editor_from_config(config)
            .map(|inner| JsImageEditor { inner })
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    // ------------------------------------------------------------------
    // Image lifecycle
    // ------------------------------------------------------------------

    /// Supply a new image by its natural size. Returns the load ticket.
    pub fn set_image(&mut self, width: u32, height: u32) -> Result<f64, JsValue> {
        let natural = Size::new(width, height).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(self.inner.set_image(natural).generation() as f64)
    }

    /// Fit the image once the host has loaded it.
    pub fn image_loaded(&mut self, ticket: f64) -> bool {
        self.inner
            .image_loaded(ImageTicket::from_generation(ticket as u64))
    }

    pub fn clear_image(&mut self) {
        self.inner.clear_image();
    }

    // ------------------------------------------------------------------
    // Mask lifecycle
    // ------------------------------------------------------------------

    /// Start a mask load. Returns the load ticket.
    pub fn begin_mask_load(&mut self) -> f64 {
        self.inner.begin_mask_load().generation() as f64
    }

    /// Accept encoded mask bytes (PNG or JPEG).
    ///
    /// # Errors
    /// Returns an error if the bytes cannot be decoded. The editor has already
    /// fallen back to running without a mask when this happens.
    pub fn mask_loaded(&mut self, ticket: f64, bytes: &[u8]) -> Result<bool, JsValue> {
        self.inner
            .mask_bytes_loaded(MaskTicket::from_generation(ticket as u64), bytes)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Accept an already-decoded RGBA mask bitmap.
    pub fn mask_loaded_rgba(&mut self, ticket: f64, bitmap: &JsRgbaImage) -> bool {
        self.inner
            .mask_loaded(MaskTicket::from_generation(ticket as u64), bitmap.as_image())
    }

    /// Report a failed mask load. The editor continues without an overlay.
    pub fn mask_failed(&mut self, ticket: f64, reason: &str) -> bool {
        self.inner
            .mask_failed(MaskTicket::from_generation(ticket as u64), reason)
    }

    /// Remove the mask overlay and return to the default container.
    pub fn clear_mask(&mut self) {
        self.inner.clear_mask();
    }

    /// Whether a mask overlay is currently present.
    #[wasm_bindgen(getter)]
    pub fn has_mask(&self) -> bool {
        matches!(self.inner.mask_state(), MaskState::Ready(_))
    }

    // ------------------------------------------------------------------
    // Gestures
    // ------------------------------------------------------------------

    pub fn zoom_in(&mut self) -> bool {
        self.inner.zoom_in()
    }

    pub fn zoom_out(&mut self) -> bool {
        self.inner.zoom_out()
    }

    /// Wheel gesture. Pass the pointer position (stage coordinates) to enable
    /// pointer-anchored zoom when it is configured.
    pub fn wheel(&mut self, delta_y: f64, pointer_x: Option<f64>, pointer_y: Option<f64>) -> bool {
        let pointer = match (pointer_x, pointer_y) {
            (Some(x), Some(y)) => Some(Point::new(x, y)),
            _ => None,
        };
        self.inner.wheel(delta_y, pointer)
    }

    pub fn rotate_left(&mut self) -> bool {
        self.inner.rotate_left()
    }

    pub fn rotate_right(&mut self) -> bool {
        self.inner.rotate_right()
    }

    pub fn drag_end(&mut self, x: f64, y: f64) -> bool {
        self.inner.drag_end(x, y)
    }

    // ------------------------------------------------------------------
    // Hover
    // ------------------------------------------------------------------

    /// Returns the CSS cursor to show.
    pub fn pointer_enter(&mut self) -> String {
        self.inner.pointer_enter().as_css().to_string()
    }

    /// Returns the CSS cursor to show.
    pub fn pointer_leave(&mut self) -> String {
        self.inner.pointer_leave().as_css().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn cursor(&self) -> String {
        self.inner.cursor().as_css().to_string()
    }

    /// Write the current cursor onto the stage container element.
    pub fn apply_cursor(&self, element: &web_sys::HtmlElement) -> Result<(), JsValue> {
        element
            .style()
            .set_property("cursor", self.inner.cursor().as_css())
    }

    // ------------------------------------------------------------------
    // Output
    // ------------------------------------------------------------------

    /// The scene to draw, as a plain object.
    pub fn render_plan(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.render_plan())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Rasterize the current frame with the mask overlay.
    ///
    /// Returns `undefined` until an image has loaded.
    pub fn render_preview(&self, source: &JsRgbaImage) -> Option<JsRgbaImage> {
        self.inner
            .render_preview(source.as_image())
            .map(JsRgbaImage::from_image)
    }

    // ------------------------------------------------------------------
    // State getters
    // ------------------------------------------------------------------

    #[wasm_bindgen(getter)]
    pub fn is_loaded(&self) -> bool {
        self.inner.is_loaded()
    }

    #[wasm_bindgen(getter)]
    pub fn zoom(&self) -> Option<f64> {
        self.inner.transform().map(|t| t.zoom)
    }

    #[wasm_bindgen(getter)]
    pub fn rotation(&self) -> Option<f64> {
        self.inner.transform().map(|t| t.rotation)
    }

    /// Rotation normalized into `[0, 360)`.
    #[wasm_bindgen(getter)]
    pub fn display_rotation(&self) -> Option<f64> {
        self.inner.transform().map(|t| t.display_rotation())
    }

    #[wasm_bindgen(getter)]
    pub fn left(&self) -> Option<i32> {
        self.inner.transform().map(|t| t.position.left)
    }

    #[wasm_bindgen(getter)]
    pub fn top(&self) -> Option<i32> {
        self.inner.transform().map(|t| t.position.top)
    }

    #[wasm_bindgen(getter)]
    pub fn image_width(&self) -> Option<u32> {
        self.inner.transform().map(|t| t.image_width())
    }

    #[wasm_bindgen(getter)]
    pub fn image_height(&self) -> Option<u32> {
        self.inner.transform().map(|t| t.image_height())
    }

    #[wasm_bindgen(getter)]
    pub fn min_zoom(&self) -> Option<f64> {
        self.inner.bounds().map(|b| b.min)
    }

    #[wasm_bindgen(getter)]
    pub fn max_zoom(&self) -> Option<f64> {
        self.inner.bounds().map(|b| b.max)
    }

    #[wasm_bindgen(getter)]
    pub fn zoom_step(&self) -> Option<f64> {
        self.inner.bounds().map(|b| b.step)
    }

    #[wasm_bindgen(getter)]
    pub fn container_width(&self) -> f64 {
        self.inner.container().width
    }

    #[wasm_bindgen(getter)]
    pub fn container_height(&self) -> f64 {
        self.inner.container().height
    }
}

/// Build the core editor from an optional parsed config.
fn editor_from_config(config: Option<EditorConfig>) -> Result<ImageEditor, EditorError> {
    ImageEditor::new(config.unwrap_or_default())
}
