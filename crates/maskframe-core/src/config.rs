//! Editor configuration.
//!
//! Every field has a default, so a host can pass a partial JSON object (or
//! nothing at all) and override only what it needs.

use serde::{Deserialize, Serialize};

use crate::error::EditorError;
use crate::geometry::{Container, DEFAULT_CONTAINER};
use crate::mask::MaskInversion;

/// Which screen point stays fixed while zooming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoomAnchor {
    /// Keep the point under the container centre fixed.
    #[default]
    Center,
    /// Keep the point under the pointer fixed for wheel gestures that report
    /// a pointer position. Button zoom still anchors on the centre.
    Pointer,
}

/// Tunables for the editor controller and its mask overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Viewport used when no mask has loaded.
    pub default_container: Container,
    /// Degrees added or removed per rotate gesture.
    pub rotation_step: f64,
    /// Maximum zoom as a multiple of the fit scale.
    pub max_zoom_factor: f64,
    /// Number of zoom steps between the fit scale and twice the fit scale.
    pub zoom_step_divisions: f64,
    /// Opacity of the inverted mask overlay (0.0 to 1.0).
    pub mask_opacity: f32,
    /// How the mask bitmap is inverted before compositing.
    pub mask_inversion: MaskInversion,
    /// Stage background colour shown behind the image when a mask is present.
    pub background: String,
    pub zoom_anchor: ZoomAnchor,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_container: DEFAULT_CONTAINER,
            rotation_step: 10.0,
            max_zoom_factor: 2.0,
            zoom_step_divisions: 10.0,
            mask_opacity: 0.7,
            mask_inversion: MaskInversion::default(),
            background: "#403B39".to_string(),
            zoom_anchor: ZoomAnchor::default(),
        }
    }
}

impl EditorConfig {
    /// Parse a configuration from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self, EditorError> {
        let config: EditorConfig =
            serde_json::from_str(json).map_err(|e| EditorError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the numeric fields describe a usable editor.
    pub fn validate(&self) -> Result<(), EditorError> {
        Container::new(self.default_container.width, self.default_container.height)
            .map_err(|e| EditorError::Config(format!("default_container: {e}")))?;

        if !(self.rotation_step.is_finite() && self.rotation_step > 0.0) {
            return Err(EditorError::Config(format!(
                "rotation_step must be positive, got {}",
                self.rotation_step
            )));
        }
        if !(self.max_zoom_factor.is_finite() && self.max_zoom_factor >= 1.0) {
            return Err(EditorError::Config(format!(
                "max_zoom_factor must be at least 1, got {}",
                self.max_zoom_factor
            )));
        }
        if !(self.zoom_step_divisions.is_finite() && self.zoom_step_divisions > 0.0) {
            return Err(EditorError::Config(format!(
                "zoom_step_divisions must be positive, got {}",
                self.zoom_step_divisions
            )));
        }
        if !(0.0..=1.0).contains(&self.mask_opacity) {
            return Err(EditorError::Config(format!(
                "mask_opacity must be within 0..=1, got {}",
                self.mask_opacity
            )));
        }
        Ok(())
    }
}
