//! Declarative scene handed to the host renderer.
//!
//! The core never draws to a real canvas. It describes a stage with up to two
//! layers: the draggable image node and the non-interactive mask overlay.
//! The host maps these onto its scene graph. The node fields line up with a
//! Konva-style `Image` node.

use serde::Serialize;

use crate::geometry::Container;
use crate::mask::{BlendMode, LoadedMask};
use crate::transform::{node_offset, Transform};

/// The root stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageNode {
    pub width: f64,
    pub height: f64,
    /// Only set when a mask is present.
    pub background: Option<String>,
}

/// The user image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageNode {
    pub x: f64,
    pub y: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    pub width: u32,
    pub height: u32,
    /// Degrees, clockwise, as accumulated.
    pub rotation: f64,
    pub draggable: bool,
}

impl ImageNode {
    /// Place the image node for `transform` inside `container`.
    pub fn from_transform(transform: &Transform, container: Container) -> Self {
        // Offset is recomputed from the container on every build.
        let offset = node_offset(container);
        Self {
            x: transform.position.left as f64,
            y: transform.position.top as f64,
            offset_x: offset.x,
            offset_y: offset.y,
            width: transform.image_width(),
            height: transform.image_height(),
            rotation: transform.rotation,
            draggable: true,
        }
    }
}

/// The inverted mask overlay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaskNode {
    /// Identity of the mask bitmap, so hosts can reuse uploaded textures.
    pub mask_id: u64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub opacity: f32,
    pub blend: BlendMode,
    /// Always `false`: the overlay never intercepts pointer input.
    pub listening: bool,
}

impl MaskNode {
    pub fn from_mask(mask: &LoadedMask, opacity: f32) -> Self {
        let container = mask.container();
        Self {
            mask_id: mask.id().get(),
            x: 0.0,
            y: 0.0,
            width: container.width,
            height: container.height,
            opacity,
            blend: BlendMode::Normal,
            listening: false,
        }
    }
}

/// Everything the host needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderPlan {
    pub stage: StageNode,
    /// Absent until an image has loaded.
    pub image: Option<ImageNode>,
    /// Absent when the mask is missing or failed to load.
    pub mask: Option<MaskNode>,
}
