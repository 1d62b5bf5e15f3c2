//! The image framing controller.
//!
//! [`ImageEditor`] owns every piece of mutable editor state: the framing
//! transform, its zoom bounds, the mask slot and the hover flag. Host events
//! arrive one at a time and each one updates the state in a single step.
//!
//! # Lifecycle
//!
//! ```text
//! set_image ──► (host decodes) ──► image_loaded ──► gestures...
//!     │                                  ▲
//!     └── clear_image / set_image ───────┘ stale tickets are ignored
//! ```
//!
//! The mask follows the same ticket discipline through
//! [`begin_mask_load`](ImageEditor::begin_mask_load).

use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::config::EditorConfig;
use crate::error::EditorError;
use crate::geometry::{Container, Point, Size};
use crate::mask::{composite_over, decode_mask, MaskSlot, MaskState, MaskTicket};
use crate::render::{ImageNode, MaskNode, RenderPlan, StageNode};
use crate::transform::{
    apply_gesture, render_viewport, Gesture, GestureSettings, RotateDirection, Transform,
    ZoomBounds, ZoomDirection,
};

/// Token handed out when an image is supplied, presented back once the host
/// has finished loading it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageTicket {
    generation: u64,
}

impl ImageTicket {
    pub fn generation(self) -> u64 {
        self.generation
    }

    /// Rebuild a ticket from a generation passed through a host boundary.
    pub fn from_generation(generation: u64) -> Self {
        Self { generation }
    }
}

/// Pointer cursor the host should show over the stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CursorStyle {
    #[default]
    Default,
    Move,
}

impl CursorStyle {
    /// CSS `cursor` value.
    pub fn as_css(self) -> &'static str {
        match self {
            CursorStyle::Default => "default",
            CursorStyle::Move => "move",
        }
    }
}

/// Framing of the current image.
#[derive(Debug, Clone)]
struct Framing {
    transform: Transform,
    /// Set once the image has loaded and been fitted.
    bounds: Option<ZoomBounds>,
    /// Container the bounds were computed for.
    fitted_for: Option<Container>,
}

/// Interactive image framing editor.
#[derive(Debug, Clone)]
pub struct ImageEditor {
    config: EditorConfig,
    settings: GestureSettings,
    mask: MaskSlot,
    image_generation: u64,
    framing: Option<Framing>,
    hovering: bool,
}

impl Default for ImageEditor {
    fn default() -> Self {
        let config = EditorConfig::default();
        Self {
            settings: GestureSettings::from(&config),
            mask: MaskSlot::new(config.mask_inversion),
            config,
            image_generation: 0,
            framing: None,
            hovering: false,
        }
    }
}

impl ImageEditor {
    /// Create an editor with a validated configuration.
    pub fn new(config: EditorConfig) -> Result<Self, EditorError> {
        config.validate()?;
        Ok(Self {
            settings: GestureSettings::from(&config),
            mask: MaskSlot::new(config.mask_inversion),
            config,
            ..Self::default()
        })
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Current framing container: the mask's size, or the configured default.
    pub fn container(&self) -> Container {
        self.mask.container_or(self.config.default_container)
    }

    // ------------------------------------------------------------------
    // Image lifecycle
    // ------------------------------------------------------------------

    /// Supply a new image. Any previous image and its pending load are
    /// discarded.
    pub fn set_image(&mut self, natural: Size) -> ImageTicket {
        self.image_generation += 1;
        self.hovering = false;
        self.framing = Some(Framing {
            transform: Transform::new(natural, self.container()),
            bounds: None,
            fitted_for: None,
        });
        log::debug!(
            "image {} supplied: {}x{}",
            self.image_generation,
            natural.width(),
            natural.height()
        );
        ImageTicket {
            generation: self.image_generation,
        }
    }

    /// Remove the image. Pending loads for it become stale.
    pub fn clear_image(&mut self) {
        self.image_generation += 1;
        self.framing = None;
        self.hovering = false;
    }

    /// The host finished loading the image for `ticket`: fit it to the
    /// container.
    ///
    /// Returns `false` for a stale ticket, or when the image is already fitted
    /// to the current container.
    pub fn image_loaded(&mut self, ticket: ImageTicket) -> bool {
        if ticket.generation != self.image_generation {
            log::debug!(
                "discarding stale image load {} (current {})",
                ticket.generation,
                self.image_generation
            );
            return false;
        }
        let container = self.container();
        let already_fitted = match &self.framing {
            Some(framing) => framing.fitted_for == Some(container),
            None => return false,
        };
        if already_fitted {
            return false;
        }
        self.fit(container);
        true
    }

    /// Whether an image is present and fitted.
    pub fn is_loaded(&self) -> bool {
        self.framing.as_ref().is_some_and(|f| f.bounds.is_some())
    }

    pub fn transform(&self) -> Option<&Transform> {
        self.framing.as_ref().map(|f| &f.transform)
    }

    pub fn bounds(&self) -> Option<ZoomBounds> {
        self.framing.as_ref().and_then(|f| f.bounds)
    }

    fn fit(&mut self, container: Container) {
        let Some(framing) = self.framing.as_mut() else {
            return;
        };
        let natural = framing.transform.natural;
        let bounds = ZoomBounds::fit(
            natural,
            container,
            self.config.max_zoom_factor,
            self.config.zoom_step_divisions,
        );
        framing.transform = Transform {
            zoom: bounds.min,
            rotation: framing.transform.rotation,
            ..Transform::new(natural, container)
        };
        framing.bounds = Some(bounds);
        framing.fitted_for = Some(container);
        log::debug!(
            "fitted {}x{} into {}x{}: zoom {:.4} (max {:.4}, step {:.4})",
            natural.width(),
            natural.height(),
            container.width,
            container.height,
            bounds.min,
            bounds.max,
            bounds.step
        );
    }

    /// Refit a loaded image whose container changed under it.
    fn refit_if_container_changed(&mut self) {
        let container = self.container();
        let stale = self
            .framing
            .as_ref()
            .is_some_and(|f| f.fitted_for.is_some_and(|c| c != container));
        if stale {
            self.fit(container);
        }
    }

    // ------------------------------------------------------------------
    // Mask lifecycle
    // ------------------------------------------------------------------

    /// Start loading a mask. The returned ticket must accompany the result.
    pub fn begin_mask_load(&mut self) -> MaskTicket {
        self.mask.begin_load()
    }

    /// Accept a decoded mask bitmap. Returns `false` for a stale ticket.
    pub fn mask_loaded(&mut self, ticket: MaskTicket, bitmap: &RgbaImage) -> bool {
        let accepted = self.mask.complete(ticket, bitmap);
        self.refit_if_container_changed();
        accepted
    }

    /// Decode mask bytes and accept them.
    ///
    /// A decode failure degrades the editor to no mask, exactly like
    /// [`mask_failed`](Self::mask_failed), and is returned for reporting.
    pub fn mask_bytes_loaded(
        &mut self,
        ticket: MaskTicket,
        bytes: &[u8],
    ) -> Result<bool, EditorError> {
        if !self.mask.is_current(ticket) {
            log::debug!("discarding stale mask bytes {}", ticket.generation());
            return Ok(false);
        }
        match decode_mask(bytes) {
            Ok(bitmap) => Ok(self.mask_loaded(ticket, &bitmap)),
            Err(e) => {
                self.mask_failed(ticket, &e.to_string());
                Err(e)
            }
        }
    }

    /// The mask load for `ticket` failed. Returns `false` for a stale ticket.
    pub fn mask_failed(&mut self, ticket: MaskTicket, reason: &str) -> bool {
        let applied = self.mask.fail(ticket, reason);
        self.refit_if_container_changed();
        applied
    }

    /// Remove the mask overlay. Any load in flight becomes stale and a
    /// loaded image is refit to the default container.
    pub fn clear_mask(&mut self) {
        self.mask.clear();
        self.refit_if_container_changed();
    }

    pub fn mask_state(&self) -> &MaskState {
        self.mask.state()
    }

    // ------------------------------------------------------------------
    // Gestures
    // ------------------------------------------------------------------

    /// Apply a gesture. Returns whether the transform changed.
    ///
    /// A no-op when no image is loaded.
    pub fn apply(&mut self, gesture: Gesture) -> bool {
        let container = self.container();
        let Some(framing) = self.framing.as_mut() else {
            log::trace!("{gesture:?} ignored: no image");
            return false;
        };
        let Some(bounds) = framing.bounds else {
            log::trace!("{gesture:?} ignored: image not loaded");
            return false;
        };

        let next = apply_gesture(&framing.transform, &bounds, container, gesture, &self.settings);
        if next == framing.transform {
            return false;
        }
        log::debug!(
            "{:?}: zoom {:.4} rotation {} at ({}, {})",
            gesture,
            next.zoom,
            next.rotation,
            next.position.left,
            next.position.top
        );
        framing.transform = next;
        true
    }

    pub fn zoom_in(&mut self) -> bool {
        self.apply(Gesture::Zoom {
            direction: ZoomDirection::In,
        })
    }

    pub fn zoom_out(&mut self) -> bool {
        self.apply(Gesture::Zoom {
            direction: ZoomDirection::Out,
        })
    }

    /// Wheel gesture. `pointer` is only used when pointer anchoring is
    /// configured.
    pub fn wheel(&mut self, delta_y: f64, pointer: Option<Point>) -> bool {
        self.apply(Gesture::Wheel { delta_y, pointer })
    }

    pub fn rotate_left(&mut self) -> bool {
        self.apply(Gesture::Rotate {
            direction: RotateDirection::Left,
        })
    }

    pub fn rotate_right(&mut self) -> bool {
        self.apply(Gesture::Rotate {
            direction: RotateDirection::Right,
        })
    }

    pub fn drag_end(&mut self, x: f64, y: f64) -> bool {
        self.apply(Gesture::DragEnd { x, y })
    }

    // ------------------------------------------------------------------
    // Hover
    // ------------------------------------------------------------------

    /// The pointer entered the image node. Ignored until an image has loaded,
    /// since there is no node to enter.
    pub fn pointer_enter(&mut self) -> CursorStyle {
        self.hovering = self.is_loaded();
        self.cursor()
    }

    pub fn pointer_leave(&mut self) -> CursorStyle {
        self.hovering = false;
        self.cursor()
    }

    /// `Move` while hovering a loaded image, `Default` otherwise.
    pub fn cursor(&self) -> CursorStyle {
        if self.hovering && self.is_loaded() {
            CursorStyle::Move
        } else {
            CursorStyle::Default
        }
    }

    // ------------------------------------------------------------------
    // Output
    // ------------------------------------------------------------------

    /// Describe the current frame for the host renderer.
    pub fn render_plan(&self) -> RenderPlan {
        let container = self.container();
        let mask = self.mask.mask();

        let image = self
            .framing
            .as_ref()
            .filter(|f| f.bounds.is_some())
            .map(|f| ImageNode::from_transform(&f.transform, container));

        RenderPlan {
            stage: StageNode {
                width: container.width,
                height: container.height,
                background: mask.map(|_| self.config.background.clone()),
            },
            image,
            mask: mask.map(|m| MaskNode::from_mask(m, self.config.mask_opacity)),
        }
    }

    /// Rasterize the current frame: image layer, then the mask overlay.
    ///
    /// `source` is the image bitmap. It may be smaller than the natural size.
    /// Returns `None` until an image has loaded.
    pub fn render_preview(&self, source: &RgbaImage) -> Option<RgbaImage> {
        let framing = self.framing.as_ref().filter(|f| f.bounds.is_some())?;
        let mut canvas = render_viewport(source, &framing.transform, self.container());
        if let Some(mask) = self.mask.mask() {
            composite_over(&mut canvas, mask.inverted(), self.config.mask_opacity);
        }
        Some(canvas)
    }
}
