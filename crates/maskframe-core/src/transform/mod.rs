//! Image framing transform: zoom bounds, gestures and center-on-zoom projection.
//!
//! # Pipeline
//!
//! 1. An image is supplied: a fresh [`Transform`] is created (zoom 1, no rotation)
//! 2. The image loads: [`ZoomBounds::fit`] computes the range, zoom snaps to `min`
//! 3. Each gesture runs through [`apply_gesture`]
//! 4. Zoom changes are recentred with [`project_zoom`] so the point under the
//!    container centre stays put
//!
//! # Coordinate System
//!
//! - Zoom is a plain scale factor relative to the image's natural size
//! - Rotation is in degrees, positive = clockwise on screen, never wrapped
//! - Positions are integer container pixels of the node origin, which is
//!   offset by the container centre

mod bounds;
mod projection;
mod state;
mod viewport;

pub use bounds::{fit_scale, ZoomBounds};
pub use projection::{
    image_to_screen, node_offset, project_zoom, project_zoom_centered, screen_to_image,
};
pub use state::{
    apply_gesture, AxisScale, Gesture, GestureSettings, RotateDirection, Transform, ZoomDirection,
};
pub use viewport::render_viewport;
