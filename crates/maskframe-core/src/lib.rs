//! Maskframe Core - image framing editor library
//!
//! This crate provides the state and geometry behind an interactive framing
//! widget: fit-to-container zoom bounds, a pure gesture reducer (zoom, wheel,
//! rotate, drag), center-on-zoom projection, and the inverted mask overlay.
//! Rendering is left to the host, which receives a [`RenderPlan`].

pub mod config;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod mask;
pub mod render;
pub mod transform;

pub use config::{EditorConfig, ZoomAnchor};
pub use editor::{CursorStyle, ImageEditor, ImageTicket};
pub use error::EditorError;
pub use geometry::{Container, Point, Position, Size, DEFAULT_CONTAINER};
pub use mask::{MaskInversion, MaskState, MaskTicket};
pub use render::{ImageNode, MaskNode, RenderPlan, StageNode};
pub use transform::{apply_gesture, Gesture, RotateDirection, Transform, ZoomBounds, ZoomDirection};
