//! Transform state and the gesture reducer.
//!
//! [`Transform`] is the single source of truth for how the image is framed.
//! [`apply_gesture`] is a pure `(state, gesture) → state` function. A gesture
//! that cannot apply returns the state unchanged.

use serde::{Deserialize, Serialize};

use super::bounds::ZoomBounds;
use super::projection::{node_offset, project_zoom, project_zoom_centered};
use crate::config::{EditorConfig, ZoomAnchor};
use crate::geometry::{Container, Point, Position, Size};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoomDirection {
    In,
    Out,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotateDirection {
    Left,
    Right,
}

/// A discrete user gesture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Gesture {
    /// Zoom button press.
    Zoom { direction: ZoomDirection },
    /// Mouse wheel. Negative `delta_y` (wheel up) zooms in.
    Wheel {
        delta_y: f64,
        #[serde(default)]
        pointer: Option<Point>,
    },
    /// Rotate button press.
    Rotate { direction: RotateDirection },
    /// End of a drag, carrying the node's final position.
    DragEnd { x: f64, y: f64 },
}

/// Per-gesture tunables, taken from [`EditorConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSettings {
    pub rotation_step: f64,
    pub zoom_anchor: ZoomAnchor,
}

impl Default for GestureSettings {
    fn default() -> Self {
        Self::from(&EditorConfig::default())
    }
}

impl From<&EditorConfig> for GestureSettings {
    fn from(config: &EditorConfig) -> Self {
        Self {
            rotation_step: config.rotation_step,
            zoom_anchor: config.zoom_anchor,
        }
    }
}

/// How an image is framed inside its container.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Natural size of the framed image.
    pub natural: Size,
    pub zoom: f64,
    /// Accumulated rotation in degrees. Not normalized.
    pub rotation: f64,
    pub position: Position,
}

impl Transform {
    /// Fresh transform for a newly supplied image: zoom 1, no rotation, node
    /// placed at the container centre so the image's top-left corner sits on
    /// the container origin.
    ///
    /// `Position` is whole pixels while the node offset is not, so an odd
    /// container side rounds the centre half away from zero. The default
    /// 544×543 container places the corner at (0, 0.5).
    pub fn new(natural: Size, container: Container) -> Self {
        Self {
            natural,
            zoom: 1.0,
            rotation: 0.0,
            position: Position::from_point(node_offset(container)),
        }
    }

    /// Rendered width in pixels, `round(natural_width × zoom)`.
    pub fn image_width(&self) -> u32 {
        self.natural.scaled(self.zoom).0
    }

    /// Rendered height in pixels, `round(natural_height × zoom)`.
    pub fn image_height(&self) -> u32 {
        self.natural.scaled(self.zoom).1
    }

    /// Rotation normalized into `[0, 360)` for display.
    pub fn display_rotation(&self) -> f64 {
        let r = self.rotation.rem_euclid(360.0);
        // rem_euclid can return 360.0 for tiny negative inputs
        if r >= 360.0 {
            0.0
        } else {
            r
        }
    }

    /// Per-axis scale factors of the rendered image.
    pub fn axis_scale(&self) -> AxisScale {
        AxisScale {
            x: self.zoom,
            y: self.zoom,
        }
    }
}

/// Horizontal and vertical scale of the rendered image relative to its
/// natural size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisScale {
    pub x: f64,
    pub y: f64,
}

impl AxisScale {
    /// Shift both axes by `delta`.
    pub fn offset(self, delta: f64) -> Self {
        Self {
            x: self.x + delta,
            y: self.y + delta,
        }
    }

    /// The ratio that governs zoom: the x ratio when strictly larger,
    /// otherwise the y ratio.
    pub fn authoritative(self) -> f64 {
        if self.x > self.y {
            self.x
        } else {
            self.y
        }
    }
}

/// Apply a gesture to a transform.
///
/// Zoom gestures are rejected when the candidate ratio falls outside
/// `bounds`. Accepted zooms are recentred on the container centre (or the
/// pointer, when configured). Drag ends are never clamped.
pub fn apply_gesture(
    transform: &Transform,
    bounds: &ZoomBounds,
    container: Container,
    gesture: Gesture,
    settings: &GestureSettings,
) -> Transform {
    match gesture {
        Gesture::Zoom { direction } => zoom_step(transform, bounds, container, direction, None),
        Gesture::Wheel { delta_y, pointer } => {
            let direction = if delta_y < 0.0 {
                ZoomDirection::In
            } else {
                ZoomDirection::Out
            };
            let anchor = match settings.zoom_anchor {
                ZoomAnchor::Pointer => pointer,
                ZoomAnchor::Center => None,
            };
            zoom_step(transform, bounds, container, direction, anchor)
        }
        Gesture::Rotate { direction } => {
            let delta = match direction {
                RotateDirection::Left => -settings.rotation_step,
                RotateDirection::Right => settings.rotation_step,
            };
            Transform {
                rotation: transform.rotation + delta,
                ..*transform
            }
        }
        Gesture::DragEnd { x, y } => {
            if !(x.is_finite() && y.is_finite()) {
                return *transform;
            }
            Transform {
                position: Position::from_point(Point::new(x, y)),
                ..*transform
            }
        }
    }
}

fn zoom_step(
    transform: &Transform,
    bounds: &ZoomBounds,
    container: Container,
    direction: ZoomDirection,
    anchor: Option<Point>,
) -> Transform {
    let delta = match direction {
        ZoomDirection::In => bounds.step,
        ZoomDirection::Out => -bounds.step,
    };
    let ratio = transform.axis_scale().offset(delta).authoritative();

    if !bounds.admits(ratio) {
        log::trace!(
            "zoom {:?} rejected: {:.4} outside [{:.4}, {:.4}]",
            direction,
            ratio,
            bounds.min,
            bounds.max
        );
        return *transform;
    }

    let new_zoom = bounds.clamp(ratio);
    let current = transform.position.to_point();
    let position = match anchor {
        Some(anchor) => project_zoom(
            anchor,
            current,
            node_offset(container),
            transform.rotation,
            transform.zoom,
            new_zoom,
        ),
        None => project_zoom_centered(
            container,
            current,
            transform.rotation,
            transform.zoom,
            new_zoom,
        ),
    };

    Transform {
        zoom: new_zoom,
        position: Position::from_point(position),
        ..*transform
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    const ZOOM_IN: Gesture = Gesture::Zoom {
        direction: ZoomDirection::In,
    };
    const ZOOM_OUT: Gesture = Gesture::Zoom {
        direction: ZoomDirection::Out,
    };
    const ROTATE_LEFT: Gesture = Gesture::Rotate {
        direction: RotateDirection::Left,
    };
    const ROTATE_RIGHT: Gesture = Gesture::Rotate {
        direction: RotateDirection::Right,
    };

    fn dimensions_strategy() -> impl Strategy<Value = (u32, u32)> {
        (16u32..=4000, 16u32..=4000)
    }

    fn gesture_strategy() -> impl Strategy<Value = Gesture> {
        prop_oneof![
            Just(ZOOM_IN),
            Just(ZOOM_OUT),
            (-500.0f64..500.0).prop_map(|delta_y| Gesture::Wheel {
                delta_y,
                pointer: None
            }),
            Just(ROTATE_LEFT),
            Just(ROTATE_RIGHT),
            (-5000.0f64..5000.0, -5000.0f64..5000.0)
                .prop_map(|(x, y)| Gesture::DragEnd { x, y }),
        ]
    }

    fn fitted(width: u32, height: u32) -> (Transform, ZoomBounds, Container) {
        let container = Container::default();
        let natural = Size::new(width, height).unwrap();
        let bounds = ZoomBounds::fit(natural, container, 2.0, 10.0);
        let transform = Transform {
            zoom: bounds.min,
            ..Transform::new(natural, container)
        };
        (transform, bounds, container)
    }

    proptest! {
        /// Property: Zoom never leaves its bounds, whatever the gesture sequence.
        #[test]
        fn prop_zoom_stays_in_bounds(
            (width, height) in dimensions_strategy(),
            gestures in prop::collection::vec(gesture_strategy(), 0..60),
        ) {
            let (mut t, b, c) = fitted(width, height);
            let settings = GestureSettings::default();
            for g in gestures {
                t = apply_gesture(&t, &b, c, g, &settings);
                prop_assert!(
                    t.zoom >= b.min && t.zoom <= b.max,
                    "zoom {} outside bounds",
                    t.zoom
                );
            }
        }

        /// Property: Zoom in then out restores the position within rounding.
        #[test]
        fn prop_zoom_in_out_restores_position(
            (width, height) in dimensions_strategy(),
            rotation in -720.0f64..720.0,
            (left, top) in (-1000i32..1000, -1000i32..1000),
        ) {
            let (mut t, b, c) = fitted(width, height);
            t.rotation = rotation;
            t.position = Position::new(left, top);
            let settings = GestureSettings::default();

            let up = apply_gesture(&t, &b, c, ZOOM_IN, &settings);
            let back = apply_gesture(&up, &b, c, ZOOM_OUT, &settings);

            prop_assert!((back.zoom - t.zoom).abs() < 1e-9);
            prop_assert!((back.position.left - t.position.left).abs() <= 2);
            prop_assert!((back.position.top - t.position.top).abs() <= 2);
        }

        /// Property: Rotate left then right is the identity.
        #[test]
        fn prop_rotate_left_right_inverse(
            (width, height) in dimensions_strategy(),
            start in -36i32..36,
        ) {
            let (mut t, b, c) = fitted(width, height);
            t.rotation = start as f64 * 10.0;
            let settings = GestureSettings::default();
            let left = apply_gesture(&t, &b, c, ROTATE_LEFT, &settings);
            let back = apply_gesture(&left, &b, c, ROTATE_RIGHT, &settings);
            prop_assert_eq!(back.rotation, t.rotation);
        }

        /// Property: Drag end lands on the rounded coordinates, regardless of
        /// where the image was before.
        #[test]
        fn prop_drag_end_exact(
            (width, height) in dimensions_strategy(),
            (x, y) in (-5000.0f64..5000.0, -5000.0f64..5000.0),
            (left, top) in (-1000i32..1000, -1000i32..1000),
        ) {
            let (mut t, b, c) = fitted(width, height);
            t.position = Position::new(left, top);
            let settings = GestureSettings::default();
            let dragged = apply_gesture(&t, &b, c, Gesture::DragEnd { x, y }, &settings);
            let expected = Position::new(x.round() as i32, y.round() as i32);
            prop_assert_eq!(dragged.position, expected);
        }

        /// Property: Rendered dimensions always equal round(natural × zoom).
        #[test]
        fn prop_rendered_dimensions_match_zoom(
            (width, height) in dimensions_strategy(),
            steps in 0usize..10,
        ) {
            let (mut t, b, c) = fitted(width, height);
            let settings = GestureSettings::default();
            for _ in 0..steps {
                t = apply_gesture(&t, &b, c, ZOOM_IN, &settings);
            }
            prop_assert_eq!(t.image_width(), (width as f64 * t.zoom).round() as u32);
            prop_assert_eq!(t.image_height(), (height as f64 * t.zoom).round() as u32);
        }
    }
}
