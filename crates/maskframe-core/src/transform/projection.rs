//! Center-on-zoom projection.
//!
//! The image node is drawn at `position`, with its local origin shifted by
//! `offset` and rotated around that offset. An image-local point `p` (already
//! scaled to rendered pixels) lands on screen at:
//!
//! ```text
//! screen = position + R(θ) · (p − offset)
//! ```
//!
//! Scaling the image by `k = new_zoom / old_zoom` scales `p` by `k`. To keep
//! the image point under an anchor `A` fixed on screen, the position must move
//! to:
//!
//! ```text
//! position' = A − k · (A − position) − (k − 1) · R(θ) · offset
//! ```
//!
//! Scaling from the top-left corner instead makes the image jump towards the
//! bottom-right on every zoom step.

use crate::geometry::{Container, Point};

/// Offset of the image node: its rotation and scale origin.
///
/// Fixed at the container centre. Re-derived whenever the container or the
/// rotation changes, never cached.
pub fn node_offset(container: Container) -> Point {
    container.center()
}

/// Compute the node position that keeps the image point under `anchor` fixed
/// while the zoom changes from `old_zoom` to `new_zoom`.
///
/// Returns `position` unchanged if `old_zoom` is not a usable divisor.
pub fn project_zoom(
    anchor: Point,
    position: Point,
    offset: Point,
    rotation: f64,
    old_zoom: f64,
    new_zoom: f64,
) -> Point {
    if !(old_zoom.is_finite() && old_zoom > 0.0) {
        return position;
    }
    let k = new_zoom / old_zoom;
    let rotated_offset = offset.rotated(rotation);
    anchor - (anchor - position) * k - rotated_offset * (k - 1.0)
}

/// Project a zoom change anchored on the container centre.
pub fn project_zoom_centered(
    container: Container,
    position: Point,
    rotation: f64,
    old_zoom: f64,
    new_zoom: f64,
) -> Point {
    let center = container.center();
    project_zoom(
        center,
        position,
        node_offset(container),
        rotation,
        old_zoom,
        new_zoom,
    )
}

/// Map an image-local point (rendered pixels) to screen space.
pub fn image_to_screen(local: Point, position: Point, offset: Point, rotation: f64) -> Point {
    position + (local - offset).rotated(rotation)
}

/// Map a screen point back to image-local rendered pixels.
pub fn screen_to_image(screen: Point, position: Point, offset: Point, rotation: f64) -> Point {
    (screen - position).rotated(-rotation) + offset
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Point, b: Point) {
        assert!(
            (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9,
            "{a:?} != {b:?}"
        );
    }

    #[test]
    fn test_anchor_point_stays_fixed() {
        let container = Container::new(544.0, 543.0).unwrap();
        let offset = node_offset(container);
        let anchor = container.center();
        let position = Point::new(300.0, 250.0);
        let rotation = 30.0;
        let (old_zoom, new_zoom) = (1.0, 1.5);

        let local_old = screen_to_image(anchor, position, offset, rotation);
        let new_position = project_zoom(anchor, position, offset, rotation, old_zoom, new_zoom);
        let local_new = local_old * (new_zoom / old_zoom);

        assert_close(
            image_to_screen(local_new, new_position, offset, rotation),
            anchor,
        );
    }

    #[test]
    fn test_default_placement_zooms_from_center() {
        // Node at the container centre with offset at the centre puts the
        // image's top-left corner at the origin.
        let container = Container::new(200.0, 100.0).unwrap();
        let position = container.center();
        let new_position = project_zoom_centered(container, position, 0.0, 1.0, 2.0);

        // Top-left corner moves to centre - 2 * centre.
        let offset = node_offset(container);
        let top_left = image_to_screen(Point::default(), new_position, offset, 0.0);
        assert_close(top_left, Point::new(-100.0, -50.0));
    }

    #[test]
    fn test_identity_zoom_keeps_position() {
        let container = Container::default();
        let position = Point::new(12.0, -40.0);
        let projected = project_zoom_centered(container, position, 45.0, 1.3, 1.3);
        assert_close(projected, position);
    }

    #[test]
    fn test_zoom_in_then_out_restores_position() {
        let container = Container::default();
        let position = Point::new(100.0, 420.0);
        let up = project_zoom_centered(container, position, 70.0, 1.086, 1.1946);
        let back = project_zoom_centered(container, up, 70.0, 1.1946, 1.086);
        assert_close(back, position);
    }

    #[test]
    fn test_invalid_old_zoom_is_noop() {
        let position = Point::new(5.0, 5.0);
        let projected = project_zoom(
            Point::default(),
            position,
            Point::default(),
            0.0,
            0.0,
            2.0,
        );
        assert_eq!(projected, position);
    }

    #[test]
    fn test_screen_image_round_trip() {
        let offset = Point::new(272.0, 271.5);
        let position = Point::new(10.0, 20.0);
        let local = Point::new(33.0, 44.0);
        let screen = image_to_screen(local, position, offset, -130.0);
        assert_close(screen_to_image(screen, position, offset, -130.0), local);
    }
}
