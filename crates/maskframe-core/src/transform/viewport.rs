//! Reference rasterizer for the framed image layer.
//!
//! Hosts with a scene graph draw the image themselves from the render plan.
//! This module produces the same picture into a container-sized RGBA buffer,
//! for previews and for exporting the framed region.
//!
//! # Algorithm
//!
//! Inverse mapping: each output pixel centre is mapped back through the node
//! transform into natural image coordinates and sampled there.
//!
//! ```text
//! local   = R(−θ) · (screen − position) + offset
//! natural = local / zoom
//! ```

use image::{Rgba, RgbaImage};

use super::projection::{node_offset, screen_to_image};
use super::state::Transform;
use crate::geometry::{Container, Point};

/// Draw `source` into a transparent container-sized canvas using `transform`.
///
/// Canvas pixels that fall outside the image stay fully transparent.
pub fn render_viewport(
    source: &RgbaImage,
    transform: &Transform,
    container: Container,
) -> RgbaImage {
    let (out_w, out_h) = container.pixel_size();
    let mut output = RgbaImage::new(out_w, out_h);

    if source.width() == 0 || source.height() == 0 || transform.zoom <= 0.0 {
        return output;
    }

    // The bitmap may be a downscaled copy of the natural image.
    let sx = source.width() as f64 / transform.natural.width() as f64;
    let sy = source.height() as f64 / transform.natural.height() as f64;

    let offset = node_offset(container);
    let position = transform.position.to_point();

    for (x, y, pixel) in output.enumerate_pixels_mut() {
        let screen = Point::new(x as f64 + 0.5, y as f64 + 0.5);
        let local = screen_to_image(screen, position, offset, transform.rotation);

        // Pixel-centre convention: natural (0.5, 0.5) is the centre of the
        // first source pixel.
        let src_x = local.x / transform.zoom * sx - 0.5;
        let src_y = local.y / transform.zoom * sy - 0.5;

        if let Some(sample) = sample_bilinear(source, src_x, src_y) {
            *pixel = sample;
        }
    }

    output
}

/// Sample a pixel using bilinear interpolation, clamping to the edge pixels.
///
/// Returns `None` when the point lies more than half a pixel outside the
/// source.
fn sample_bilinear(image: &RgbaImage, x: f64, y: f64) -> Option<Rgba<u8>> {
    let (w, h) = (image.width() as f64, image.height() as f64);
    if x < -0.5 || x >= w - 0.5 || y < -0.5 || y >= h - 0.5 {
        return None;
    }

    let max_x = image.width() - 1;
    let max_y = image.height() - 1;

    let x = x.max(0.0);
    let y = y.max(0.0);
    let x0 = (x.floor() as u32).min(max_x);
    let y0 = (y.floor() as u32).min(max_y);
    let x1 = (x0 + 1).min(max_x);
    let y1 = (y0 + 1).min(max_y);

    let fx = (x - x0 as f64).clamp(0.0, 1.0);
    let fy = (y - y0 as f64).clamp(0.0, 1.0);

    let p00 = image.get_pixel(x0, y0).0;
    let p10 = image.get_pixel(x1, y0).0;
    let p01 = image.get_pixel(x0, y1).0;
    let p11 = image.get_pixel(x1, y1).0;

    let mut result = [0u8; 4];
    for i in 0..4 {
        let v = p00[i] as f64 * (1.0 - fx) * (1.0 - fy)
            + p10[i] as f64 * fx * (1.0 - fy)
            + p01[i] as f64 * (1.0 - fx) * fy
            + p11[i] as f64 * fx * fy;
        result[i] = v.clamp(0.0, 255.0).round() as u8;
    }

    Some(Rgba(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Position, Size};

    fn solid(width: u32, height: u32, color: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba(color))
    }

    fn container(w: f64, h: f64) -> Container {
        Container::new(w, h).unwrap()
    }

    #[test]
    fn test_output_matches_container_size() {
        let c = container(64.0, 32.0);
        let natural = Size::new(10, 10).unwrap();
        let t = Transform::new(natural, c);
        let out = render_viewport(&solid(10, 10, [255, 0, 0, 255]), &t, c);
        assert_eq!(out.dimensions(), (64, 32));
    }

    #[test]
    fn test_default_placement_covers_top_left() {
        // Node at centre with offset at centre: image starts at the origin.
        let c = container(20.0, 20.0);
        let natural = Size::new(10, 10).unwrap();
        let t = Transform::new(natural, c);
        let out = render_viewport(&solid(10, 10, [10, 20, 30, 255]), &t, c);

        assert_eq!(out.get_pixel(0, 0).0, [10, 20, 30, 255]);
        assert_eq!(out.get_pixel(9, 9).0, [10, 20, 30, 255]);
        assert_eq!(out.get_pixel(10, 10).0, [0, 0, 0, 0]);
        assert_eq!(out.get_pixel(19, 0).0, [0, 0, 0, 0]);
    }

    #[test]
    fn test_zoom_scales_coverage() {
        let c = container(20.0, 20.0);
        let natural = Size::new(10, 10).unwrap();
        let t = Transform {
            zoom: 2.0,
            ..Transform::new(natural, c)
        };
        let out = render_viewport(&solid(10, 10, [1, 2, 3, 255]), &t, c);
        assert_eq!(out.get_pixel(19, 19).0, [1, 2, 3, 255]);
    }

    #[test]
    fn test_drag_moves_image() {
        let c = container(20.0, 20.0);
        let natural = Size::new(4, 4).unwrap();
        let t = Transform {
            position: Position::new(20, 20),
            ..Transform::new(natural, c)
        };
        let out = render_viewport(&solid(4, 4, [9, 9, 9, 255]), &t, c);
        // Shifted by (10, 10) from the default placement
        assert_eq!(out.get_pixel(0, 0).0, [0, 0, 0, 0]);
        assert_eq!(out.get_pixel(11, 11).0, [9, 9, 9, 255]);
    }

    #[test]
    fn test_rotation_180_mirrors_around_offset() {
        let c = container(20.0, 20.0);
        let natural = Size::new(10, 10).unwrap();
        let t = Transform {
            rotation: 180.0,
            ..Transform::new(natural, c)
        };
        let out = render_viewport(&solid(10, 10, [5, 5, 5, 255]), &t, c);
        // Rotating around (10, 10) moves the image into the bottom-right quadrant.
        assert_eq!(out.get_pixel(2, 2).0, [0, 0, 0, 0]);
        assert_eq!(out.get_pixel(15, 15).0, [5, 5, 5, 255]);
    }

    #[test]
    fn test_downscaled_bitmap_is_stretched_to_natural_size() {
        let c = container(20.0, 20.0);
        let natural = Size::new(10, 10).unwrap();
        let t = Transform::new(natural, c);
        let out = render_viewport(&solid(5, 5, [7, 7, 7, 255]), &t, c);
        assert_eq!(out.get_pixel(9, 9).0, [7, 7, 7, 255]);
        assert_eq!(out.get_pixel(10, 10).0, [0, 0, 0, 0]);
    }

    #[test]
    fn test_bilinear_blends_neighbours() {
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(0, 0, Rgba([0, 0, 0, 255]));
        img.put_pixel(1, 0, Rgba([200, 200, 200, 255]));
        let mid = sample_bilinear(&img, 0.5, 0.0).unwrap();
        assert_eq!(mid.0, [100, 100, 100, 255]);
        assert!(sample_bilinear(&img, 2.0, 0.0).is_none());
        assert!(sample_bilinear(&img, 0.0, -0.6).is_none());
    }
}
