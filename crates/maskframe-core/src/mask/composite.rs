//! Mask overlay compositing.
//!
//! The inverted mask is drawn over the image layer with "normal"
//! (source-over) blending at a fixed opacity. Colours are straight
//! (non-premultiplied) RGBA.

use image::RgbaImage;
use serde::{Deserialize, Serialize};

/// Blend modes understood by the host renderer. Only source-over is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    #[default]
    Normal,
}

/// Composite `overlay` onto `canvas` at the origin.
///
/// Only the overlapping region is touched. `opacity` is clamped to 0..=1 and
/// multiplies the overlay's own alpha.
pub fn composite_over(canvas: &mut RgbaImage, overlay: &RgbaImage, opacity: f32) {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity == 0.0 {
        return;
    }

    let w = canvas.width().min(overlay.width());
    let h = canvas.height().min(overlay.height());

    for y in 0..h {
        for x in 0..w {
            let src = overlay.get_pixel(x, y).0;
            let dst = canvas.get_pixel_mut(x, y);
            dst.0 = blend_normal(src, dst.0, opacity);
        }
    }
}

/// Source-over blend of one straight-alpha pixel.
#[inline]
fn blend_normal(src: [u8; 4], dst: [u8; 4], opacity: f32) -> [u8; 4] {
    let sa = src[3] as f32 / 255.0 * opacity;
    if sa <= 0.0 {
        return dst;
    }
    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return [0, 0, 0, 0];
    }

    let mut out = [0u8; 4];
    for i in 0..3 {
        let c = (src[i] as f32 * sa + dst[i] as f32 * da * (1.0 - sa)) / out_a;
        out[i] = c.clamp(0.0, 255.0).round() as u8;
    }
    out[3] = (out_a * 255.0).clamp(0.0, 255.0).round() as u8;
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_opaque_overlay_at_full_opacity_replaces() {
        assert_eq!(
            blend_normal([10, 20, 30, 255], [200, 200, 200, 255], 1.0),
            [10, 20, 30, 255]
        );
    }

    #[test]
    fn test_transparent_overlay_keeps_destination() {
        assert_eq!(
            blend_normal([10, 20, 30, 0], [200, 150, 100, 255], 0.7),
            [200, 150, 100, 255]
        );
    }

    #[test]
    fn test_seventy_percent_black_over_white() {
        // 255 * 0.3 = 76.5
        let out = blend_normal([0, 0, 0, 255], [255, 255, 255, 255], 0.7);
        assert!((out[0] as i32 - 77).abs() <= 1);
        assert_eq!(out[3], 255);
    }

    #[test]
    fn test_over_transparent_canvas_takes_overlay_alpha() {
        let out = blend_normal([0, 0, 0, 255], [0, 0, 0, 0], 0.7);
        assert_eq!(&out[..3], &[0, 0, 0]);
        // 255 * 0.7 = 178.5
        assert!((out[3] as i32 - 178).abs() <= 1);
    }

    #[test]
    fn test_composite_only_touches_overlap() {
        let mut canvas = RgbaImage::from_pixel(4, 4, Rgba([255, 255, 255, 255]));
        let overlay = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 255]));
        composite_over(&mut canvas, &overlay, 1.0);

        assert_eq!(canvas.get_pixel(1, 1).0, [0, 0, 0, 255]);
        assert_eq!(canvas.get_pixel(2, 2).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_zero_opacity_is_noop() {
        let mut canvas = RgbaImage::from_pixel(2, 2, Rgba([1, 2, 3, 4]));
        let before = canvas.clone();
        composite_over(&mut canvas, &RgbaImage::from_pixel(2, 2, Rgba([9, 9, 9, 255])), 0.0);
        assert_eq!(canvas, before);
    }

    #[test]
    fn test_blend_mode_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&BlendMode::Normal).unwrap(), "\"normal\"");
    }
}
