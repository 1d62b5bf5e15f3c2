//! Mask asset decoding.

use std::io::Cursor;

use image::{ImageReader, RgbaImage};

use crate::error::EditorError;

/// Decode mask bytes (PNG or JPEG) into an RGBA bitmap.
///
/// # Errors
///
/// Returns `EditorError::MaskDecode` if the format is unrecognized or the
/// data is corrupted, and `EditorError::InvalidDimensions` for an empty
/// bitmap.
pub fn decode_mask(bytes: &[u8]) -> Result<RgbaImage, EditorError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| EditorError::MaskDecode(e.to_string()))?;

    let img = reader
        .decode()
        .map_err(|e| EditorError::MaskDecode(e.to_string()))?;

    let rgba = img.into_rgba8();
    if rgba.width() == 0 || rgba.height() == 0 {
        return Err(EditorError::InvalidDimensions {
            width: rgba.width(),
            height: rgba.height(),
        });
    }
    Ok(rgba)
}

/// Wrap raw RGBA bytes from the host in a bitmap, checking the length.
pub fn rgba_from_raw(width: u32, height: u32, pixels: Vec<u8>) -> Result<RgbaImage, EditorError> {
    let expected = width as usize * height as usize * 4;
    let actual = pixels.len();
    RgbaImage::from_raw(width, height, pixels)
        .filter(|_| actual == expected)
        .ok_or(EditorError::PixelBufferMismatch { expected, actual })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::codecs::png::PngEncoder;
    use image::{ExtendedColorType, ImageEncoder, Rgba};

    /// Encode a bitmap as PNG bytes.
    fn png_bytes(img: &RgbaImage) -> Vec<u8> {
        let mut buf = Vec::new();
        PngEncoder::new(&mut buf)
            .write_image(img.as_raw(), img.width(), img.height(), ExtendedColorType::Rgba8)
            .unwrap();
        buf
    }

    #[test]
    fn test_decode_png_mask() {
        let mut img = RgbaImage::from_pixel(8, 6, Rgba([0, 0, 0, 255]));
        img.put_pixel(3, 2, Rgba([0, 0, 0, 0]));

        let decoded = decode_mask(&png_bytes(&img)).unwrap();
        assert_eq!(decoded.dimensions(), (8, 6));
        assert_eq!(decoded.get_pixel(3, 2).0, [0, 0, 0, 0]);
        assert_eq!(decoded.get_pixel(0, 0).0, [0, 0, 0, 255]);
    }

    #[test]
    fn test_decode_garbage_is_mask_error() {
        let err = decode_mask(&[0x00, 0x01, 0x02, 0x03]).unwrap_err();
        assert!(matches!(err, EditorError::MaskDecode(_)));
    }

    #[test]
    fn test_decode_empty_is_mask_error() {
        assert!(decode_mask(&[]).is_err());
    }

    #[test]
    fn test_rgba_from_raw_checks_length() {
        assert!(rgba_from_raw(2, 2, vec![0; 16]).is_ok());
        let err = rgba_from_raw(2, 2, vec![0; 12]).unwrap_err();
        assert!(matches!(
            err,
            EditorError::PixelBufferMismatch {
                expected: 16,
                actual: 12
            }
        ));
        // Longer buffers are refused too
        assert!(rgba_from_raw(2, 2, vec![0; 20]).is_err());
    }
}
