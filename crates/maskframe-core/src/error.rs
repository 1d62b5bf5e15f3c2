//! Error types for the editor core.
//!
//! None of these are raised by gesture handling: gestures that cannot apply
//! are silent no-ops. Errors only come out of constructors, mask decoding and
//! configuration parsing.

use thiserror::Error;

/// Error types for editor operations.
#[derive(Debug, Error)]
pub enum EditorError {
    /// An image or container with a zero (or non-finite) side.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// Mask bytes could not be decoded into a bitmap.
    #[error("Mask decode failed: {0}")]
    MaskDecode(String),

    /// Pixel buffer length does not match the declared dimensions.
    #[error("Pixel buffer size mismatch: expected {expected} bytes, got {actual}")]
    PixelBufferMismatch { expected: usize, actual: usize },

    /// Configuration failed to parse or validate.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editor_error_display() {
        let err = EditorError::InvalidDimensions {
            width: 0,
            height: 12,
        };
        assert_eq!(err.to_string(), "Invalid dimensions: 0x12");

        let err = EditorError::MaskDecode("truncated".to_string());
        assert_eq!(err.to_string(), "Mask decode failed: truncated");

        let err = EditorError::PixelBufferMismatch {
            expected: 16,
            actual: 12,
        };
        assert_eq!(
            err.to_string(),
            "Pixel buffer size mismatch: expected 16 bytes, got 12"
        );
    }
}
