//! Plain geometry types shared by the transform, mask and editor modules.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner of the container (stage)
//! - X grows to the right, Y grows downwards
//! - Rotation angles are in degrees, positive = clockwise on screen

use serde::{Deserialize, Serialize};

use crate::error::EditorError;

/// Natural (intrinsic) pixel size of an image.
///
/// Both sides are non-zero. The fields are private so every `Size`,
/// deserialized ones included, goes through [`Size::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawSize")]
pub struct Size {
    width: u32,
    height: u32,
}

#[derive(Deserialize)]
struct RawSize {
    width: u32,
    height: u32,
}

impl TryFrom<RawSize> for Size {
    type Error = EditorError;

    fn try_from(raw: RawSize) -> Result<Self, Self::Error> {
        Size::new(raw.width, raw.height)
    }
}

impl Size {
    /// Create a size, rejecting zero-area dimensions.
    ///
    /// A zero side would make the fit scale infinite, so it is refused here
    /// rather than propagating NaN through the zoom math.
    pub fn new(width: u32, height: u32) -> Result<Self, EditorError> {
        if width == 0 || height == 0 {
            return Err(EditorError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(self) -> u32 {
        self.width
    }

    pub fn height(self) -> u32 {
        self.height
    }

    /// Pixel dimensions after scaling by `zoom`, rounded half away from zero.
    pub fn scaled(self, zoom: f64) -> (u32, u32) {
        (
            (self.width as f64 * zoom).round() as u32,
            (self.height as f64 * zoom).round() as u32,
        )
    }
}

/// Fixed viewport the image is framed inside.
///
/// Sized by the mask asset when one has loaded, otherwise by the configured
/// default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Container {
    pub width: f64,
    pub height: f64,
}

/// Default viewport, matching the bundled mask asset.
pub const DEFAULT_CONTAINER: Container = Container {
    width: 544.0,
    height: 543.0,
};

impl Default for Container {
    fn default() -> Self {
        DEFAULT_CONTAINER
    }
}

impl Container {
    pub fn new(width: f64, height: f64) -> Result<Self, EditorError> {
        if !(width > 0.0 && height > 0.0) || !width.is_finite() || !height.is_finite() {
            return Err(EditorError::InvalidDimensions {
                width: width.max(0.0) as u32,
                height: height.max(0.0) as u32,
            });
        }
        Ok(Self { width, height })
    }

    /// Container sized to match a loaded mask bitmap.
    pub fn from_size(size: Size) -> Self {
        Self {
            width: size.width() as f64,
            height: size.height() as f64,
        }
    }

    /// Centre of the container, also used as the image node's offset.
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// Pixel dimensions for raster output. Fractional sizes round up.
    pub fn pixel_size(&self) -> (u32, u32) {
        (self.width.ceil() as u32, self.height.ceil() as u32)
    }
}

/// A point in screen (container) space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Rotate this vector around the origin by `degrees` (clockwise on screen).
    pub fn rotated(self, degrees: f64) -> Point {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Point::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }
}

impl std::ops::Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

/// Integer placement of the image node in container pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Position {
    pub left: i32,
    pub top: i32,
}

impl Position {
    pub const fn new(left: i32, top: i32) -> Self {
        Self { left, top }
    }

    /// Round a screen point into a position.
    pub fn from_point(point: Point) -> Self {
        Self {
            left: point.x.round() as i32,
            top: point.y.round() as i32,
        }
    }

    pub fn to_point(self) -> Point {
        Point::new(self.left as f64, self.top as f64)
    }
}
