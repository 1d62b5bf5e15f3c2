//! Per-image zoom bounds derived from the fit-to-container scale.

use serde::{Deserialize, Serialize};

use crate::geometry::{Container, Size};

/// Relative slack allowed when comparing a candidate zoom against a bound.
///
/// Repeatedly adding `step` accumulates rounding error, so the last step up
/// to `max` can land a few ulps past it.
const BOUND_TOLERANCE: f64 = 1e-9;

/// The `[min, max]` zoom range and the discrete step between them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomBounds {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl ZoomBounds {
    /// Compute bounds for an image framed inside a container.
    ///
    /// `min` is the fit scale: the larger of the per-axis ratios, so the image
    /// covers the container on both axes. `max` is `max_factor × min` and
    /// `step` divides `min` into `divisions` parts.
    pub fn fit(natural: Size, container: Container, max_factor: f64, divisions: f64) -> Self {
        let min = fit_scale(natural, container);
        Self {
            min,
            max: min * max_factor,
            step: min / divisions,
        }
    }

    /// Whether `zoom` lies inside the bounds, allowing for accumulated
    /// floating-point error.
    pub fn admits(&self, zoom: f64) -> bool {
        let slack = self.max.abs() * BOUND_TOLERANCE;
        zoom >= self.min - slack && zoom <= self.max + slack
    }

    pub fn clamp(&self, zoom: f64) -> f64 {
        zoom.clamp(self.min, self.max)
    }
}

/// Scale at which the image covers the container.
///
/// Ties between the axes resolve to the vertical ratio.
pub fn fit_scale(natural: Size, container: Container) -> f64 {
    let scale_x = container.width / natural.width() as f64;
    let scale_y = container.height / natural.height() as f64;
    if scale_x > scale_y {
        scale_x
    } else {
        scale_y
    }
}
