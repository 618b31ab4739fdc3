use serde::{Deserialize, Serialize};

use crate::constants::{CANVAS_HEIGHT, CANVAS_WIDTH, MAX_LAT, MAX_LNG, MIN_LAT, MIN_LNG};
use crate::geometry::ProjectedPoint;

/// Geographic rectangle that fills the logical canvas
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl Default for GeoBounds {
    fn default() -> Self {
        Self {
            min_lat: MIN_LAT,
            max_lat: MAX_LAT,
            min_lng: MIN_LNG,
            max_lng: MAX_LNG,
        }
    }
}

impl GeoBounds {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        [self.min_lat, self.max_lat, self.min_lng, self.max_lng]
            .iter()
            .all(|v| v.is_finite())
            && self.min_lat < self.max_lat
            && self.min_lng < self.max_lng
    }
}

/// Affine map from a fixed geographic box onto a fixed logical canvas.
///
/// Longitude grows to the right; latitude is inverted so that north is up
/// (higher latitude → smaller `y`). Points outside the box extrapolate linearly
/// and land off-canvas rather than failing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projector {
    pub bounds: GeoBounds,
    pub width: f64,
    pub height: f64,
}

impl Default for Projector {
    fn default() -> Self {
        Self::new(GeoBounds::default(), CANVAS_WIDTH, CANVAS_HEIGHT)
    }
}

impl Projector {
    #[must_use]
    pub fn new(bounds: GeoBounds, width: f64, height: f64) -> Self {
        Self { bounds, width, height }
    }

    /// `x = (lng - min_lng) / lng_span * width`, `y = (max_lat - lat) / lat_span * height`
    ///
    /// A zero-width span maps that axis to `0` instead of producing NaN.
    #[must_use]
    pub fn project(&self, lat: f64, lng: f64) -> ProjectedPoint {
        let lng_span = self.bounds.max_lng - self.bounds.min_lng;
        let lat_span = self.bounds.max_lat - self.bounds.min_lat;

        let x = if lng_span == 0.0 {
            0.0
        } else {
            (lng - self.bounds.min_lng) / lng_span * self.width
        };
        let y = if lat_span == 0.0 {
            0.0
        } else {
            (self.bounds.max_lat - lat) / lat_span * self.height
        };

        ProjectedPoint { x, y }
    }
}
