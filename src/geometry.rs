use serde::{Deserialize, Serialize};

/// A point in the fixed logical canvas space produced by the projector.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ProjectedPoint {
    pub x: f64,
    pub y: f64,
}

impl ProjectedPoint {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Linear interpolation towards `other`.
    ///
    /// `t = 0.0` yields `self`, `t = 1.0` yields `other`. Values outside `[0, 1]`
    /// extrapolate along the same line.
    ///
    /// # Examples
    /// ```
    /// use network_map::geometry::ProjectedPoint;
    ///
    /// let a = ProjectedPoint::new(0.0, 0.0);
    /// let b = ProjectedPoint::new(10.0, 20.0);
    /// assert_eq!(a.lerp(b, 0.5), ProjectedPoint::new(5.0, 10.0));
    /// ```
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self {
            x: lerp(self.x, other.x, t),
            y: lerp(self.y, other.y, t),
        }
    }

    #[must_use]
    pub fn midpoint(self, other: Self) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    #[must_use]
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Interpolates between two scalars.
///
/// Weighted form so both `t = 0` and `t = 1` return the endpoint exactly; a train
/// standing at either end of a section is drawn exactly on that station.
#[must_use]
pub fn lerp(start: f64, end: f64, t: f64) -> f64 {
    start * (1.0 - t) + end * t
}

/// Clamps `value` into `[0, 1]`, mapping NaN to `0`.
#[must_use]
pub fn unit_clamp(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
