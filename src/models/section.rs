use serde::{Deserialize, Serialize};

/// Display track-width category derived from a section's capacity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackCategory {
    Single,
    Double,
    Triple,
}

impl TrackCategory {
    #[must_use]
    pub fn from_capacity(capacity: u32) -> Self {
        match capacity {
            0 | 1 => Self::Single,
            2 => Self::Double,
            _ => Self::Triple,
        }
    }

    /// Stroke width in logical canvas units
    #[must_use]
    pub fn stroke_width(self) -> f64 {
        match self {
            Self::Single => 2.0,
            Self::Double => 4.0,
            Self::Triple => 6.0,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Single => "Single Track",
            Self::Double => "Double Track",
            Self::Triple => "Triple Track",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub start: String,
    pub end: String,
    pub capacity: u32,
    pub length_km: f64,
    #[serde(default)]
    pub max_speed_kmh: f64,
    #[serde(default)]
    pub track_type: String,
    /// Bypass routes are drawn dashed
    #[serde(default)]
    pub is_bypass: bool,
}

impl Section {
    #[must_use]
    pub fn length_m(&self) -> f64 {
        self.length_km * 1000.0
    }

    #[must_use]
    pub fn category(&self) -> TrackCategory {
        TrackCategory::from_capacity(self.capacity)
    }
}
