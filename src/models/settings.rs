use serde::{Deserialize, Serialize};

use crate::constants::{
    CANVAS_HEIGHT, CANVAS_WIDTH, POLL_INTERVAL_MS, SETTINGS_STORAGE_KEY, STATION_COORDINATES,
    TOPOLOGY_REFRESH_MS, TRANSITION_MS,
};
use crate::projection::GeoBounds;
use crate::viewport::ZoomConfig;

/// Runtime configuration for the map page.
///
/// Every field has a serde default, so a partial JSON object (or an empty one)
/// yields a usable configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapSettings {
    /// Prefix for the topology and train endpoints; empty means same origin
    #[serde(default)]
    pub api_base: String,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u32,
    #[serde(default = "default_topology_refresh_ms")]
    pub topology_refresh_ms: u32,
    #[serde(default = "default_transition_ms")]
    pub transition_ms: f64,
    #[serde(default)]
    pub bounds: GeoBounds,
    #[serde(default = "default_canvas_size")]
    pub canvas_size: (f64, f64),
    #[serde(default)]
    pub zoom: ZoomConfig,
    #[serde(default = "default_station_coordinates")]
    pub station_coordinates: Vec<(f64, f64)>,
}

fn default_poll_interval_ms() -> u32 {
    POLL_INTERVAL_MS
}

fn default_topology_refresh_ms() -> u32 {
    TOPOLOGY_REFRESH_MS
}

fn default_transition_ms() -> f64 {
    TRANSITION_MS
}

fn default_canvas_size() -> (f64, f64) {
    (CANVAS_WIDTH, CANVAS_HEIGHT)
}

fn default_station_coordinates() -> Vec<(f64, f64)> {
    STATION_COORDINATES.to_vec()
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            poll_interval_ms: POLL_INTERVAL_MS,
            topology_refresh_ms: TOPOLOGY_REFRESH_MS,
            transition_ms: TRANSITION_MS,
            bounds: GeoBounds::default(),
            canvas_size: (CANVAS_WIDTH, CANVAS_HEIGHT),
            zoom: ZoomConfig::default(),
            station_coordinates: STATION_COORDINATES.to_vec(),
        }
    }
}

impl MapSettings {
    /// Parse settings JSON and normalise out-of-range values
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a JSON object of the expected shape
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str::<Self>(json)
            .map(Self::sanitized)
            .map_err(|e| format!("Failed to parse settings: {e}"))
    }

    /// Replace values that would break the pipeline with their defaults.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        if self.poll_interval_ms == 0 {
            self.poll_interval_ms = POLL_INTERVAL_MS;
        }
        if self.topology_refresh_ms == 0 {
            self.topology_refresh_ms = TOPOLOGY_REFRESH_MS;
        }
        if !(self.transition_ms.is_finite() && self.transition_ms >= 0.0) {
            self.transition_ms = TRANSITION_MS;
        }
        let (width, height) = self.canvas_size;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            self.canvas_size = (CANVAS_WIDTH, CANVAS_HEIGHT);
        }
        let zoom = self.zoom;
        let zoom_valid = zoom.step > 0.0
            && zoom.min > 0.0
            && zoom.min <= zoom.max
            && (zoom.min..=zoom.max).contains(&zoom.baseline);
        if !zoom_valid {
            self.zoom = ZoomConfig::default();
        }
        if !self.bounds.is_valid() {
            self.bounds = GeoBounds::default();
        }
        if self.station_coordinates.is_empty() {
            self.station_coordinates = STATION_COORDINATES.to_vec();
        }
        self
    }

    /// Read settings from `localStorage`, falling back to defaults
    #[must_use]
    pub fn load() -> Self {
        let Some(json) = read_stored_settings() else {
            return Self::default();
        };

        match Self::from_json(&json) {
            Ok(settings) => settings,
            Err(e) => {
                leptos::logging::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    /// Used when the coordinate table cannot place a station
    #[must_use]
    pub fn fallback_coordinate(&self) -> (f64, f64) {
        (
            (self.bounds.min_lat + self.bounds.max_lat) / 2.0,
            (self.bounds.min_lng + self.bounds.max_lng) / 2.0,
        )
    }
}

fn read_stored_settings() -> Option<String> {
    #[cfg(target_arch = "wasm32")]
    {
        let window = web_sys::window()?;
        let storage = window.local_storage().ok()??;
        storage.get_item(SETTINGS_STORAGE_KEY).ok()?
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = SETTINGS_STORAGE_KEY;
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_gives_defaults() {
        let settings = MapSettings::from_json("{}").expect("should parse");
        assert_eq!(settings, MapSettings::default());
    }

    #[test]
    fn test_partial_json_keeps_other_defaults() {
        let settings = MapSettings::from_json(r#"{"api_base": "http://localhost:8000/", "poll_interval_ms": 2000}"#)
            .expect("should parse");
        assert_eq!(settings.poll_interval_ms, 2000);
        assert_eq!(settings.transition_ms, TRANSITION_MS);
        assert_eq!(settings.api_base, "http://localhost:8000/");
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(MapSettings::from_json("not json").is_err());
        assert!(MapSettings::from_json(r#"{"poll_interval_ms": "soon"}"#).is_err());
    }

    #[test]
    fn test_sanitized_restores_broken_values() {
        let json = r#"{
            "poll_interval_ms": 0,
            "transition_ms": -5,
            "canvas_size": [0, 600],
            "zoom": {"baseline": 500, "step": 10, "min": 20, "max": 100},
            "bounds": {"min_lat": 10, "max_lat": 10, "min_lng": 1, "max_lng": 2},
            "station_coordinates": []
        }"#;
        let settings = MapSettings::from_json(json).expect("should parse");
        assert_eq!(settings.poll_interval_ms, POLL_INTERVAL_MS);
        assert_eq!(settings.transition_ms, TRANSITION_MS);
        assert_eq!(settings.canvas_size, (CANVAS_WIDTH, CANVAS_HEIGHT));
        assert_eq!(settings.zoom, ZoomConfig::default());
        assert_eq!(settings.bounds, GeoBounds::default());
        assert_eq!(settings.station_coordinates.len(), STATION_COORDINATES.len());
    }

    #[test]
    fn test_fallback_coordinate_is_box_centre() {
        let settings = MapSettings::default();
        let (lat, lng) = settings.fallback_coordinate();
        assert!((lat - 28.60).abs() < 1e-9);
        assert!((lng - 77.265).abs() < 1e-9);
    }

    #[test]
    fn test_load_without_storage_gives_defaults() {
        assert_eq!(MapSettings::load(), MapSettings::default());
    }
}
