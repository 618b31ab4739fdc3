/// Logical canvas width that the projector maps onto
pub const CANVAS_WIDTH: f64 = 800.0;

/// Logical canvas height that the projector maps onto
pub const CANVAS_HEIGHT: f64 = 600.0;

/// Geographic bounding box shown by default (Delhi region)
pub const MIN_LAT: f64 = 28.5400;
pub const MAX_LAT: f64 = 28.6600;
pub const MIN_LNG: f64 = 77.2000;
pub const MAX_LNG: f64 = 77.3300;

/// Zoom is expressed in percent of this baseline (50 → scale factor 1.0)
pub const ZOOM_BASELINE: f64 = 50.0;
pub const ZOOM_STEP: f64 = 10.0;
pub const MIN_ZOOM: f64 = 20.0;
pub const MAX_ZOOM: f64 = 100.0;

/// Entity snapshot polling cadence
pub const POLL_INTERVAL_MS: u32 = 1000;

/// Topology refresh cadence
pub const TOPOLOGY_REFRESH_MS: u32 = 60_000;

/// Duration of the marker glide between two resolved positions
pub const TRANSITION_MS: f64 = 600.0;

/// Display coordinates assigned to stations by their order in the topology payload
pub const STATION_COORDINATES: [(f64, f64); 6] = [
    (28.6139, 77.2090),
    (28.6500, 77.2300),
    (28.6400, 77.2800),
    (28.6100, 77.3200),
    (28.5800, 77.3000),
    (28.5500, 77.2500),
];

/// Fallback substituted for missing text fields in entity snapshots
pub const UNKNOWN: &str = "Unknown";

/// Markers closer than this (logical units) are considered co-located
pub const COINCIDENT_EPSILON: f64 = 0.5;

pub const NETWORK_CONFIG_PATH: &str = "/api/network-config";
pub const TRAIN_DATA_PATH: &str = "/api/train-data";

/// `localStorage` key holding the JSON-encoded `MapSettings`
pub const SETTINGS_STORAGE_KEY: &str = "network_map_settings";
