use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

impl Station {
    /// Build a station from its id and its position in the topology payload.
    ///
    /// Coordinates come from `coordinates[order % len]`, a display convention rather
    /// than a survey position. An empty table places every station at `fallback`.
    #[must_use]
    pub fn from_ordered_id(
        id: &str,
        order: usize,
        coordinates: &[(f64, f64)],
        fallback: (f64, f64),
    ) -> Self {
        let (lat, lng) = if coordinates.is_empty() {
            fallback
        } else {
            coordinates[order % coordinates.len()]
        };

        Self {
            id: id.to_string(),
            name: display_name(id),
            lat,
            lng,
        }
    }
}

/// `STN_A` → `STN A`; only the first underscore is replaced
#[must_use]
pub fn display_name(id: &str) -> String {
    id.replacen('_', " ", 1)
}
