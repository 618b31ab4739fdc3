//! Payload shapes of the topology and train snapshot endpoints.
//!
//! Every optional field is decoded leniently: a missing value and a value of the
//! wrong type both become `None`, and the defaulting step in
//! [`TrainBundle::into_snapshot`] / [`NetworkConfig`] consumers substitutes the
//! fallbacks. Nothing here rejects a whole payload because of one bad field.

use chrono::{DateTime, Utc};
use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};

use super::section::Section;
use super::train::TrainSnapshot;
use crate::constants::UNKNOWN;

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let serde_json::Value::Array(items) = value else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| T::deserialize(item).ok())
        .collect())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// `GET /api/network-config`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    #[serde(default, deserialize_with = "lenient_vec")]
    pub stations: Vec<String>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub sections: Vec<SectionRecord>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl NetworkConfig {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty() || self.sections.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionRecord {
    pub id: String,
    pub start: String,
    pub end: String,
    #[serde(default, deserialize_with = "lenient")]
    pub length_km: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub capacity: Option<u32>,
    #[serde(default, deserialize_with = "lenient")]
    pub max_speed_kmh: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub track_type: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub is_bypass: Option<bool>,
}

impl From<SectionRecord> for Section {
    fn from(record: SectionRecord) -> Self {
        Self {
            id: record.id,
            start: record.start,
            end: record.end,
            capacity: record.capacity.unwrap_or(1),
            length_km: record.length_km.filter(|km| km.is_finite()).unwrap_or(0.0),
            max_speed_kmh: record.max_speed_kmh.unwrap_or(0.0),
            track_type: record.track_type.unwrap_or_default(),
            is_bypass: record.is_bypass.unwrap_or(false),
        }
    }
}

/// `GET /api/train-data`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainData {
    #[serde(default, deserialize_with = "lenient_vec")]
    pub payload: Vec<TrainBundle>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl TrainData {
    /// Apply boundary defaulting to every bundle, keeping payload order.
    /// Bundles without a train id are dropped.
    #[must_use]
    pub fn into_snapshots(self) -> Vec<TrainSnapshot> {
        self.payload
            .into_iter()
            .filter_map(TrainBundle::into_snapshot)
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainBundle {
    #[serde(default, deserialize_with = "lenient")]
    pub train: Option<TrainRecord>,
    #[serde(default, deserialize_with = "lenient")]
    pub section: Option<BundleSection>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainRecord {
    #[serde(default, deserialize_with = "lenient")]
    pub train_id: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub max_speed_kmh: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub destination_station: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub current_location: Option<CurrentLocation>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentLocation {
    #[serde(default, deserialize_with = "lenient")]
    pub section_id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub position_m: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BundleSection {
    #[serde(default, deserialize_with = "lenient")]
    pub section_id: Option<String>,
}

impl TrainBundle {
    /// The single place where missing snapshot fields get their fallbacks.
    #[must_use]
    pub fn into_snapshot(self) -> Option<TrainSnapshot> {
        let train = self.train?;
        let Some(id) = non_empty(train.train_id) else {
            crate::log!("Dropping train record without an id");
            return None;
        };

        // The bundle's section is authoritative; the train's own location is the fallback
        let location = train.current_location.unwrap_or_default();
        let section_id = self
            .section
            .and_then(|s| non_empty(s.section_id))
            .or_else(|| non_empty(location.section_id))
            .unwrap_or_default();

        Some(TrainSnapshot {
            id,
            kind: non_empty(train.kind).unwrap_or_else(|| UNKNOWN.to_string()),
            section_id,
            position_m: location.position_m.filter(|m| m.is_finite()).unwrap_or(0.0),
            status: non_empty(train.status).unwrap_or_else(|| UNKNOWN.to_string()),
            max_speed_kmh: train.max_speed_kmh.filter(|v| v.is_finite()).unwrap_or(0.0),
            destination: non_empty(train.destination_station).unwrap_or_else(|| UNKNOWN.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_config_decodes_original_shape() {
        let json = r#"{
            "stations": ["STN_A", "STN_B"],
            "sections": [{"id": "S1", "start": "STN_A", "end": "STN_B",
                          "length_km": 10, "capacity": 2,
                          "max_speed_kmh": 120, "track_type": "double"}],
            "timestamp": "2026-01-01T00:00:00Z"
        }"#;
        let config: NetworkConfig = serde_json::from_str(json).expect("should decode");
        assert_eq!(config.stations, vec!["STN_A", "STN_B"]);
        assert_eq!(config.sections.len(), 1);
        assert!(config.timestamp.is_some());

        let section = Section::from(config.sections[0].clone());
        assert_eq!(section.capacity, 2);
        assert_eq!(section.length_km, 10.0);
        assert!(!section.is_bypass);
    }

    #[test]
    fn test_network_config_skips_malformed_sections() {
        let json = r#"{
            "stations": ["STN_A", 7, "STN_B"],
            "sections": [{"id": "S1", "start": "STN_A", "end": "STN_B"}, {"id": 5}],
            "timestamp": "not a date"
        }"#;
        let config: NetworkConfig = serde_json::from_str(json).expect("should decode");
        assert_eq!(config.stations, vec!["STN_A", "STN_B"]);
        assert_eq!(config.sections.len(), 1);
        assert_eq!(config.timestamp, None);

        let section = Section::from(config.sections[0].clone());
        assert_eq!(section.capacity, 1);
        assert_eq!(section.length_km, 0.0);
        assert_eq!(section.track_type, "");
    }

    #[test]
    fn test_empty_config_is_empty() {
        let config: NetworkConfig = serde_json::from_str("{}").expect("should decode");
        assert!(config.is_empty());
    }

    #[test]
    fn test_bundle_defaults_missing_fields() {
        let json = r#"{"payload": [
            {"train": {"train_id": "T1", "current_location": {"section_id": "S1", "position_m": 5000}}}
        ]}"#;
        let data: TrainData = serde_json::from_str(json).expect("should decode");
        let snapshots = data.into_snapshots();
        assert_eq!(snapshots.len(), 1);

        let train = &snapshots[0];
        assert_eq!(train.id, "T1");
        assert_eq!(train.section_id, "S1");
        assert_eq!(train.position_m, 5000.0);
        assert_eq!(train.status, "Unknown");
        assert_eq!(train.destination, "Unknown");
        assert_eq!(train.kind, "Unknown");
        assert_eq!(train.max_speed_kmh, 0.0);
    }

    #[test]
    fn test_bundle_defaults_malformed_fields() {
        let json = r#"{"payload": [
            {"train": {"train_id": "T2", "type": "Freight", "max_speed_kmh": "fast",
                       "status": 42, "destination_station": "",
                       "current_location": {"position_m": "far"}},
             "section": {"section_id": "S3", "length_km": 4}}
        ]}"#;
        let data: TrainData = serde_json::from_str(json).expect("should decode");
        let snapshots = data.into_snapshots();
        assert_eq!(snapshots.len(), 1);

        let train = &snapshots[0];
        assert_eq!(train.kind, "Freight");
        assert_eq!(train.max_speed_kmh, 0.0);
        assert_eq!(train.status, "Unknown");
        assert_eq!(train.destination, "Unknown");
        assert_eq!(train.position_m, 0.0);
        assert_eq!(train.section_id, "S3");
    }

    #[test]
    fn test_bundle_section_takes_precedence() {
        let json = r#"{"payload": [
            {"train": {"train_id": "T1", "current_location": {"section_id": "S1", "position_m": 10}},
             "section": {"section_id": "S2", "length_km": 4}},
            {"train": {"train_id": "T2", "current_location": {"section_id": "S1", "position_m": 10}},
             "section": {"section_id": ""}}
        ]}"#;
        let data: TrainData = serde_json::from_str(json).expect("should decode");
        let sections: Vec<String> = data.into_snapshots().into_iter().map(|t| t.section_id).collect();
        assert_eq!(sections, vec!["S2", "S1"]);
    }

    #[test]
    fn test_bundle_without_train_id_is_dropped() {
        let json = r#"{"payload": [
            {"train": {"status": "On time"}},
            {"section": {"section_id": "S1"}},
            "garbage",
            {"train": {"train_id": "T9"}}
        ]}"#;
        let data: TrainData = serde_json::from_str(json).expect("should decode");
        let snapshots = data.into_snapshots();
        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots[0].id, "T9");
        assert_eq!(snapshots[0].section_id, "");
    }

    #[test]
    fn test_payload_order_is_preserved() {
        let json = r#"{"payload": [
            {"train": {"train_id": "B"}},
            {"train": {"train_id": "A"}},
            {"train": {"train_id": "C"}}
        ]}"#;
        let data: TrainData = serde_json::from_str(json).expect("should decode");
        let ids: Vec<String> = data.into_snapshots().into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["B", "A", "C"]);
    }
}
