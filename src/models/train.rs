use serde::{Deserialize, Serialize};

/// One train as seen by the core, after boundary defaulting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainSnapshot {
    pub id: String,
    pub kind: String,
    pub section_id: String,
    /// Offset in metres from the section's start station
    pub position_m: f64,
    pub status: String,
    pub max_speed_kmh: f64,
    pub destination: String,
}

impl TrainSnapshot {
    /// Label used by the detail panel, e.g. `Express T1`
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.kind, self.id)
    }

    #[must_use]
    pub fn status_color(&self) -> &'static str {
        status_color(&self.status)
    }
}

pub const STATUS_ON_TIME_COLOR: &str = "#10b981";
pub const STATUS_DELAYED_COLOR: &str = "#f59e0b";
pub const STATUS_STOPPED_COLOR: &str = "#ef4444";
pub const STATUS_ARRIVED_COLOR: &str = "#3b82f6";
pub const STATUS_OTHER_COLOR: &str = "#6b7280";

/// Marker colour for a free-text status, matched case-insensitively by substring
#[must_use]
pub fn status_color(status: &str) -> &'static str {
    let status = status.to_lowercase();
    if status.contains("on time") {
        STATUS_ON_TIME_COLOR
    } else if status.contains("delay") {
        STATUS_DELAYED_COLOR
    } else if status.contains("stop") || status.contains("wait") {
        STATUS_STOPPED_COLOR
    } else if status.contains("arrived") {
        STATUS_ARRIVED_COLOR
    } else {
        STATUS_OTHER_COLOR
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_color_matching() {
        assert_eq!(status_color("On Time"), STATUS_ON_TIME_COLOR);
        assert_eq!(status_color("Delayed by 5 min"), STATUS_DELAYED_COLOR);
        assert_eq!(status_color("STOPPED"), STATUS_STOPPED_COLOR);
        assert_eq!(status_color("Waiting for signal"), STATUS_STOPPED_COLOR);
        assert_eq!(status_color("arrived"), STATUS_ARRIVED_COLOR);
        assert_eq!(status_color("Unknown"), STATUS_OTHER_COLOR);
        assert_eq!(status_color(""), STATUS_OTHER_COLOR);
    }

    #[test]
    fn test_display_name() {
        let train = TrainSnapshot {
            id: "T1".to_string(),
            kind: "Express".to_string(),
            section_id: "S1".to_string(),
            position_m: 0.0,
            status: "On time".to_string(),
            max_speed_kmh: 160.0,
            destination: "STN_B".to_string(),
        };
        assert_eq!(train.display_name(), "Express T1");
    }
}
