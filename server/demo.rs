//! A small fixed network with a handful of trains looping over it, shaped like
//! the live dashboard's topology and train-data payloads.

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct NetworkConfig {
    pub stations: Vec<&'static str>,
    pub sections: Vec<SectionRecord>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct SectionRecord {
    pub id: &'static str,
    pub start: &'static str,
    pub end: &'static str,
    pub length_km: f64,
    pub capacity: u32,
    pub max_speed_kmh: f64,
    pub track_type: &'static str,
    pub is_bypass: bool,
}

#[derive(Debug, Serialize)]
pub struct TrainData {
    pub payload: Vec<TrainBundle>,
}

#[derive(Debug, Serialize)]
pub struct TrainBundle {
    pub train: TrainRecord,
    pub section: BundleSection,
}

#[derive(Debug, Serialize)]
pub struct TrainRecord {
    pub train_id: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub max_speed_kmh: f64,
    pub destination_station: &'static str,
    pub status: &'static str,
    pub current_location: CurrentLocation,
}

#[derive(Debug, Serialize)]
pub struct CurrentLocation {
    pub section_id: &'static str,
    pub position_m: f64,
}

#[derive(Debug, Serialize)]
pub struct BundleSection {
    pub section_id: &'static str,
    pub length_km: f64,
}

const STATIONS: [&str; 6] = ["STN_A", "STN_B", "STN_C", "STN_D", "STN_E", "STN_F"];

const fn section(
    id: &'static str,
    start: &'static str,
    end: &'static str,
    length_km: f64,
    capacity: u32,
    is_bypass: bool,
) -> SectionRecord {
    let (max_speed_kmh, track_type) = match capacity {
        0 | 1 => (80.0, "single"),
        2 => (120.0, "double"),
        _ => (160.0, "triple"),
    };
    SectionRecord {
        id,
        start,
        end,
        length_km,
        capacity,
        max_speed_kmh,
        track_type,
        is_bypass,
    }
}

static SECTIONS: [SectionRecord; 7] = [
    section("S1", "STN_A", "STN_B", 6.0, 2, false),
    section("S2", "STN_B", "STN_C", 8.0, 3, false),
    section("S3", "STN_C", "STN_D", 5.0, 2, false),
    section("S4", "STN_D", "STN_E", 4.0, 1, false),
    section("S5", "STN_E", "STN_F", 7.0, 2, false),
    section("S6", "STN_F", "STN_A", 6.5, 1, false),
    section("S7", "STN_B", "STN_E", 9.0, 1, true),
];

struct DemoTrain {
    id: &'static str,
    kind: &'static str,
    max_speed_kmh: f64,
    status: &'static str,
    route: &'static [&'static str],
    /// Metres covered per poll
    step_m: f64,
    start_m: f64,
}

static TRAINS: [DemoTrain; 5] = [
    DemoTrain {
        id: "T1",
        kind: "Express",
        max_speed_kmh: 160.0,
        status: "On time",
        route: &["S1", "S2", "S3", "S4", "S5", "S6"],
        step_m: 40.0,
        start_m: 0.0,
    },
    DemoTrain {
        id: "T2",
        kind: "Local",
        max_speed_kmh: 100.0,
        status: "Delayed",
        route: &["S3", "S4", "S5", "S6", "S1", "S2"],
        step_m: 25.0,
        start_m: 1200.0,
    },
    DemoTrain {
        id: "T3",
        kind: "Freight",
        max_speed_kmh: 80.0,
        status: "Waiting at signal",
        route: &["S7", "S5", "S6", "S1"],
        step_m: 15.0,
        start_m: 0.0,
    },
    DemoTrain {
        id: "T4",
        kind: "Express",
        max_speed_kmh: 160.0,
        status: "On time",
        route: &["S5", "S6", "S1", "S2", "S3", "S4"],
        step_m: 45.0,
        start_m: 3000.0,
    },
    DemoTrain {
        id: "T5",
        kind: "Local",
        max_speed_kmh: 90.0,
        status: "Arrived",
        route: &["S2", "S3"],
        step_m: 0.0,
        start_m: 8000.0,
    },
];

fn find_section(id: &str) -> Option<&'static SectionRecord> {
    SECTIONS.iter().find(|section| section.id == id)
}

#[must_use]
pub fn network_config() -> NetworkConfig {
    NetworkConfig {
        stations: STATIONS.to_vec(),
        sections: SECTIONS.to_vec(),
    }
}

/// Section and offset reached after `distance_m` along a looping route
fn position_on_route(route: &[&'static str], distance_m: f64) -> Option<(&'static SectionRecord, f64)> {
    let sections: Vec<&'static SectionRecord> = route.iter().filter_map(|id| find_section(id)).collect();
    let total_m: f64 = sections.iter().map(|section| section.length_km * 1000.0).sum();
    if total_m <= 0.0 {
        return None;
    }

    let mut remaining = distance_m.rem_euclid(total_m);
    for section in &sections {
        let length_m = section.length_km * 1000.0;
        if remaining <= length_m {
            return Some((*section, remaining));
        }
        remaining -= length_m;
    }
    sections.last().map(|section| (*section, section.length_km * 1000.0))
}

#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn train_data(tick: u64) -> TrainData {
    let payload = TRAINS
        .iter()
        .filter_map(|train| {
            let distance_m = train.start_m + train.step_m * tick as f64;
            let (section, position_m) = position_on_route(train.route, distance_m)?;
            Some(TrainBundle {
                train: TrainRecord {
                    train_id: train.id,
                    kind: train.kind,
                    max_speed_kmh: train.max_speed_kmh,
                    destination_station: section.end,
                    status: train.status,
                    current_location: CurrentLocation {
                        section_id: section.id,
                        position_m,
                    },
                },
                section: BundleSection {
                    section_id: section.id,
                    length_km: section.length_km,
                },
            })
        })
        .collect();

    TrainData { payload }
}
