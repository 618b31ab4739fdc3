use std::fmt;

use crate::geometry::{lerp, unit_clamp, ProjectedPoint};
use crate::models::{Topology, TrainSnapshot};
use crate::projection::Projector;

/// Why a train could not be placed on the map. Not an error: such trains are
/// simply left out of the render set.
///
/// [`Topology`] never holds a section whose stations are unknown, so a section
/// with a missing station surfaces here as a missing section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unresolvable {
    MissingSection { section_id: String },
}

impl fmt::Display for Unresolvable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSection { section_id } => write!(f, "unknown section '{section_id}'"),
        }
    }
}

/// A train resolved onto the map
#[derive(Debug, Clone, PartialEq)]
pub struct LocatedTrain {
    pub train: TrainSnapshot,
    /// Fraction of the section travelled, in `[0, 1]`
    pub progress: f64,
    pub lat: f64,
    pub lng: f64,
    pub point: ProjectedPoint,
}

/// `clamp(position_m / length_m, 0, 1)`; a zero or invalid length, or a NaN
/// position, yields `0`. Infinite positions clamp like any other.
#[must_use]
pub fn section_progress(position_m: f64, length_m: f64) -> f64 {
    if !(length_m.is_finite() && length_m > 0.0) {
        return 0.0;
    }
    unit_clamp(position_m / length_m)
}

/// Place one train on its section.
///
/// The section is treated as a straight line between its stations; latitude and
/// longitude are interpolated independently and the result is projected.
///
/// # Errors
///
/// Returns [`Unresolvable`] if the train's section is not part of `topology`,
/// including sections dropped for referencing an unknown station.
pub fn locate(
    train: &TrainSnapshot,
    topology: &Topology,
    projector: &Projector,
) -> Result<LocatedTrain, Unresolvable> {
    let Some((section, start, end)) = topology.section_endpoints(&train.section_id) else {
        return Err(Unresolvable::MissingSection {
            section_id: train.section_id.clone(),
        });
    };

    let progress = section_progress(train.position_m, section.length_m());
    let lat = lerp(start.lat, end.lat, progress);
    let lng = lerp(start.lng, end.lng, progress);

    Ok(LocatedTrain {
        train: train.clone(),
        progress,
        lat,
        lng,
        point: projector.project(lat, lng),
    })
}

/// Locate a whole snapshot, keeping input order and dropping unresolvable trains.
#[must_use]
pub fn locate_all(trains: &[TrainSnapshot], topology: &Topology, projector: &Projector) -> Vec<LocatedTrain> {
    trains
        .iter()
        .filter_map(|train| match locate(train, topology, projector) {
            Ok(located) => Some(located),
            Err(reason) => {
                crate::log!("Not rendering train {}: {}", train.id, reason);
                None
            }
        })
        .collect()
}
