use crate::geometry::ProjectedPoint;
use crate::interaction::TrainMarker;

/// Top-most marker under a point in projected (pre-viewport) space.
///
/// `markers` must be in draw order; the walk goes from the top so the marker the
/// user sees wins. The hit radius is the drawn radius.
#[must_use]
pub fn find_marker_at_position<'a>(markers: &'a [TrainMarker<'_>], point: ProjectedPoint) -> Option<&'a str> {
    markers
        .iter()
        .rev()
        .find(|marker| marker.point.distance(point) <= marker.radius())
        .map(TrainMarker::id)
}
