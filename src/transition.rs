use indexmap::IndexMap;

use crate::geometry::{unit_clamp, ProjectedPoint};
use crate::locator::LocatedTrain;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Glide {
    from: ProjectedPoint,
    to: ProjectedPoint,
    started_ms: f64,
}

impl Glide {
    fn at_rest(point: ProjectedPoint, now_ms: f64) -> Self {
        Self { from: point, to: point, started_ms: now_ms }
    }

    fn progress(&self, now_ms: f64, duration_ms: f64) -> f64 {
        if duration_ms <= 0.0 {
            return 1.0;
        }
        unit_clamp((now_ms - self.started_ms) / duration_ms)
    }

    fn sample(&self, now_ms: f64, duration_ms: f64) -> ProjectedPoint {
        self.from.lerp(self.to, self.progress(now_ms, duration_ms))
    }
}

/// Per-train marker smoothing between successive snapshots.
///
/// A train whose resolved point changes glides linearly from wherever its marker
/// currently is to the new point over `duration_ms`. Newly seen trains start at
/// their target; trains missing from a snapshot are forgotten.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionTransitions {
    duration_ms: f64,
    glides: IndexMap<String, Glide>,
}

impl PositionTransitions {
    #[must_use]
    pub fn new(duration_ms: f64) -> Self {
        Self {
            duration_ms: duration_ms.max(0.0),
            glides: IndexMap::new(),
        }
    }

    /// Retarget every glide at the positions of a fresh snapshot
    pub fn update(&mut self, located: &[LocatedTrain], now_ms: f64) {
        let mut next = IndexMap::with_capacity(located.len());
        for train in located {
            let glide = match self.glides.get(&train.train.id) {
                Some(glide) if glide.to == train.point => *glide,
                Some(glide) => Glide {
                    from: glide.sample(now_ms, self.duration_ms),
                    to: train.point,
                    started_ms: now_ms,
                },
                None => Glide::at_rest(train.point, now_ms),
            };
            next.insert(train.train.id.clone(), glide);
        }
        self.glides = next;
    }

    /// Current marker position of a train, `None` if it is not tracked
    #[must_use]
    pub fn sample(&self, id: &str, now_ms: f64) -> Option<ProjectedPoint> {
        self.glides
            .get(id)
            .map(|glide| glide.sample(now_ms, self.duration_ms))
    }

    /// Whether any marker is still moving at `now_ms`
    #[must_use]
    pub fn is_animating(&self, now_ms: f64) -> bool {
        self.glides
            .values()
            .any(|glide| glide.from != glide.to && glide.progress(now_ms, self.duration_ms) < 1.0)
    }

    /// Copy of `located` with each point replaced by its smoothed position
    #[must_use]
    pub fn apply(&self, located: &[LocatedTrain], now_ms: f64) -> Vec<LocatedTrain> {
        located
            .iter()
            .map(|train| {
                let mut smoothed = train.clone();
                if let Some(point) = self.sample(&train.train.id, now_ms) {
                    smoothed.point = point;
                }
                smoothed
            })
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.glides.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.glides.is_empty()
    }
}
