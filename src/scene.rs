use crate::locator::{locate_all, LocatedTrain};
use crate::models::{DataState, MapSettings, NetworkConfig, Topology, TrainData, TrainSnapshot};
use crate::projection::Projector;
use crate::transition::PositionTransitions;

/// Everything the data refresh path owns: the latest topology and train
/// snapshots, their resolved positions and the marker glides between them.
///
/// Readers get shared access; replacing data goes through [`SceneWriter`].
#[derive(Debug, Clone)]
pub struct Scene {
    projector: Projector,
    coordinates: Vec<(f64, f64)>,
    fallback: (f64, f64),
    topology: DataState<Topology>,
    trains: DataState<Vec<TrainSnapshot>>,
    located: Vec<LocatedTrain>,
    transitions: PositionTransitions,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(&MapSettings::default())
    }
}

impl Scene {
    #[must_use]
    pub fn new(settings: &MapSettings) -> Self {
        let (width, height) = settings.canvas_size;
        Self {
            projector: Projector::new(settings.bounds, width, height),
            coordinates: settings.station_coordinates.clone(),
            fallback: settings.fallback_coordinate(),
            topology: DataState::Loading,
            trains: DataState::Loading,
            located: Vec::new(),
            transitions: PositionTransitions::new(settings.transition_ms),
        }
    }

    /// Write handle for the refresh path
    pub fn writer(&mut self) -> SceneWriter<'_> {
        SceneWriter { scene: self }
    }

    #[must_use]
    pub fn projector(&self) -> &Projector {
        &self.projector
    }

    #[must_use]
    pub fn topology(&self) -> &DataState<Topology> {
        &self.topology
    }

    #[must_use]
    pub fn trains(&self) -> &DataState<Vec<TrainSnapshot>> {
        &self.trains
    }

    /// Trains resolved at their target positions, in snapshot order
    #[must_use]
    pub fn located(&self) -> &[LocatedTrain] {
        &self.located
    }

    #[must_use]
    pub fn located_train(&self, id: &str) -> Option<&LocatedTrain> {
        self.located.iter().find(|located| located.train.id == id)
    }

    /// Resolved trains with each point replaced by its on-screen glide position
    #[must_use]
    pub fn smoothed(&self, now_ms: f64) -> Vec<LocatedTrain> {
        self.transitions.apply(&self.located, now_ms)
    }

    #[must_use]
    pub fn is_animating(&self, now_ms: f64) -> bool {
        self.transitions.is_animating(now_ms)
    }

    fn relocate(&mut self, now_ms: f64) {
        self.located = match (self.topology.ready(), self.trains.ready()) {
            (Some(topology), Some(trains)) => locate_all(trains, topology, &self.projector),
            _ => Vec::new(),
        };
        self.transitions.update(&self.located, now_ms);
    }
}

/// Replaces scene snapshots. Has no access to the viewport or interaction state.
pub struct SceneWriter<'a> {
    scene: &'a mut Scene,
}

impl SceneWriter<'_> {
    /// Install a freshly fetched topology, or record why none arrived
    pub fn replace_topology(&mut self, result: Result<NetworkConfig, String>, now_ms: f64) {
        let scene = &mut *self.scene;
        let built = result.map(|config| Topology::from_config(&config, &scene.coordinates, scene.fallback));
        if let Err(e) = scene.topology.refresh(built) {
            leptos::logging::warn!("Topology refresh failed: {e}");
        }
        if let Some(topology) = scene.topology.ready() {
            crate::log!(
                "Topology: {} stations, {} sections",
                topology.station_count(),
                topology.section_count()
            );
        }
        scene.relocate(now_ms);
    }

    /// Install a freshly polled train snapshot; a failed poll keeps the previous one
    pub fn replace_trains(&mut self, result: Result<TrainData, String>, now_ms: f64) {
        let scene = &mut *self.scene;
        if let Err(e) = scene.trains.refresh(result.map(TrainData::into_snapshots)) {
            leptos::logging::warn!("Train data refresh failed: {e}");
            return;
        }
        scene.relocate(now_ms);
    }
}
