mod data_state;
mod section;
mod settings;
mod station;
mod topology;
mod train;
pub mod wire;

pub use data_state::DataState;
pub use section::{Section, TrackCategory};
pub use settings::MapSettings;
pub use station::{display_name, Station};
pub use topology::Topology;
pub use train::{
    status_color, TrainSnapshot, STATUS_ARRIVED_COLOR, STATUS_DELAYED_COLOR, STATUS_ON_TIME_COLOR,
    STATUS_OTHER_COLOR, STATUS_STOPPED_COLOR,
};
pub use wire::{NetworkConfig, TrainData};
