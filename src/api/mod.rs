mod network;

pub use network::{fetch_network_config, fetch_train_data};
