#![allow(clippy::needless_pass_by_value)]

pub mod app;
pub mod legend;
pub mod map_canvas;
pub mod map_controls;
pub mod network_map;
pub mod train_panels;
