#![allow(clippy::implicit_hasher)]
#![allow(unknown_lints)]

pub mod api;
pub mod components;
pub mod constants;
pub mod controls;
pub mod geometry;
pub mod hit_detection;
pub mod interaction;
pub mod locator;
pub mod logging;
pub mod models;
pub mod projection;
pub mod render;
pub mod scene;
pub mod transition;
pub mod viewport;

pub use components::app::App;
