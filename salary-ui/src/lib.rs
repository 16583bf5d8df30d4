pub mod app;
pub mod commands;
pub mod logging;
pub mod models;
pub mod settings;
pub mod utils;
pub mod views;

pub use app::{App, Reply, SharedEngine, build_engine};
pub use settings::Settings;
