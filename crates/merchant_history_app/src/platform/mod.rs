mod app;
mod config;
mod effects;
mod logging;
mod sinks;
mod ui;

pub use app::run_app;
