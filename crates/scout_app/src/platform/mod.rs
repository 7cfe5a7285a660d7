//! Terminal front end: wires stdin, the pure core and the engine together.
mod app;
pub mod config;
mod effects;
mod logging;
mod ui;

pub use app::run_app;
