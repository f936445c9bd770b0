//! Terminal front end for rectifier parameter sweeps
//!
//! Loads a YAML sweep configuration, compiles the model once through the
//! external toolchain, runs the sweep and shows one curve per outer value:
//! - [`config::SweepFile`] holds the model, sweep and toolchain sections
//! - [`chart::SweepChart`] collects series and draws them with ratatui
//! - [`app::execute`] ties compile, sweep and presentation together

pub mod app;
pub mod chart;
pub mod config;
pub mod logging;
pub mod table;

pub use app::{Presentation, execute};
pub use chart::SweepChart;
pub use config::SweepFile;
pub use logging::init_logging;
