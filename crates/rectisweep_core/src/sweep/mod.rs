//! Two-parameter sweep over an external simulation model.
//!
//! ```ignore
//! use rectisweep_core::fmu::{ToolchainBackend, ToolchainConfig};
//! use rectisweep_core::model::ModelSource;
//! use rectisweep_core::simulator::SimulationBackend;
//! use rectisweep_core::sweep::{Series, SweepConfig, sweep_evaluate};
//!
//! let backend = ToolchainBackend::new(ToolchainConfig::default(), "build");
//! let handle = backend.compile(&ModelSource::default())?;
//!
//! let mut curves = Vec::new();
//! let mut collect = |s: &Series| curves.push(s.clone());
//! let results = sweep_evaluate(&backend, &handle, &SweepConfig::default(), &mut collect)?;
//! ```

mod config;
mod evaluator;
mod grid;
mod metrics;
mod results;

pub use config::{MAX_STEP_COUNT, MAX_TOTAL_POINTS, SweepConfig, SweepParameter, format_sweep_value};
pub use evaluator::{SeriesSink, run_point, sweep_evaluate};
pub use grid::{GridIndices, SweepGrid};
pub use metrics::RunMetric;
pub use results::{Series, SeriesPoint, SweepResults};
