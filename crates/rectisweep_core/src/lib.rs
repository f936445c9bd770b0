//! Parameter sweeps over an externally simulated rectifier model
//!
//! This crate drives an external Modelica/FMU toolchain through a grid of
//! two model parameters and reduces every run to one scalar:
//! - The simulator is an opaque collaborator behind [`simulator::SimulationBackend`]
//! - [`fmu::ToolchainBackend`] runs a real compiler and FMU simulator as child processes
//! - [`sweep::sweep_evaluate`] walks the grid and emits one [`sweep::Series`] per outer value
//!
//! ```ignore
//! use rectisweep_core::{ModelSource, SweepConfig, ToolchainBackend, ToolchainConfig};
//! use rectisweep_core::simulator::SimulationBackend;
//! use rectisweep_core::sweep::{Series, sweep_evaluate};
//!
//! let backend = ToolchainBackend::new(ToolchainConfig::default(), "build");
//! let handle = backend.compile(&ModelSource::default())?;
//! let results = sweep_evaluate(&backend, &handle, &SweepConfig::default(), &mut |s: &Series| {
//!     println!("{}: {:?}", s.label, s.xy());
//! })?;
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod error;
pub mod fmu;
pub mod simulator;
pub mod sweep;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use error::SweepError;
pub use fmu::{ToolchainBackend, ToolchainConfig};
pub use model::{ModelSource, Trajectory};
pub use sweep::{RunMetric, Series, SweepConfig, SweepParameter, SweepResults};
