//! External Modelica/FMU toolchain backend.
//!
//! Compilation runs a configurable compiler (OpenModelica's `omc` by
//! default) once, producing `<build_dir>/<stem>.fmu`. Every run then invokes
//! a configurable FMU simulator (`fmusim` by default) inside a private
//! scratch directory and reads the CSV it writes.

mod backend;
mod config;
mod results;

pub use backend::{FmuHandle, FmuInstance, ToolchainBackend};
pub use config::{CompilerConfig, PARAMETERS_PLACEHOLDER, SimulatorConfig, ToolchainConfig, expand};
pub use results::read_trajectory;
