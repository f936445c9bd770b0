//! The external simulation collaborator.
//!
//! The sweep runner never simulates anything itself. It compiles a model once
//! through a [`SimulationBackend`], then loads a fresh [`SimulationInstance`]
//! for every grid point, configures it, and consumes it with
//! [`SimulationInstance::simulate`].

use crate::error::Result;
use crate::model::{ModelSource, Trajectory};

/// Compiles models and loads runnable instances from the compiled artifact.
pub trait SimulationBackend {
    /// Opaque compiled artifact, created once and never mutated
    type Handle;
    /// A single-use runtime instance
    type Instance: SimulationInstance;

    /// Compile the model. Fails if the source cannot be compiled.
    fn compile(&self, model: &ModelSource) -> Result<Self::Handle>;

    /// Load a fresh instance. Instances never share parameter state.
    fn load(&self, handle: &Self::Handle) -> Result<Self::Instance>;
}

/// A loaded model instance, owned for exactly one run.
pub trait SimulationInstance {
    /// Assign a model parameter before the run
    fn set(&mut self, name: &str, value: f64) -> Result<()>;

    /// Run from the start time to `final_time`, consuming the instance.
    fn simulate(self, final_time: f64) -> Result<Trajectory>;
}
