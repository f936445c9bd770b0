//! Simulation backend that shells out to an external Modelica/FMU toolchain.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;
use tracing::{debug, info};

use super::config::{SimulatorConfig, ToolchainConfig, expand};
use super::results::read_trajectory;
use crate::error::{Result, SweepError};
use crate::model::{ModelSource, Trajectory};
use crate::simulator::{SimulationBackend, SimulationInstance};

/// Name of the result file each run writes into its scratch directory
const RESULT_FILE: &str = "result.csv";

/// Compiled model artifact on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FmuHandle {
    path: PathBuf,
}

impl FmuHandle {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Backend that compiles with an external compiler and simulates with an
/// external FMU runner.
#[derive(Debug, Clone)]
pub struct ToolchainBackend {
    config: ToolchainConfig,
    build_dir: PathBuf,
}

impl ToolchainBackend {
    pub fn new(config: ToolchainConfig, build_dir: impl Into<PathBuf>) -> Self {
        Self {
            config,
            build_dir: build_dir.into(),
        }
    }

    pub fn build_dir(&self) -> &Path {
        &self.build_dir
    }

    fn compile_error(model: &ModelSource, reason: impl Into<String>) -> SweepError {
        SweepError::Compile {
            model: model.reference.clone(),
            reason: reason.into(),
        }
    }
}

impl SimulationBackend for ToolchainBackend {
    type Handle = FmuHandle;
    type Instance = FmuInstance;

    fn compile(&self, model: &ModelSource) -> Result<FmuHandle> {
        if let Some(fmu) = &model.fmu {
            if !fmu.is_file() {
                return Err(Self::compile_error(
                    model,
                    format!("prebuilt FMU {} does not exist", fmu.display()),
                ));
            }
            info!(fmu = %fmu.display(), "Using prebuilt FMU");
            return Ok(FmuHandle { path: fmu.clone() });
        }

        let source = fs::canonicalize(&model.source).map_err(|e| {
            Self::compile_error(
                model,
                format!("cannot read source {}: {e}", model.source.display()),
            )
        })?;
        fs::create_dir_all(&self.build_dir)?;
        let build_dir = fs::canonicalize(&self.build_dir)?;

        let stem = model.artifact_stem();
        let artifact = build_dir.join(format!("{stem}.fmu"));
        // A stale artifact would mask a failed build
        if artifact.exists() {
            fs::remove_file(&artifact)?;
        }

        let mut vars = vec![
            ("model", model.reference.clone()),
            ("source", source.display().to_string()),
            ("stem", stem.clone()),
            ("out_dir", build_dir.display().to_string()),
        ];
        if let Some(script) = &self.config.compiler.script {
            let script_path = build_dir.join(format!("{stem}.mos"));
            fs::write(&script_path, expand(script, &vars))?;
            vars.push(("script", script_path.display().to_string()));
        }

        let compiler = &self.config.compiler;
        let args = compiler.expand_args(&vars);
        info!(
            model = %model.reference,
            program = %compiler.program,
            "Compiling model"
        );
        debug!(?args, dir = %build_dir.display(), "Compiler invocation");

        let output = Command::new(&compiler.program)
            .args(&args)
            .current_dir(&build_dir)
            .output()
            .map_err(|e| {
                Self::compile_error(model, format!("cannot run {}: {e}", compiler.program))
            })?;
        if !output.status.success() {
            return Err(Self::compile_error(
                model,
                format!(
                    "{} exited with {}: {}",
                    compiler.program,
                    output.status,
                    tool_message(&output)
                ),
            ));
        }
        if !artifact.is_file() {
            return Err(Self::compile_error(
                model,
                format!(
                    "{} did not produce {}: {}",
                    compiler.program,
                    artifact.display(),
                    tool_message(&output)
                ),
            ));
        }

        info!(fmu = %artifact.display(), "Model compiled");
        Ok(FmuHandle { path: artifact })
    }

    fn load(&self, handle: &FmuHandle) -> Result<FmuInstance> {
        let load_error = |reason: String| SweepError::Load {
            fmu: handle.path.clone(),
            reason,
        };
        if !handle.path.is_file() {
            return Err(load_error("file no longer exists".to_string()));
        }
        let scratch = tempfile::Builder::new()
            .prefix("rectisweep-run-")
            .tempdir()
            .map_err(|e| load_error(format!("cannot create scratch directory: {e}")))?;
        debug!(scratch = %scratch.path().display(), "Loaded instance");

        Ok(FmuInstance {
            fmu: handle.path.clone(),
            simulator: self.config.simulator.clone(),
            parameters: Vec::new(),
            scratch,
        })
    }
}

/// One runnable FMU instance with its own scratch directory.
///
/// Dropping the instance removes the scratch directory.
#[derive(Debug)]
pub struct FmuInstance {
    fmu: PathBuf,
    simulator: SimulatorConfig,
    parameters: Vec<(String, f64)>,
    scratch: TempDir,
}

impl FmuInstance {
    /// Parameter assignments in the order they were made
    pub fn parameters(&self) -> &[(String, f64)] {
        &self.parameters
    }

    pub fn scratch_dir(&self) -> &Path {
        self.scratch.path()
    }
}

impl SimulationInstance for FmuInstance {
    fn set(&mut self, name: &str, value: f64) -> Result<()> {
        let reject = |reason: &str| SweepError::SetParameter {
            name: name.to_string(),
            value,
            reason: reason.to_string(),
        };
        if name.trim().is_empty() {
            return Err(reject("parameter name is empty"));
        }
        if !value.is_finite() {
            return Err(reject("value is not finite"));
        }

        match self.parameters.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value,
            None => self.parameters.push((name.to_string(), value)),
        }
        Ok(())
    }

    fn simulate(self, final_time: f64) -> Result<Trajectory> {
        if !final_time.is_finite() || final_time <= 0.0 {
            return Err(SweepError::Simulate(format!(
                "final time must be positive, got {final_time}"
            )));
        }

        let output_path = self.scratch.path().join(RESULT_FILE);
        let vars = [
            ("fmu", self.fmu.display().to_string()),
            ("stop_time", final_time.to_string()),
            ("output", output_path.display().to_string()),
        ];
        let args = self.simulator.expand_args(&vars, &self.parameters);
        debug!(program = %self.simulator.program, ?args, "Simulating");

        let output = Command::new(&self.simulator.program)
            .args(&args)
            .current_dir(self.scratch.path())
            .output()
            .map_err(|e| {
                SweepError::Simulate(format!("cannot run {}: {e}", self.simulator.program))
            })?;
        if !output.status.success() {
            return Err(SweepError::Simulate(format!(
                "{} exited with {}: {}",
                self.simulator.program,
                output.status,
                tool_message(&output)
            )));
        }

        let file = File::open(&output_path).map_err(|e| {
            SweepError::Simulate(format!(
                "no result file at {}: {e}",
                output_path.display()
            ))
        })?;
        read_trajectory(BufReader::new(file))
    }
}

/// Best diagnostic from a finished tool: stderr, else stdout.
fn tool_message(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let text = if stderr.trim().is_empty() {
        String::from_utf8_lossy(&output.stdout)
    } else {
        stderr
    };
    text.trim().to_string()
}
