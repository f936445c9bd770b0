use std::fmt;
use std::path::PathBuf;

/// Errors raised while compiling, loading, or driving the external simulator
#[derive(Debug)]
pub enum SweepError {
    /// Invalid sweep or toolchain configuration
    Config(String),
    /// The model could not be compiled into an FMU
    Compile {
        model: String,
        reason: String,
    },
    /// A fresh instance could not be loaded from the compiled model
    Load {
        fmu: PathBuf,
        reason: String,
    },
    /// A parameter assignment was rejected
    SetParameter {
        name: String,
        value: f64,
        reason: String,
    },
    /// The simulator failed or produced unreadable output
    Simulate(String),
    /// The trajectory has no signal with the requested name
    MissingSignal(String),
    /// The requested signal exists but holds no samples
    EmptySignal(String),
    /// A failure at a specific sweep grid point
    Point {
        outer_index: usize,
        outer_value: f64,
        inner_index: usize,
        inner_value: f64,
        source: Box<SweepError>,
    },
    /// Filesystem or process I/O failed (build directory, scripts, scratch files)
    Io(std::io::Error),
}

impl fmt::Display for SweepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SweepError::Config(msg) => write!(f, "configuration error: {msg}"),
            SweepError::Compile { model, reason } => {
                write!(f, "failed to compile model {model}: {reason}")
            }
            SweepError::Load { fmu, reason } => {
                write!(f, "failed to load {}: {reason}", fmu.display())
            }
            SweepError::SetParameter {
                name,
                value,
                reason,
            } => write!(f, "cannot set parameter {name}={value}: {reason}"),
            SweepError::Simulate(msg) => write!(f, "simulation failed: {msg}"),
            SweepError::MissingSignal(name) => {
                write!(f, "signal {name:?} not found in trajectory")
            }
            SweepError::EmptySignal(name) => write!(f, "signal {name:?} has no samples"),
            SweepError::Point {
                outer_index,
                outer_value,
                inner_index,
                inner_value,
                source,
            } => write!(
                f,
                "run at grid point ({outer_index}, {inner_index}) \
                 [outer={outer_value}, inner={inner_value}] failed: {source}"
            ),
            SweepError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for SweepError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SweepError::Point { source, .. } => Some(source.as_ref()),
            SweepError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SweepError {
    fn from(e: std::io::Error) -> Self {
        SweepError::Io(e)
    }
}

impl From<csv::Error> for SweepError {
    fn from(e: csv::Error) -> Self {
        SweepError::Simulate(format!("unreadable result file: {e}"))
    }
}

pub type Result<T> = std::result::Result<T, SweepError>;
