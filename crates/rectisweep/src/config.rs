//! YAML sweep configuration.
//!
//! Every section is optional; an empty file reproduces the stock rectifier
//! study (gamma over 5 points in [0.2, 1.0], beta over 10 points in
//! [0.1, 1.0], 14 time units, metric `s[0] - s[-1]`).

use std::fs;
use std::path::{Path, PathBuf};

use color_eyre::eyre::WrapErr;
use rectisweep_core::{ModelSource, SweepConfig, ToolchainConfig};
use serde::{Deserialize, Serialize};

/// Contents of a sweep configuration file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepFile {
    pub model: ModelSource,
    pub sweep: SweepConfig,
    pub toolchain: ToolchainConfig,
    /// Where compiled artifacts go (default: `<data_dir>/build`)
    pub build_dir: Option<PathBuf>,
}

impl SweepFile {
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_saphyr::Error> {
        serde_saphyr::from_str(yaml)
    }

    pub fn to_yaml(&self) -> Result<String, serde_saphyr::ser::Error> {
        serde_saphyr::to_string(self)
    }

    /// Read a configuration file. Relative paths inside it are taken
    /// relative to the file's directory.
    pub fn load(path: &Path) -> color_eyre::Result<Self> {
        let content = fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read config {}", path.display()))?;
        let mut file = Self::from_yaml(&content)
            .wrap_err_with(|| format!("failed to parse config {}", path.display()))?;
        if let Some(base) = path.parent() {
            file.resolve_paths(base);
        }
        tracing::info!(path = %path.display(), "Loaded sweep configuration");
        Ok(file)
    }

    fn resolve_paths(&mut self, base: &Path) {
        let resolve = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };
        resolve(&mut self.model.source);
        if let Some(fmu) = self.model.fmu.as_mut() {
            resolve(fmu);
        }
        if let Some(dir) = self.build_dir.as_mut() {
            resolve(dir);
        }
    }

    /// Build directory, falling back to `<data_dir>/build`
    pub fn build_dir(&self, data_dir: &Path) -> PathBuf {
        self.build_dir
            .clone()
            .unwrap_or_else(|| data_dir.join("build"))
    }
}
