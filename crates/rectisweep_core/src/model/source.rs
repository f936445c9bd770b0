use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where the simulated model comes from.
///
/// Either a Modelica class plus its source file, compiled once at startup,
/// or a prebuilt FMU that is used as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSource {
    /// Fully qualified Modelica class name
    pub reference: String,
    /// Modelica source file containing the class
    pub source: PathBuf,
    /// Already-compiled FMU; skips compilation when set
    pub fmu: Option<PathBuf>,
}

impl Default for ModelSource {
    fn default() -> Self {
        Self {
            reference: "code.CircuitModels.RectifierModels".to_string(),
            source: PathBuf::from("FullBridgeRectifier.mo"),
            fmu: None,
        }
    }
}

impl ModelSource {
    /// File stem used for the compiled artifact (`a.b.C` becomes `a_b_C`)
    pub fn artifact_stem(&self) -> String {
        self.reference.replace('.', "_")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifact_stem_replaces_dots() {
        let model = ModelSource::default();
        assert_eq!(model.artifact_stem(), "code_CircuitModels_RectifierModels");
    }
}
