//! Command templates for the external compiler and simulator.

use serde::{Deserialize, Serialize};

/// Argument that expands to the per-parameter arguments of every assignment
pub const PARAMETERS_PLACEHOLDER: &str = "{parameters}";

/// OpenModelica build script producing a co-simulation FMU named `{stem}.fmu`
const DEFAULT_BUILD_SCRIPT: &str = r#"loadFile("{source}"); getErrorString();
buildModelFMU({model}, version="2.0", fmuType="cs", fileNamePrefix="{stem}"); getErrorString();
"#;

/// Replace every `{key}` occurrence in `template` with its value.
pub fn expand(template: &str, vars: &[(&str, String)]) -> String {
    let mut out = template.to_string();
    for (key, value) in vars {
        out = out.replace(&format!("{{{key}}}"), value);
    }
    out
}

/// Compiler invocation.
///
/// Placeholders: `{model}`, `{source}`, `{stem}`, `{out_dir}` and, when a
/// script template is configured, `{script}` (path of the written script).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    pub program: String,
    pub args: Vec<String>,
    /// Build script written next to the artifact before the compiler runs
    pub script: Option<String>,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            program: "omc".to_string(),
            args: vec!["{script}".to_string()],
            script: Some(DEFAULT_BUILD_SCRIPT.to_string()),
        }
    }
}

impl CompilerConfig {
    pub fn expand_args(&self, vars: &[(&str, String)]) -> Vec<String> {
        self.args.iter().map(|arg| expand(arg, vars)).collect()
    }
}

/// Simulator invocation.
///
/// Placeholders: `{fmu}`, `{stop_time}`, `{output}`. An argument equal to
/// `{parameters}` is replaced by `parameter_args` once per assignment, with
/// `{name}` and `{value}` filled in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    pub program: String,
    pub args: Vec<String>,
    pub parameter_args: Vec<String>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            program: "fmusim".to_string(),
            args: [
                "--interface-type",
                "cs",
                "--stop-time",
                "{stop_time}",
                PARAMETERS_PLACEHOLDER,
                "--output-file",
                "{output}",
                "{fmu}",
            ]
            .map(String::from)
            .to_vec(),
            parameter_args: ["--start-value", "{name}", "{value}"]
                .map(String::from)
                .to_vec(),
        }
    }
}

impl SimulatorConfig {
    /// Expand the argument list for one run
    pub fn expand_args(&self, vars: &[(&str, String)], parameters: &[(String, f64)]) -> Vec<String> {
        let mut args = Vec::with_capacity(self.args.len() + parameters.len() * 3);
        for arg in &self.args {
            if arg == PARAMETERS_PLACEHOLDER {
                for (name, value) in parameters {
                    let param_vars = [("name", name.clone()), ("value", value.to_string())];
                    args.extend(self.parameter_args.iter().map(|a| expand(a, &param_vars)));
                }
            } else {
                args.push(expand(arg, vars));
            }
        }
        args
    }
}

/// External toolchain configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolchainConfig {
    pub compiler: CompilerConfig,
    pub simulator: SimulatorConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expand_replaces_all_occurrences() {
        let vars = [("stem", "m".to_string()), ("out_dir", "/tmp".to_string())];
        assert_eq!(expand("{out_dir}/{stem}.fmu ({stem})", &vars), "/tmp/m.fmu (m)");
        assert_eq!(expand("{unknown}", &vars), "{unknown}");
    }

    #[test]
    fn parameters_expand_in_assignment_order() {
        let sim = SimulatorConfig::default();
        let vars = [
            ("fmu", "rect.fmu".to_string()),
            ("stop_time", "14".to_string()),
            ("output", "out.csv".to_string()),
        ];
        let params = vec![("beta".to_string(), 0.5), ("gamma".to_string(), 1.0)];
        let args = sim.expand_args(&vars, &params);
        assert_eq!(
            args,
            vec![
                "--interface-type",
                "cs",
                "--stop-time",
                "14",
                "--start-value",
                "beta",
                "0.5",
                "--start-value",
                "gamma",
                "1",
                "--output-file",
                "out.csv",
                "rect.fmu",
            ]
        );
    }

    #[test]
    fn default_build_script_names_the_artifact() {
        let compiler = CompilerConfig::default();
        let script = expand(
            compiler.script.as_deref().unwrap(),
            &[
                ("source", "/m/FullBridgeRectifier.mo".to_string()),
                ("model", "code.CircuitModels.RectifierModels".to_string()),
                ("stem", "code_CircuitModels_RectifierModels".to_string()),
            ],
        );
        assert!(script.contains(r#"loadFile("/m/FullBridgeRectifier.mo")"#));
        assert!(script.contains(r#"fileNamePrefix="code_CircuitModels_RectifierModels""#));
    }
}
