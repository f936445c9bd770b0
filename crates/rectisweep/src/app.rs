use std::io::{self, Write};

use color_eyre::eyre::WrapErr;
use rectisweep_core::simulator::SimulationBackend;
use rectisweep_core::sweep::{SeriesSink, sweep_evaluate};
use rectisweep_core::{ModelSource, Series, SweepConfig, SweepResults};

use crate::chart::SweepChart;
use crate::table::format_table;

/// What to do with the finished sweep
pub enum Presentation<'a> {
    /// Full-screen chart until the user quits
    Interactive,
    /// Write a text table instead of opening the chart
    Table(&'a mut dyn Write),
}

/// Forwards series to the chart and reports run progress on stderr
struct ProgressReporter<'a> {
    chart: &'a mut SweepChart,
    show_progress: bool,
}

impl SeriesSink for ProgressReporter<'_> {
    fn plot(&mut self, series: &Series) {
        tracing::debug!(label = %series.label, points = series.len(), "Series plotted");
        self.chart.add_series(series);
    }

    fn progress(&mut self, completed: usize, total: usize) {
        if !self.show_progress {
            return;
        }
        let mut stderr = io::stderr().lock();
        let _ = write!(stderr, "\rSimulating {completed}/{total}");
        if completed == total {
            let _ = writeln!(stderr);
        }
        let _ = stderr.flush();
    }
}

/// Compile the model once, sweep the grid and present the results.
pub fn execute<B: SimulationBackend>(
    backend: &B,
    model: &ModelSource,
    config: &SweepConfig,
    presentation: Presentation<'_>,
) -> color_eyre::Result<(SweepResults, SweepChart)> {
    let handle = backend
        .compile(model)
        .wrap_err_with(|| format!("failed to compile {}", model.reference))?;

    let mut chart = SweepChart::for_config(config);
    let mut reporter = ProgressReporter {
        chart: &mut chart,
        show_progress: matches!(presentation, Presentation::Interactive),
    };
    let results = sweep_evaluate(backend, &handle, config, &mut reporter)
        .wrap_err("parameter sweep failed")?;

    chart.set_legend(results.legend_labels.clone());
    tracing::info!(series = chart.curves().len(), "Sweep complete");

    match presentation {
        Presentation::Interactive => chart.show()?,
        Presentation::Table(out) => {
            out.write_all(format_table(&results).as_bytes())?;
            out.flush()?;
        }
    }

    Ok((results, chart))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    use rectisweep_core::SweepError;
    use rectisweep_core::model::Trajectory;
    use rectisweep_core::simulator::SimulationInstance;

    /// Reports `s = [gamma, gamma * (1 - beta)]`
    #[derive(Default)]
    struct LossBackend {
        fail_compile: bool,
        compiles: Cell<usize>,
        loads: Cell<usize>,
    }

    #[derive(Default)]
    struct LossInstance {
        beta: f64,
        gamma: f64,
    }

    impl SimulationBackend for LossBackend {
        type Handle = ();
        type Instance = LossInstance;

        fn compile(&self, model: &ModelSource) -> Result<(), SweepError> {
            self.compiles.set(self.compiles.get() + 1);
            if self.fail_compile {
                return Err(SweepError::Compile {
                    model: model.reference.clone(),
                    reason: "syntax error".to_string(),
                });
            }
            Ok(())
        }

        fn load(&self, _handle: &()) -> Result<LossInstance, SweepError> {
            self.loads.set(self.loads.get() + 1);
            Ok(LossInstance::default())
        }
    }

    impl SimulationInstance for LossInstance {
        fn set(&mut self, name: &str, value: f64) -> Result<(), SweepError> {
            match name {
                "beta" => self.beta = value,
                "gamma" => self.gamma = value,
                _ => {}
            }
            Ok(())
        }

        fn simulate(self, _final_time: f64) -> Result<Trajectory, SweepError> {
            Ok(Trajectory::new(vec![0.0, 14.0])
                .with_signal("s", vec![self.gamma, self.gamma * (1.0 - self.beta)]))
        }
    }

    #[test]
    fn headless_run_writes_table_and_fills_chart() {
        let mut out = Vec::new();
        let backend = LossBackend::default();
        let (results, chart) = execute(
            &backend,
            &ModelSource::default(),
            &SweepConfig::default(),
            Presentation::Table(&mut out),
        )
        .unwrap();

        // One compile up front, one fresh instance per grid point
        assert_eq!(backend.compiles.get(), 1);
        assert_eq!(backend.loads.get(), 50);

        assert_eq!(chart.curves().len(), 5);
        assert_eq!(chart.legend(), results.legend_labels.as_slice());
        assert_eq!(chart.legend()[4], "gamma value: 1.0");

        // s[0] - s[-1] = gamma * beta
        let top = results.get(4, 9).unwrap();
        assert!((top - 1.0).abs() < 1e-12);

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 12);
        assert!(text.contains("gamma value: 0.2"));
    }

    #[test]
    fn compile_failure_is_reported_with_model_name() {
        let mut out = Vec::new();
        let backend = LossBackend {
            fail_compile: true,
            ..Default::default()
        };
        let err = execute(
            &backend,
            &ModelSource::default(),
            &SweepConfig::default(),
            Presentation::Table(&mut out),
        )
        .unwrap_err();

        let message = format!("{err:#}");
        assert!(message.contains("failed to compile code.CircuitModels.RectifierModels"));
        assert!(message.contains("syntax error"));
        assert!(out.is_empty());
        assert_eq!(backend.loads.get(), 0);
    }
}
