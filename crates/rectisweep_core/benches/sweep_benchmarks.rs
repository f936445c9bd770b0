//! Criterion benchmarks for the sweep runner
//!
//! Run with: cargo bench -p rectisweep_core
//!
//! The backend here is an in-process RC discharge curve, so the numbers
//! measure runner overhead rather than an external simulator.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rectisweep_core::model::{ModelSource, Trajectory};
use rectisweep_core::simulator::{SimulationBackend, SimulationInstance};
use rectisweep_core::sweep::{RunMetric, Series, SweepConfig, SweepParameter, sweep_evaluate};
use rectisweep_core::SweepError;

struct DischargeBackend {
    samples: usize,
}

struct DischargeInstance {
    samples: usize,
    beta: f64,
    gamma: f64,
}

impl SimulationBackend for DischargeBackend {
    type Handle = ();
    type Instance = DischargeInstance;

    fn compile(&self, _model: &ModelSource) -> Result<(), SweepError> {
        Ok(())
    }

    fn load(&self, _handle: &()) -> Result<DischargeInstance, SweepError> {
        Ok(DischargeInstance {
            samples: self.samples,
            beta: 0.0,
            gamma: 0.0,
        })
    }
}

impl SimulationInstance for DischargeInstance {
    fn set(&mut self, name: &str, value: f64) -> Result<(), SweepError> {
        match name {
            "beta" => self.beta = value,
            "gamma" => self.gamma = value,
            other => return Err(SweepError::Config(format!("unknown parameter {other}"))),
        }
        Ok(())
    }

    fn simulate(self, final_time: f64) -> Result<Trajectory, SweepError> {
        let dt = final_time / (self.samples - 1) as f64;
        let time: Vec<f64> = (0..self.samples).map(|i| i as f64 * dt).collect();
        let s = time
            .iter()
            .map(|t| self.gamma * (-self.beta * t).exp())
            .collect();
        Ok(Trajectory::new(time).with_signal("s", s))
    }
}

fn bench_default_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("sweep_evaluate");

    for samples in [100, 1_000, 10_000] {
        let backend = DischargeBackend { samples };
        let config = SweepConfig::default();
        group.bench_with_input(BenchmarkId::new("5x10", samples), &samples, |b, _| {
            b.iter(|| {
                let results =
                    sweep_evaluate(&backend, &(), black_box(&config), &mut |_: &Series| {});
                black_box(results)
            })
        });
    }

    group.finish();
}

fn bench_dense_grid(c: &mut Criterion) {
    let backend = DischargeBackend { samples: 200 };
    let config = SweepConfig {
        outer: SweepParameter::new("gamma", 0.2, 1.0, 20),
        inner: SweepParameter::new("beta", 0.1, 1.0, 50),
        metric: RunMetric::PeakToPeak,
        ..Default::default()
    };

    c.bench_function("sweep_evaluate/20x50", |b| {
        b.iter(|| black_box(sweep_evaluate(&backend, &(), &config, &mut |_: &Series| {})))
    });
}

criterion_group!(benches, bench_default_sweep, bench_dense_grid);
criterion_main!(benches);
