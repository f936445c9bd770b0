//! Simulation output trajectories.

use rustc_hash::FxHashMap;

use crate::error::{Result, SweepError};

/// Output of a single simulation run: a time axis plus named sample sequences.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trajectory {
    time: Vec<f64>,
    signals: FxHashMap<String, Vec<f64>>,
    /// Signal names in the order the simulator reported them
    order: Vec<String>,
}

impl Trajectory {
    pub fn new(time: Vec<f64>) -> Self {
        Self {
            time,
            ..Default::default()
        }
    }

    /// Builder-style signal insertion, mostly for stub collaborators.
    #[must_use]
    pub fn with_signal(mut self, name: impl Into<String>, samples: Vec<f64>) -> Self {
        self.insert(name, samples);
        self
    }

    /// Insert or replace a signal
    pub fn insert(&mut self, name: impl Into<String>, samples: Vec<f64>) {
        let name = name.into();
        if self.signals.insert(name.clone(), samples).is_none() {
            self.order.push(name);
        }
    }

    pub fn time(&self) -> &[f64] {
        &self.time
    }

    /// Samples for a named signal
    pub fn signal(&self, name: &str) -> Option<&[f64]> {
        self.signals.get(name).map(Vec::as_slice)
    }

    pub fn signal_names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Samples for a named signal, failing when it is absent or empty.
    pub fn samples(&self, name: &str) -> Result<&[f64]> {
        let samples = self
            .signal(name)
            .ok_or_else(|| SweepError::MissingSignal(name.to_string()))?;
        if samples.is_empty() {
            return Err(SweepError::EmptySignal(name.to_string()));
        }
        Ok(samples)
    }

    /// First and last sample of a signal
    pub fn endpoints(&self, name: &str) -> Result<(f64, f64)> {
        let samples = self.samples(name)?;
        // samples() guarantees at least one element
        Ok((samples[0], samples[samples.len() - 1]))
    }
}
