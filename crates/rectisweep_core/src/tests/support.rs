//! In-process stub collaborator that records every call.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::{Result, SweepError};
use crate::model::{ModelSource, Trajectory};
use crate::simulator::{SimulationBackend, SimulationInstance};

/// One recorded simulate call
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRun {
    pub instance_id: usize,
    pub parameters: Vec<(String, f64)>,
    pub final_time: f64,
}

#[derive(Debug, Default)]
pub struct CallLog {
    pub compiles: usize,
    pub loads: usize,
    pub runs: Vec<RecordedRun>,
}

type Respond = dyn Fn(&[(String, f64)]) -> Result<Trajectory>;

/// Backend whose trajectories come from a closure over the assigned parameters
pub struct StubBackend {
    pub log: Rc<RefCell<CallLog>>,
    respond: Rc<Respond>,
}

impl StubBackend {
    pub fn new(respond: impl Fn(&[(String, f64)]) -> Result<Trajectory> + 'static) -> Self {
        Self {
            log: Rc::new(RefCell::new(CallLog::default())),
            respond: Rc::new(respond),
        }
    }

    /// Every run reports the same samples for signal `s`
    pub fn constant(samples: Vec<f64>) -> Self {
        Self::new(move |_| Ok(signal_s(samples.clone())))
    }

    pub fn runs(&self) -> Vec<RecordedRun> {
        self.log.borrow().runs.clone()
    }
}

pub fn signal_s(samples: Vec<f64>) -> Trajectory {
    let time = (0..samples.len()).map(|i| i as f64).collect();
    Trajectory::new(time).with_signal("s", samples)
}

/// Look up a parameter from a recorded assignment list
pub fn param(parameters: &[(String, f64)], name: &str) -> f64 {
    parameters
        .iter()
        .find(|(n, _)| n == name)
        .map(|(_, v)| *v)
        .unwrap_or_else(|| panic!("parameter {name} was never set"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StubHandle;

pub struct StubInstance {
    id: usize,
    parameters: Vec<(String, f64)>,
    log: Rc<RefCell<CallLog>>,
    respond: Rc<Respond>,
}

impl SimulationBackend for StubBackend {
    type Handle = StubHandle;
    type Instance = StubInstance;

    fn compile(&self, model: &ModelSource) -> Result<StubHandle> {
        if model.reference.is_empty() {
            return Err(SweepError::Compile {
                model: String::new(),
                reason: "empty model reference".to_string(),
            });
        }
        self.log.borrow_mut().compiles += 1;
        Ok(StubHandle)
    }

    fn load(&self, _handle: &StubHandle) -> Result<StubInstance> {
        let mut log = self.log.borrow_mut();
        log.loads += 1;
        Ok(StubInstance {
            id: log.loads,
            parameters: Vec::new(),
            log: Rc::clone(&self.log),
            respond: Rc::clone(&self.respond),
        })
    }
}

impl SimulationInstance for StubInstance {
    fn set(&mut self, name: &str, value: f64) -> Result<()> {
        self.parameters.push((name.to_string(), value));
        Ok(())
    }

    fn simulate(self, final_time: f64) -> Result<Trajectory> {
        self.log.borrow_mut().runs.push(RecordedRun {
            instance_id: self.id,
            parameters: self.parameters.clone(),
            final_time,
        });
        (self.respond)(&self.parameters)
    }
}
