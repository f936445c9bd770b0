//! Data types shared between the simulator backends and the sweep runner.

mod source;
mod trajectory;

pub use source::ModelSource;
pub use trajectory::Trajectory;
