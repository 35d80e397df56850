mod base;
mod errors;
mod traits;

pub use base::{BaseExperiment, TrackedVehicle};
pub use errors::ExperimentError;
pub use traits::Experiment;
