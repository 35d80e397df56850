pub mod actions;
pub mod config;
pub mod env;
pub mod experiment;
pub mod observation;
pub mod rollout;
pub mod sim;
pub mod spaces;

#[cfg(feature = "python")]
mod python;

pub use actions::{ActionDecoder, DiscreteActionTable, VehicleControl};
pub use config::ExperimentConfig;
pub use env::{Env, EnvError, ExperimentEnv, VecEnv};
pub use experiment::{BaseExperiment, Experiment, ExperimentError};
pub use observation::{Observation, StepInfo};
pub use spaces::Space;
