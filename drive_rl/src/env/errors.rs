use thiserror::Error;

use crate::config::ConfigError;
use crate::experiment::ExperimentError;

#[derive(Error, Debug)]
pub enum EnvError {
    #[error("Environment error: {0}")]
    Experiment(#[from] ExperimentError),

    #[error("Environment config error: {0}")]
    Config(#[from] ConfigError),

    #[error("hero could not be spawned at spawn point {spawn_point}")]
    SpawnFailed { spawn_point: usize },

    #[error("failed to record step info: {0}")]
    Record(#[from] serde_json::Error),

    #[error("got {got} actions for {expected} environments")]
    ActionCountMismatch { expected: usize, got: usize },
}
