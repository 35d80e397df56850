use thiserror::Error;

use crate::actions::ActionError;
use crate::config::ConfigError;
use crate::sim::SimError;

#[derive(Error, Debug)]
pub enum ExperimentError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Action(#[from] ActionError),

    #[error(transparent)]
    Simulator(#[from] SimError),

    #[error("no hero vehicle has been spawned")]
    NoHero,

    #[error("spawn point {id} does not exist (map has {available})")]
    MissingSpawnPoint { id: usize, available: usize },

    #[error("map has no spawn points to respawn traffic at")]
    NoSpawnPoints,
}
