use thiserror::Error;

use super::types::ActorId;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("unknown actor {0}")]
    UnknownActor(ActorId),

    #[error("blueprint '{0}' not found in the blueprint library")]
    BlueprintNotFound(String),

    #[error("no data available for sensor {0}")]
    SensorUnavailable(usize),

    #[error("camera frame holds {got} values, expected {expected} for its dimensions")]
    MalformedFrame { expected: usize, got: usize },

    #[error("Simulator error: {0}")]
    Backend(#[from] Box<dyn std::error::Error + Send + Sync>),
}
