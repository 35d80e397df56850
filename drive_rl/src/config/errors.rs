use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(
        "a camera observation toggle is required for each sensor ({sensors} sensors, {toggles} toggles)"
    )]
    CameraObservationMismatch { sensors: usize, toggles: usize },

    #[error("{transforms} sensor transforms configured for {sensors} sensors")]
    SensorTransformMismatch { sensors: usize, transforms: usize },

    #[error("continuous action spaces are not supported; set discrete_action to true")]
    ContinuousActionsUnsupported,

    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}
