mod processing;
mod types;

pub use processing::post_process_image;
pub use types::{ControlInfo, Observation, StepInfo};

/// The episode ends on any collision or lane invasion.
pub fn episode_terminated(observation: &Observation) -> bool {
    observation.collision.is_some() || observation.lane.is_some()
}
