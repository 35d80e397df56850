use crate::config::ExperimentConfig;
use crate::observation::Observation;
use crate::sim::SimulatorCore;
use crate::spaces::Space;

use super::base::BaseExperiment;
use super::errors::ExperimentError;

/// A concrete driving experiment.
///
/// Implementors embed a [`BaseExperiment`] and supply the parts that differ
/// between experiments: the observation space and the reward. Everything
/// else has a default that delegates to the base.
///
/// ## Example
/// ```ignore
/// struct LaneKeeping {
///     base: BaseExperiment,
///     distance: f32,
/// }
///
/// impl Experiment for LaneKeeping {
///     fn base(&self) -> &BaseExperiment { &self.base }
///     fn base_mut(&mut self) -> &mut BaseExperiment { &mut self.base }
///     fn observation_space(&self) -> Space { Space::boxed(0.0, 1.0, vec![84, 84, 1]) }
///     // initialize_reward / compute_reward ...
/// }
/// ```
pub trait Experiment: Send {
    fn base(&self) -> &BaseExperiment;
    fn base_mut(&mut self) -> &mut BaseExperiment;

    fn observation_space(&self) -> Space;

    /// Called once per episode, after the hero has spawned.
    fn initialize_reward<C: SimulatorCore>(&mut self, core: &C) -> Result<(), ExperimentError>;

    fn compute_reward<C: SimulatorCore>(
        &mut self,
        core: &C,
        observation: &Observation,
    ) -> Result<f32, ExperimentError>;

    fn config(&self) -> &ExperimentConfig {
        self.base().config()
    }

    fn action_space(&self) -> Space {
        self.base().action_space()
    }

    fn process_observation<C: SimulatorCore>(
        &self,
        _core: &C,
        observation: Observation,
    ) -> Result<Observation, ExperimentError> {
        self.base().process_observation(observation)
    }

    fn done_status<C: SimulatorCore>(&self, core: &C) -> Result<bool, ExperimentError> {
        self.base().done_status(core.world())
    }
}
