use tracing::{debug_span, info, info_span};

use crate::config::ConfigError;
use crate::experiment::Experiment;
use crate::observation::{Observation, StepInfo};
use crate::sim::SimulatorCore;
use crate::spaces::Space;

use super::errors::EnvError;
use super::traits::Env;

/// Runs an [`Experiment`] against a simulator core as a step-wise [`Env`].
///
/// Actions are discrete table indices; `None` releases all vehicle inputs.
pub struct ExperimentEnv<X, C> {
    experiment: X,
    core: C,
    steps: u64,
}

impl<X, C> ExperimentEnv<X, C>
where
    X: Experiment,
    C: SimulatorCore + Send,
{
    pub fn new(experiment: X, core: C) -> Result<Self, EnvError> {
        let config = experiment.config();
        if !config.discrete_action {
            return Err(ConfigError::ContinuousActionsUnsupported.into());
        }
        config.validate()?;
        Ok(Self {
            experiment,
            core,
            steps: 0,
        })
    }

    pub fn experiment(&self) -> &X {
        &self.experiment
    }

    pub fn experiment_mut(&mut self) -> &mut X {
        &mut self.experiment
    }

    pub fn core(&self) -> &C {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut C {
        &mut self.core
    }

    pub fn into_parts(self) -> (X, C) {
        (self.experiment, self.core)
    }

    pub fn observation_space(&self) -> Space {
        self.experiment.observation_space()
    }

    pub fn action_space(&self) -> Space {
        self.experiment.action_space()
    }

    /// Steps taken since the last reset.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    fn follow_hero(&mut self) -> Result<(), EnvError> {
        if !self.experiment.config().disable_rendering_mode {
            self.experiment
                .base_mut()
                .set_server_view(self.core.world_mut())?;
        }
        Ok(())
    }

    fn observe(&mut self) -> Result<(Observation, StepInfo), EnvError> {
        let (observation, info) = self.experiment.base_mut().observation(&self.core)?;
        let observation = self.experiment.process_observation(&self.core, observation)?;
        Ok((observation, info))
    }
}

impl<X, C> Env for ExperimentEnv<X, C>
where
    X: Experiment,
    C: SimulatorCore + Send,
{
    type Obs = Observation;
    type Act = Option<usize>;
    type Info = StepInfo;

    fn reset(&mut self) -> Result<Self::Obs, EnvError> {
        let spawn_point = self.experiment.config().start_pos_spawn_id;
        let start = self
            .experiment
            .base()
            .resolve_spawn_point(self.core.world(), spawn_point)?;

        let spawned = self
            .experiment
            .base_mut()
            .spawn_hero(self.core.world_mut(), &start, false)?;
        if !spawned {
            return Err(EnvError::SpawnFailed { spawn_point });
        }

        let span = info_span!("episode", id = ?self.experiment.base().episode_id());
        let _guard = span.enter();

        self.experiment
            .base_mut()
            .respawn_actors(self.core.world_mut())?;
        self.experiment.initialize_reward(&self.core)?;
        self.experiment
            .base_mut()
            .experiment_tick(&mut self.core, None)?;
        self.follow_hero()?;
        self.steps = 0;

        let (observation, _) = self.observe()?;
        info!(spawn_point, "episode reset");
        Ok(observation)
    }

    fn step(&mut self, act: Self::Act) -> Result<(Self::Obs, f32, bool, Self::Info), EnvError> {
        let span = debug_span!(
            "step",
            episode = ?self.experiment.base().episode_id(),
            step = self.steps
        );
        let _guard = span.enter();

        self.experiment
            .base_mut()
            .experiment_tick(&mut self.core, act)?;
        self.follow_hero()?;

        let (observation, info) = self.observe()?;
        let reward = self.experiment.compute_reward(&self.core, &observation)?;
        let done = self.experiment.done_status(&self.core)?;
        self.steps += 1;

        if done {
            info!(steps = self.steps, "episode terminated");
        }
        Ok((observation, reward, done, info))
    }

    fn close(&mut self) -> Result<(), EnvError> {
        self.experiment
            .base_mut()
            .destroy_hero(self.core.world_mut())?;
        Ok(())
    }
}
