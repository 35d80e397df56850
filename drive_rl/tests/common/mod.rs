#![allow(dead_code)]

use drive_rl::experiment::{BaseExperiment, Experiment, ExperimentError};
use drive_rl::observation::Observation;
use drive_rl::sim::{MockCore, MockWorld, SimulatorCore, World};
use drive_rl::spaces::Space;
use drive_rl::ExperimentConfig;

/// Rewards staying on the road: +1 per step, -10 on a collision.
pub struct StayOnRoad {
    pub base: BaseExperiment,
    pub reward_inits: usize,
    pub frame_at_reward_init: Option<u64>,
}

impl StayOnRoad {
    pub fn new(config: ExperimentConfig) -> Self {
        Self {
            base: BaseExperiment::new(config),
            reward_inits: 0,
            frame_at_reward_init: None,
        }
    }
}

impl Experiment for StayOnRoad {
    fn base(&self) -> &BaseExperiment {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseExperiment {
        &mut self.base
    }

    fn observation_space(&self) -> Space {
        let sensor = &self.config().sensor;
        Space::boxed(
            0.0,
            1.0,
            vec![sensor.camera_y as usize, sensor.camera_x as usize, sensor.framestack],
        )
    }

    fn initialize_reward<C: SimulatorCore>(&mut self, core: &C) -> Result<(), ExperimentError> {
        self.reward_inits += 1;
        self.frame_at_reward_init = Some(core.world().frame());
        Ok(())
    }

    fn compute_reward<C: SimulatorCore>(
        &mut self,
        _core: &C,
        observation: &Observation,
    ) -> Result<f32, ExperimentError> {
        Ok(if observation.collision.is_some() { -10.0 } else { 1.0 })
    }
}

/// Route starting at spawn point 0 on an 8-point straight road.
pub fn test_config() -> ExperimentConfig {
    ExperimentConfig {
        start_pos_spawn_id: 0,
        end_pos_spawn_id: 7,
        respawn_seed: Some(7),
        ..ExperimentConfig::default()
    }
}

pub fn test_core() -> MockCore {
    MockCore::new(MockWorld::with_grid(8))
}
