use drive_rl::experiment::{BaseExperiment, Experiment, ExperimentError};
use drive_rl::observation::Observation;
use drive_rl::rollout::run_episode;
use drive_rl::sim::{LaneInvasion, MockCore, MockWorld, SimulatorCore};
use drive_rl::spaces::Space;
use drive_rl::{ExperimentConfig, ExperimentEnv};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

// Reward forward progress along x since the last step.
struct Progress {
    base: BaseExperiment,
    last_x: f32,
}

impl Experiment for Progress {
    fn base(&self) -> &BaseExperiment {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseExperiment {
        &mut self.base
    }

    fn observation_space(&self) -> Space {
        Space::boxed(f32::MIN, f32::MAX, vec![3])
    }

    fn initialize_reward<C: SimulatorCore>(&mut self, _core: &C) -> Result<(), ExperimentError> {
        self.last_x = 0.0;
        Ok(())
    }

    fn compute_reward<C: SimulatorCore>(
        &mut self,
        _core: &C,
        observation: &Observation,
    ) -> Result<f32, ExperimentError> {
        let x = observation.location.map_or(0.0, |t| t.location.x);
        let reward = x - self.last_x;
        self.last_x = x;
        Ok(reward)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🚗 Starting random driving example");

    let config = ExperimentConfig {
        start_pos_spawn_id: 0,
        end_pos_spawn_id: 4,
        n_vehicles: 3,
        ..ExperimentConfig::default()
    };
    println!("config:\n{}", config.to_json_string()?);

    let mut experiment = Progress {
        base: BaseExperiment::new(config),
        last_x: 0.0,
    };
    let mut core = MockCore::new(MockWorld::with_grid(10));
    let spawned = experiment
        .base_mut()
        .spawn_traffic(core.world_mut(), "vehicle.lincoln.mkz2017")?;
    println!("🚙 spawned {spawned} traffic vehicles");

    let mut env = ExperimentEnv::new(experiment, core)?;
    println!("action space: {:?}", env.action_space());

    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let n = match env.action_space() {
        Space::Discrete(n) => n,
        Space::Box { .. } => unreachable!("driving experiments use discrete actions"),
    };

    let (summary, _) = run_episode(&mut env, |_| Some(rng.gen_range(0..n)), 20)?;
    println!("✅ first episode: {summary:?}");

    // Crossing a solid line ends the next episode on its first step.
    env.core_mut().lane = Some(LaneInvasion {
        crossed_markings: vec!["Solid".to_string()],
    });
    let (summary, _) = run_episode(&mut env, |_| Some(rng.gen_range(0..n)), 20)?;
    println!("🛑 second episode: {summary:?}");

    Ok(())
}
