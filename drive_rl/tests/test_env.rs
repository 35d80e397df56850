mod common;

use common::{StayOnRoad, test_config, test_core};
use drive_rl::config::ConfigError;
use drive_rl::env::{Env, EnvError, ExperimentEnv, VecEnv};
use drive_rl::experiment::{Experiment, ExperimentError};
use drive_rl::rollout::run_episode;
use drive_rl::sim::{CameraFrame, CollisionEvent, LaneInvasion, SimulatorCore};
use drive_rl::spaces::Space;
use drive_rl::{ExperimentConfig, VehicleControl};

fn make_env(config: ExperimentConfig) -> ExperimentEnv<StayOnRoad, drive_rl::sim::MockCore> {
    ExperimentEnv::new(StayOnRoad::new(config), test_core()).unwrap()
}

#[test]
fn test_spaces() {
    let env = make_env(test_config());
    assert_eq!(env.action_space(), Space::Discrete(10));
    assert_eq!(env.observation_space(), Space::boxed(0.0, 1.0, vec![84, 84, 1]));
}

#[test]
fn test_reset_spawns_hero_at_start() {
    let mut env = make_env(test_config());
    let obs = env.reset().unwrap();

    let start = env.core().world.spawn_points[0];
    assert_eq!(obs.location, Some(start));
    assert_eq!(env.core().world.frame, 1);
    assert_eq!(env.experiment().reward_inits, 1);
    assert!(env.core().world.spectator.is_some());
    assert_eq!(env.steps(), 0);

    let hero = env.experiment().base().hero().unwrap();
    let actor = env.core().world.actor(hero).unwrap();
    assert_eq!(actor.control, VehicleControl::NEUTRAL);
    assert_eq!(actor.blueprint.attribute("role_name"), Some("hero"));
}

#[test]
fn test_step_applies_action_and_rewards() {
    let mut env = make_env(test_config());
    env.reset().unwrap();

    let (obs, reward, done, info) = env.step(Some(3)).unwrap();
    assert_eq!(reward, 1.0);
    assert!(!done);
    assert!(obs.collision.is_none());
    assert!((info.control.throttle - 0.1).abs() < 1e-6);
    assert_eq!(info.episode_id, env.experiment().base().episode_id());

    let hero = env.experiment().base().hero().unwrap();
    let applied = env.core().world.actor(hero).unwrap().control;
    assert!((applied.throttle - 0.1).abs() < 1e-6);
    assert_eq!(env.steps(), 1);
    assert_eq!(env.core().world.frame, 2);
}

#[test]
fn test_collision_ends_episode() {
    let mut env = make_env(test_config());
    env.reset().unwrap();
    env.core_mut().collision = Some(CollisionEvent {
        other_actor: None,
        intensity: 250.0,
    });

    let (_, reward, done, _) = env.step(Some(0)).unwrap();
    assert!(done);
    assert_eq!(reward, -10.0);
}

#[test]
fn test_lane_invasion_ends_episode() {
    let mut env = make_env(test_config());
    env.reset().unwrap();
    env.core_mut().lane = Some(LaneInvasion {
        crossed_markings: vec!["SolidSolid".to_string()],
    });

    let (_, reward, done, _) = env.step(None).unwrap();
    assert!(done);
    assert_eq!(reward, 1.0);
}

#[test]
fn test_second_reset_replaces_hero() {
    let mut env = make_env(test_config());
    env.reset().unwrap();
    let first = env.experiment().base().hero().unwrap();
    env.reset().unwrap();
    let second = env.experiment().base().hero().unwrap();

    assert_ne!(first, second);
    assert_eq!(env.core().world.destroyed, vec![first]);
    assert_eq!(env.experiment().reward_inits, 2);
}

#[test]
fn test_refused_spawn_is_reported() {
    let mut env = make_env(test_config());
    env.core_mut().world.reject_spawns = true;
    assert!(matches!(
        env.reset(),
        Err(EnvError::SpawnFailed { spawn_point: 0 })
    ));
}

#[test]
fn test_missing_start_point_is_reported() {
    let mut env = make_env(ExperimentConfig {
        start_pos_spawn_id: 42,
        ..test_config()
    });
    assert!(matches!(
        env.reset(),
        Err(EnvError::Experiment(ExperimentError::MissingSpawnPoint {
            id: 42,
            available: 8
        }))
    ));
}

#[test]
fn test_continuous_actions_rejected() {
    let config = ExperimentConfig {
        discrete_action: false,
        ..test_config()
    };
    let result = ExperimentEnv::new(StayOnRoad::new(config), test_core());
    assert!(matches!(
        result,
        Err(EnvError::Config(ConfigError::ContinuousActionsUnsupported))
    ));
}

#[test]
fn test_close_destroys_hero() {
    let mut env = make_env(test_config());
    env.reset().unwrap();
    let hero = env.experiment().base().hero().unwrap();
    env.close().unwrap();

    assert_eq!(env.experiment().base().hero(), None);
    assert!(env.core().world.actor(hero).is_none());
    // closing twice is a no-op
    env.close().unwrap();
}

#[test]
fn test_no_spectator_without_rendering() {
    let mut env = make_env(ExperimentConfig {
        disable_rendering_mode: true,
        ..test_config()
    });
    env.reset().unwrap();
    env.step(Some(1)).unwrap();
    assert!(env.core().world.spectator.is_none());
}

#[test]
fn test_camera_frames_are_post_processed() {
    let mut config = test_config();
    config.observation.camera_observation = vec![true];
    let mut env = make_env(config);
    env.core_mut().camera_frames = vec![CameraFrame {
        width: 2,
        height: 1,
        channels: 3,
        pixels: vec![255.0, 255.0, 255.0, 0.0, 0.0, 0.0],
    }];

    let obs = env.reset().unwrap();
    assert_eq!(obs.camera.len(), 1);
    let frame = &obs.camera[0];
    assert_eq!(frame.channels, 1);
    assert!((frame.pixels[0] - 1.0).abs() < 1e-4);
    assert_eq!(frame.pixels[1], 0.0);
}

#[test]
fn test_run_episode_until_collision() {
    let mut env = make_env(test_config());
    env.core_mut().collision = Some(CollisionEvent {
        other_actor: None,
        intensity: 1.0,
    });

    let (summary, trajectory) = run_episode(&mut env, |_| Some(3), 50).unwrap();
    assert!(summary.terminated);
    assert_eq!(summary.steps, 1);
    assert_eq!(summary.total_reward, -10.0);
    assert_eq!(trajectory[0].act, Some(3));
    assert!(trajectory[0].info.get("control").is_some());
}

#[test]
fn test_run_episode_truncates() {
    let mut env = make_env(test_config());
    let (summary, _) = run_episode(&mut env, |_| Some(0), 4).unwrap();
    assert!(!summary.terminated);
    assert_eq!(summary.steps, 4);
    assert_eq!(summary.total_reward, 4.0);
}

#[test]
fn test_vec_env_steps_in_lockstep() {
    let mut envs = VecEnv::new(
        |_| ExperimentEnv::new(StayOnRoad::new(test_config()), test_core()),
        2,
    )
    .unwrap();
    assert_eq!(envs.len(), 2);

    let observations = envs.reset().unwrap();
    assert_eq!(observations.len(), 2);

    assert!(matches!(
        envs.step(vec![Some(1)]),
        Err(EnvError::ActionCountMismatch {
            expected: 2,
            got: 1
        })
    ));

    let results = envs.step(vec![Some(3), Some(4)]).unwrap();
    assert_eq!(results.len(), 2);
    assert!((results[0].3.control.throttle - 0.1).abs() < 1e-6);
    assert_eq!(results[1].3.control.throttle, 0.0);

    envs.close().unwrap();
    for env in envs.envs() {
        assert!(env.core().world().actors.is_empty());
    }
}

#[test]
fn test_reward_initialised_before_first_tick() {
    let mut env = make_env(test_config());
    env.reset().unwrap();
    assert_eq!(env.experiment().frame_at_reward_init, Some(0));
}

#[test]
fn test_sensorless_config_runs_episode() {
    let mut config = test_config();
    config.sensor.sensors.clear();
    let mut env = make_env(config);
    let obs = env.reset().unwrap();
    assert!(obs.camera.is_empty());
    let (_, _, done, _) = env.step(Some(3)).unwrap();
    assert!(!done);
}
