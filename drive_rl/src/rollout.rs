// drive_rl/src/rollout.rs
use serde::Serialize;
use tracing::info;

use crate::env::{Env, EnvError, Step};

#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeSummary {
    pub steps: usize,
    pub total_reward: f32,
    /// True when the environment reported done, false when `max_steps` cut the episode short.
    pub terminated: bool,
}

/// The basic RL loop: reset, then step with `policy` until done or `max_steps`.
pub fn run_episode<E, P>(
    env: &mut E,
    mut policy: P,
    max_steps: usize,
) -> Result<(EpisodeSummary, Vec<Step<E::Obs, E::Act>>), EnvError>
where
    E: Env,
    E::Info: Serialize,
    P: FnMut(&E::Obs) -> E::Act,
{
    let mut obs = env.reset()?;
    let mut trajectory = Vec::new();
    let mut total_reward = 0.0;
    let mut terminated = false;

    while trajectory.len() < max_steps {
        let act = policy(&obs);
        let (next_obs, rew, done, info) = env.step(act.clone())?;
        total_reward += rew;

        trajectory.push(Step {
            obs,
            act,
            rew,
            done,
            info: serde_json::to_value(&info)?,
        });

        obs = next_obs;
        if done {
            terminated = true;
            break;
        }
    }

    let summary = EpisodeSummary {
        steps: trajectory.len(),
        total_reward,
        terminated,
    };
    info!(
        steps = summary.steps,
        total_reward = summary.total_reward,
        terminated,
        "episode finished"
    );
    Ok((summary, trajectory))
}
