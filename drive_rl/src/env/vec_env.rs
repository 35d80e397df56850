use tracing::debug;

use super::{Env, EnvError};

/// Several independent environments (e.g. one per simulator instance)
/// stepped in lockstep.
pub struct VecEnv<E> {
    envs: Vec<E>,
}

impl<E: Env> VecEnv<E> {
    pub fn new<F>(make_env: F, num_envs: usize) -> Result<Self, EnvError>
    where
        F: Fn(usize) -> Result<E, EnvError>,
    {
        let envs = (0..num_envs).map(make_env).collect::<Result<Vec<_>, _>>()?;
        debug!(num_envs, "vectorised environments created");
        Ok(Self { envs })
    }

    pub fn from_envs(envs: Vec<E>) -> Self {
        Self { envs }
    }

    pub fn len(&self) -> usize {
        self.envs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.envs.is_empty()
    }

    pub fn envs(&self) -> &[E] {
        &self.envs
    }

    pub fn reset(&mut self) -> Result<Vec<E::Obs>, EnvError> {
        self.envs.iter_mut().map(|env| env.reset()).collect()
    }

    pub fn step(
        &mut self,
        actions: Vec<E::Act>,
    ) -> Result<Vec<(E::Obs, f32, bool, E::Info)>, EnvError> {
        if actions.len() != self.envs.len() {
            return Err(EnvError::ActionCountMismatch {
                expected: self.envs.len(),
                got: actions.len(),
            });
        }

        self.envs
            .iter_mut()
            .zip(actions)
            .map(|(env, action)| env.step(action))
            .collect()
    }

    /// Close every environment, even if an earlier one fails; the first error wins.
    pub fn close(&mut self) -> Result<(), EnvError> {
        let mut first_error = None;
        for env in &mut self.envs {
            if let Err(e) = env.close() {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}
