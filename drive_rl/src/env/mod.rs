mod errors;
mod experiment_env;
mod traits;
mod types;
mod vec_env;

pub use errors::EnvError;
pub use experiment_env::ExperimentEnv;
pub use traits::Env;
pub use types::Step;
pub use vec_env::VecEnv;
