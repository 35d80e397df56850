mod decoder;
mod errors;
mod types;

pub use decoder::{ActionDecoder, DiscreteActionTable, STEER_LIMIT, apply_delta};
pub use errors::ActionError;
pub use types::{
    ActionDelta, ActionTableKind, DISCRETE_ACTIONS_SMALL, DISCRETE_ACTIONS_SMALLER, VehicleControl,
};
