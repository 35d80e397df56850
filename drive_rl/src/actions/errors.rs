use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ActionError {
    #[error("action {index} is not in the action table (size {size})")]
    UnknownAction { index: usize, size: usize },

    #[error("an action table needs at least one row")]
    EmptyTable,
}
