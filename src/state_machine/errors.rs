use thiserror::Error;

/// Errors produced while validating or planning a status change
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateMachineError {
    #[error("Invalid transition from '{from}' to '{to}'")]
    InvalidTransition { from: String, to: String },
}

pub type StateMachineResult<T> = std::result::Result<T, StateMachineError>;
