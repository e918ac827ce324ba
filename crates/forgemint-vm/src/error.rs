use forgemint_state::StateError;
use thiserror::Error;

/// Errors that can occur during execution.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum VmError {
    #[error("Out of gas: used {used}, limit {limit}")]
    OutOfGas { used: u64, limit: u64 },

    #[error("Execution reverted: {reason:?}")]
    Reverted { reason: Option<Vec<u8>> },

    #[error("Code size exceeded: {size} > {limit}")]
    CodeSizeExceeded { size: usize, limit: usize },

    #[error("Execution error: {0}")]
    ExecutionError(String),

    #[error("State error: {0}")]
    State(#[from] StateError),
}
