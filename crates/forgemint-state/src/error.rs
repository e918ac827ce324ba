use forgemint_types::{Address, U256};
use thiserror::Error;

/// Errors that can occur in state operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StateError {
    #[error("Balance overflow for {0}")]
    BalanceOverflow(Address),

    #[error("Insufficient balance for {address}: have {have}, need {need}")]
    InsufficientBalance {
        address: Address,
        have: U256,
        need: U256,
    },

    #[error("Unknown snapshot id: {0}")]
    InvalidSnapshot(usize),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<borsh::io::Error> for StateError {
    fn from(e: borsh::io::Error) -> Self {
        StateError::Serialization(e.to_string())
    }
}
