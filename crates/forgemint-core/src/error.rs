use forgemint_state::StateError;
use forgemint_types::{Address, U256};
use forgemint_vm::VmError;
use thiserror::Error;

/// Errors that can occur in core operations.
///
/// Any of these makes the block being processed invalid. Failures that a
/// valid block may contain (reverts, out of gas) are reported in the
/// execution outcome instead.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoreError {
    #[error("Invalid nonce for {address}: expected {expected}, got {got}")]
    InvalidNonce {
        address: Address,
        expected: u64,
        got: u64,
    },

    #[error("Nonce of {address} has reached its maximum {nonce}")]
    NonceMax { address: Address, nonce: u64 },

    #[error("Insufficient funds for {address}: have {have}, need {need}")]
    InsufficientFunds {
        address: Address,
        have: U256,
        need: U256,
    },

    #[error("Intrinsic gas too low: need {intrinsic}, limit {limit}")]
    IntrinsicGas { intrinsic: u64, limit: u64 },

    #[error("Block gas limit {got} above chain maximum {max}")]
    InvalidBlockGasLimit { got: u64, max: u64 },

    #[error("Block gas limit exceeded: {used} > {limit}")]
    GasLimitExceeded { used: u64, limit: u64 },

    #[error("Migration error: {0}")]
    Migration(#[from] MigrationError),

    #[error("State error: {0}")]
    State(#[from] StateError),

    #[error("VM error: {0}")]
    Vm(#[from] VmError),
}

/// Chain configuration defects found while building the migration registry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MigrationError {
    #[error("owner address is not specified or equals to zero address")]
    OwnerNotSpecified,

    #[error("mint limit is not specified")]
    MintLimitNotSpecified,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migration_error_messages() {
        assert_eq!(
            MigrationError::OwnerNotSpecified.to_string(),
            "owner address is not specified or equals to zero address"
        );
        assert_eq!(
            MigrationError::MintLimitNotSpecified.to_string(),
            "mint limit is not specified"
        );
    }

    #[test]
    fn test_migration_error_wraps() {
        let err: CoreError = MigrationError::OwnerNotSpecified.into();
        assert!(err.to_string().starts_with("Migration error"));
    }
}
