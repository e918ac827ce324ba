//! Forgemint Types - Core type definitions shared by every Forgemint crate.
//!
//! This crate provides:
//! - Addresses (20-byte, `0x` hex encoded)
//! - Hashes and storage words (32-byte, keccak-256 digests)
//! - U256 (256-bit unsigned integer)
//! - Accounts, messages, logs and receipts
//! - Chain configuration, including the bridge-mint fork parameters

pub mod address;
pub mod hash;
pub mod u256;
pub mod account;
pub mod transaction;
pub mod receipt;
pub mod chain_config;
pub mod error;

#[cfg(feature = "serde")]
mod serialization;

pub use address::Address;
pub use hash::Hash;
pub use u256::U256;
pub use account::Account;
pub use transaction::Message;
pub use receipt::{Log, TransactionReceipt};
pub use chain_config::{ChainConfig, MintContractConfig};
pub use error::TypesError;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        Account, Address, ChainConfig, Hash, Log, Message, MintContractConfig,
        TransactionReceipt, TypesError, U256,
    };
}
