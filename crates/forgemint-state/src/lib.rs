//! Forgemint State - account state access for block execution
//!
//! `StateDB` is the interface the execution layer mutates during a block.
//! `MemoryState` is the in-memory implementation: every mutation is
//! journaled so that a failed call can be unwound to a snapshot, and the
//! committed account set hashes to a deterministic state root.

pub mod error;
pub mod journal;
pub mod memory;

pub use error::StateError;
pub use journal::JournalEntry;
pub use memory::MemoryState;

use forgemint_types::{Address, Hash, Log, U256};

/// Mutable view of the account state store.
///
/// Reads of absent accounts return zero values. Writes to absent accounts
/// create them first, so a write is always observable in the journal as a
/// `CreateAccount` followed by the change itself.
pub trait StateDB {
    /// Whether an account exists at `address`
    fn exist(&self, address: &Address) -> bool;

    fn get_balance(&self, address: &Address) -> U256;
    fn add_balance(&mut self, address: &Address, amount: U256) -> Result<(), StateError>;
    fn sub_balance(&mut self, address: &Address, amount: U256) -> Result<(), StateError>;

    fn get_nonce(&self, address: &Address) -> u64;
    fn set_nonce(&mut self, address: &Address, nonce: u64);

    /// Account code, empty if there is none
    fn get_code(&self, address: &Address) -> Vec<u8>;
    /// `Hash::ZERO` for absent accounts, `Hash::KECCAK_EMPTY` for accounts without code
    fn get_code_hash(&self, address: &Address) -> Hash;
    fn set_code(&mut self, address: &Address, code: Vec<u8>);

    /// Storage word at `key`, zero when unset
    fn get_state(&self, address: &Address, key: &Hash) -> Hash;
    fn set_state(&mut self, address: &Address, key: Hash, value: Hash);

    /// Select the transaction that subsequent logs belong to
    fn set_tx_context(&mut self, tx_index: u32);
    fn add_log(&mut self, log: Log);
    /// Logs emitted by the given transaction of the current block
    fn tx_logs(&self, tx_index: u32) -> Vec<Log>;
    /// Drop the logs of the previous block
    fn reset_logs(&mut self);

    /// Mark the current journal position, returning a revision id
    fn snapshot(&mut self) -> usize;
    /// Undo every change made after `id` was taken
    fn revert_to_snapshot(&mut self, id: usize) -> Result<(), StateError>;

    /// Commit the journal; changes can no longer be reverted
    fn finalise(&mut self);
}
