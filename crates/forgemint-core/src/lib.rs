//! Forgemint Core - bridge minting and state migrations inside block
//! execution.
//!
//! This crate provides:
//! - The mint contract descriptor, its storage facade and the mint
//!   instruction interpreter/applier
//! - The height-keyed migration registry and the mint contract bootstrap
//!   migration
//! - The per-transaction state transition and the per-block processor

pub mod error;
pub mod mint;
pub mod migrations;
pub mod state_transition;
pub mod block_processor;

pub use error::{CoreError, MigrationError};
pub use mint::{BurnNetwork, Instruction, MintContract, MintState};
pub use migrations::{Migration, MigrationRegistry, MintContractMigration};
pub use state_transition::{ExecutionOutcome, StateTransition};
pub use block_processor::{Block, BlockOutcome, BlockProcessor};
