//! Bridge mint: owner-signed instructions that credit the owner with
//! tokens burned on a foreign ledger.

pub mod contract;
pub mod event;
pub mod instruction;
pub mod state;

pub use contract::{contract, MintContract, StorageLayout, MINT_CONTRACT_ADDRESS};
pub use event::{encode_mint_data, MINT_EVENT_TOPIC};
pub use instruction::{parse, BurnNetwork, Instruction, PAYLOAD_LEN};
pub use state::MintState;
