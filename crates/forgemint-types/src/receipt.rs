use crate::address::Address;
use crate::hash::Hash;
use std::fmt;

/// Event log emitted during transaction execution.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "borsh", derive(borsh::BorshSerialize, borsh::BorshDeserialize))]
pub struct Log {
    /// Address of the contract that emitted this log
    pub address: Address,
    /// Indexed topics (max 4, first is usually event signature hash)
    pub topics: Vec<Hash>,
    /// Non-indexed event data
    pub data: Vec<u8>,
    /// Number of the block the log was emitted in
    pub block_number: u64,
    /// Transaction index within the block
    pub tx_index: u32,
    /// Log index within the block
    pub log_index: u32,
}

impl Log {
    /// Create a new log
    pub fn new(address: Address, topics: Vec<Hash>, data: Vec<u8>, block_number: u64) -> Self {
        Self {
            address,
            topics,
            data,
            block_number,
            tx_index: 0,
            log_index: 0,
        }
    }
}

impl fmt::Display for Log {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Log {{ address: {}, topics: {}, data: {} bytes, block: {} }}",
            self.address,
            self.topics.len(),
            self.data.len(),
            self.block_number
        )
    }
}

/// Result of executing a transaction.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct TransactionReceipt {
    /// Index of the transaction in the block
    pub tx_index: u32,
    /// Number of the block containing this TX
    pub block_number: u64,
    /// Address of the sender
    pub from: Address,
    /// Address of the recipient (None for contract creation)
    pub to: Option<Address>,
    /// Whether the transaction succeeded
    pub status: bool,
    /// Gas used by this transaction
    pub gas_used: u64,
    /// Cumulative gas used in the block up to and including this TX
    pub cumulative_gas_used: u64,
    /// Logs emitted during execution
    pub logs: Vec<Log>,
    /// Revert data (if failed)
    pub revert_reason: Option<Vec<u8>>,
}

impl TransactionReceipt {
    /// Check if transaction succeeded
    pub fn is_success(&self) -> bool {
        self.status
    }
}

impl fmt::Display for TransactionReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Receipt {{ tx: {}, status: {}, gas_used: {}, logs: {} }}",
            self.tx_index,
            if self.status { "success" } else { "failure" },
            self.gas_used,
            self.logs.len()
        )
    }
}
