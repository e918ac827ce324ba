use crate::address::Address;
use crate::u256::U256;
use std::fmt;

/// A transaction with its sender already recovered.
///
/// Signature checking happens upstream; the state transition only sees
/// messages.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "borsh", derive(borsh::BorshSerialize, borsh::BorshDeserialize))]
pub struct Message {
    /// Recovered sender
    pub from: Address,
    /// Recipient address (None = contract creation)
    pub to: Option<Address>,
    /// Sender's nonce
    pub nonce: u64,
    /// Value to transfer (in wei)
    pub value: U256,
    /// Maximum gas units this message can consume
    pub gas_limit: u64,
    /// Price per unit of gas
    pub gas_price: U256,
    /// Input data
    pub data: Vec<u8>,
}

impl Message {
    /// Create a call message with empty data and zero value
    pub fn call(from: Address, to: Address, nonce: u64, gas_limit: u64, gas_price: U256) -> Self {
        Self {
            from,
            to: Some(to),
            nonce,
            value: U256::ZERO,
            gas_limit,
            gas_price,
            data: Vec::new(),
        }
    }

    /// Set the input data
    pub fn with_data(mut self, data: Vec<u8>) -> Self {
        self.data = data;
        self
    }

    /// Set the transferred value
    pub fn with_value(mut self, value: U256) -> Self {
        self.value = value;
        self
    }

    /// Check if this is a contract creation message
    pub fn is_create(&self) -> bool {
        self.to.is_none()
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let to = self
            .to
            .map(|a| a.to_string())
            .unwrap_or_else(|| "create".to_string());
        write!(
            f,
            "Message {{ from: {}, to: {}, nonce: {}, gas: {}, data: {} bytes }}",
            self.from,
            to,
            self.nonce,
            self.gas_limit,
            self.data.len()
        )
    }
}
