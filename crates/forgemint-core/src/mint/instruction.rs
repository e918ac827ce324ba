//! Recognition and application of mint instructions.
//!
//! A transaction is a mint instruction if all of the following hold:
//! - its input is exactly 65 bytes: 32 bytes amount, 32 bytes burn tx hash,
//!   1 byte burn network
//! - it is sent to the mint contract address
//! - the burn network tag is known
//! - the contract account holds the predefined code
//! - the sender is the contract owner
//! - the amount does not exceed the remaining mint limit
//!
//! Anything else is not an error: the transaction is executed as an
//! ordinary call.

use super::contract::contract;
use super::event::{encode_mint_data, MINT_EVENT_TOPIC};
use super::state::MintState;
use crate::error::CoreError;
use forgemint_types::{Address, Hash, Log, U256};
use forgemint_vm::ExecutionContext;
use tracing::{debug, warn};

/// Length of a mint instruction payload.
pub const PAYLOAD_LEN: usize = 65;

/// Foreign ledger that produced the burn transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BurnNetwork {
    Ethereum = 0,
    Tron = 1,
}

impl BurnNetwork {
    pub fn tag(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for BurnNetwork {
    type Error = u8;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            0 => Ok(BurnNetwork::Ethereum),
            1 => Ok(BurnNetwork::Tron),
            other => Err(other),
        }
    }
}

impl std::fmt::Display for BurnNetwork {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BurnNetwork::Ethereum => write!(f, "ethereum"),
            BurnNetwork::Tron => write!(f, "tron"),
        }
    }
}

/// A validated mint instruction, ready to be applied once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    sender: Address,
    amount: U256,
    next_limit: U256,
    burn_tx_hash: Hash,
    burn_tx_network: BurnNetwork,
    payload: Vec<u8>,
}

impl Instruction {
    pub fn sender(&self) -> &Address {
        &self.sender
    }

    pub fn amount(&self) -> U256 {
        self.amount
    }

    /// Mint limit after this instruction is applied
    pub fn next_limit(&self) -> U256 {
        self.next_limit
    }

    pub fn burn_tx_hash(&self) -> &Hash {
        &self.burn_tx_hash
    }

    pub fn burn_tx_network(&self) -> BurnNetwork {
        self.burn_tx_network
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Move the minted amount to the owner, lower the limit and emit `Mint`.
    ///
    /// `gas` is only reported to the tracer.
    pub fn apply(self, ctx: &mut ExecutionContext<'_>, gas: u64) -> Result<(), CoreError> {
        let contract = contract();

        let nonce = ctx.state.get_nonce(&self.sender);
        let next_nonce = nonce.checked_add(1).ok_or(CoreError::NonceMax {
            address: self.sender,
            nonce,
        })?;

        ctx.state.set_state(
            &contract.address,
            contract.storage_layout.mint_limit,
            self.next_limit.to_word(),
        );
        ctx.state.set_nonce(&self.sender, next_nonce);
        ctx.state.add_balance(&self.sender, self.amount)?;

        let data = encode_mint_data(self.amount, self.burn_tx_hash, self.burn_tx_network);
        let block_number = ctx.block_number();
        ctx.state.add_log(Log::new(
            contract.address,
            vec![MINT_EVENT_TOPIC],
            data,
            block_number,
        ));

        if let Some(tracer) = ctx.tracer.as_deref_mut() {
            tracer.capture_start(
                self.sender,
                contract.address,
                false,
                &self.payload,
                gas,
                U256::ZERO,
            );
            tracer.capture_end(&[], 0, None);
        }

        debug!(
            sender = %self.sender,
            amount = %self.amount,
            limit = %self.next_limit,
            burn_tx = %self.burn_tx_hash,
            network = %self.burn_tx_network,
            "Applied mint instruction"
        );
        Ok(())
    }
}

/// Try to read a mint instruction out of a transaction.
///
/// Never mutates state. Returns `None` when the transaction is not a valid
/// mint instruction; rejections past the shape check are logged.
pub fn parse(
    ctx: &ExecutionContext<'_>,
    sender: &Address,
    receiver: &Address,
    payload: &[u8],
) -> Option<Instruction> {
    if payload.len() != PAYLOAD_LEN || *receiver != contract().address {
        return None;
    }

    let (amount_bytes, rest) = payload.split_at(32);
    let (burn_hash_bytes, network_byte) = rest.split_at(32);

    let burn_tx_network = match BurnNetwork::try_from(network_byte[0]) {
        Ok(network) => network,
        Err(tag) => {
            warn!(network = tag, "invalid burn tx network in mint instruction");
            return None;
        }
    };

    let Some(mint_state) = MintState::from_state(&*ctx.state) else {
        warn!("mint contract not found in current state");
        return None;
    };

    let owner = mint_state.owner();
    if *sender != owner {
        warn!(%sender, %owner, "transaction sender is not allowed to mint");
        return None;
    }

    let amount = U256::from_be_slice(amount_bytes).ok()?;
    let limit = mint_state.mint_limit();
    let Some(next_limit) = limit.checked_sub(&amount) else {
        warn!(%amount, %limit, "mint amount exceeds mint limit");
        return None;
    };

    Some(Instruction {
        sender: *sender,
        amount,
        next_limit,
        burn_tx_hash: Hash::from_slice(burn_hash_bytes).ok()?,
        burn_tx_network,
        payload: payload.to_vec(),
    })
}
