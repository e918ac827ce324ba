//! Shared fixtures for the forgemint-core integration tests.

#![allow(dead_code)]

use forgemint_core::mint::contract;
use forgemint_core::{CoreError, ExecutionOutcome, StateTransition};
use forgemint_state::{MemoryState, StateDB};
use forgemint_types::{Address, ChainConfig, Hash, Message, U256};
use forgemint_vm::{BlockContext, ExecutionContext, NullExecutor, Tracer};

pub const OWNER: Address = Address::from_bytes([0x0a; 20]);
pub const STRANGER: Address = Address::from_bytes([0x0b; 20]);
pub const COINBASE: Address = Address::from_bytes([0xcb; 20]);
pub const BLOCK_NUMBER: u64 = 100;

pub fn ether(n: u64) -> U256 {
    U256::from(n) * U256::ETHER
}

pub fn burn_tx_hash() -> Hash {
    "0x621c759718a44e19ad04f8d133746b1043a2004f3fd68028cd28f1598388106e"
        .parse()
        .unwrap()
}

/// Mint contract installed for `OWNER` with `limit`, owner funded with 1 ether.
pub fn prepared_state(limit: U256) -> MemoryState {
    let c = contract();
    let mut state = MemoryState::with_balances([(OWNER, U256::ETHER)]);
    state.set_code(&c.address, c.bytecode.clone());
    state.set_state(&c.address, c.storage_layout.owner, OWNER.to_word());
    state.set_state(&c.address, c.storage_layout.mint_limit, limit.to_word());
    state.finalise();
    state
}

pub fn mint_payload(amount: U256, burn: Hash, network: u8) -> Vec<u8> {
    let mut data = amount.to_word().as_bytes().to_vec();
    data.extend_from_slice(burn.as_bytes());
    data.push(network);
    data
}

pub fn mint_message(from: Address, nonce: u64, gas_limit: u64, data: Vec<u8>) -> Message {
    Message::call(from, contract().address, nonce, gas_limit, U256::GWEI).with_data(data)
}

pub fn mint_limit(state: &MemoryState) -> U256 {
    let c = contract();
    U256::from_word(&state.get_state(&c.address, &c.storage_layout.mint_limit))
}

pub fn apply(
    state: &mut MemoryState,
    config: &ChainConfig,
    msg: &Message,
    tracer: Option<&mut dyn Tracer>,
) -> Result<ExecutionOutcome, CoreError> {
    let block = BlockContext::new(BLOCK_NUMBER, COINBASE);
    let mut ctx = ExecutionContext::new(&block, state);
    if let Some(tracer) = tracer {
        ctx = ctx.with_tracer(tracer);
    }
    StateTransition::new(config).apply_message(&mut ctx, &mut NullExecutor, msg)
}
