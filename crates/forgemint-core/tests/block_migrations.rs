//! Migration registry driven through the block processor.

mod common;

use common::*;
use forgemint_core::mint::{contract, MintState, MINT_EVENT_TOPIC};
use forgemint_core::{Block, BlockProcessor, MigrationRegistry};
use forgemint_state::{MemoryState, StateDB};
use forgemint_types::{ChainConfig, Hash, U256};
use forgemint_vm::{BlockContext, NullExecutor};

const ACTIVATION: u64 = 5;

fn chain_config() -> ChainConfig {
    ChainConfig::devnet().with_mint_contract(ACTIVATION, OWNER, ether(1000))
}

fn funded() -> MemoryState {
    let mut state = MemoryState::with_balances([(OWNER, U256::ETHER)]);
    state.finalise();
    state
}

#[test_log::test]
fn contract_appears_at_activation_height() {
    let config = chain_config();
    let registry = MigrationRegistry::initialize(&config).unwrap();
    let mut processor = BlockProcessor::new(&config, &registry, NullExecutor);
    let mut state = funded();

    for number in 1..ACTIVATION {
        let block = Block::new(BlockContext::for_chain(&config, number, COINBASE), vec![]);
        processor.process(&block, &mut state, "import").unwrap();
        assert!(MintState::from_state(&state).is_none(), "block {number}");
    }

    let block = Block::new(BlockContext::for_chain(&config, ACTIVATION, COINBASE), vec![]);
    processor.process(&block, &mut state, "import").unwrap();

    let mint_state = MintState::from_state(&state).unwrap();
    assert_eq!(mint_state.owner(), OWNER);
    assert_eq!(mint_state.mint_limit(), ether(1000));
    assert_eq!(state.get_code_hash(&contract().address), contract().bytecode_hash);
}

#[test_log::test]
fn mint_in_activation_block() {
    let config = chain_config();
    let registry = MigrationRegistry::initialize(&config).unwrap();
    let mut processor = BlockProcessor::new(&config, &registry, NullExecutor);
    let mut state = funded();

    let block = Block::new(
        BlockContext::for_chain(&config, ACTIVATION, COINBASE),
        vec![mint_message(OWNER, 0, 130_000, mint_payload(ether(500), burn_tx_hash(), 0))],
    );
    let outcome = processor.process(&block, &mut state, "mining").unwrap();

    assert_eq!(outcome.gas_used, 121_716);
    let receipt = &outcome.receipts[0];
    assert!(receipt.is_success());
    assert_eq!(receipt.logs.len(), 1);
    assert_eq!(receipt.logs[0].topics, vec![MINT_EVENT_TOPIC]);
    assert_eq!(receipt.logs[0].block_number, ACTIVATION);
    assert_eq!(mint_limit(&state), ether(500));
}

#[test_log::test]
fn mint_before_activation_is_plain_transfer() {
    let config = chain_config();
    let registry = MigrationRegistry::initialize(&config).unwrap();
    let mut processor = BlockProcessor::new(&config, &registry, NullExecutor);
    let mut state = funded();

    let block = Block::new(
        BlockContext::for_chain(&config, ACTIVATION - 1, COINBASE),
        vec![mint_message(OWNER, 0, 130_000, mint_payload(ether(500), burn_tx_hash(), 0))],
    );
    let outcome = processor.process(&block, &mut state, "import").unwrap();

    assert!(outcome.receipts[0].is_success());
    assert!(outcome.receipts[0].logs.is_empty());
    assert!(state.get_balance(&OWNER) < U256::ETHER);
}

#[test_log::test]
fn replaying_activation_height_reapplies() {
    let config = chain_config();
    let registry = MigrationRegistry::initialize(&config).unwrap();
    let mut state = funded();

    registry.execute(ACTIVATION, &mut state, "import");
    state.finalise();

    // Lower the limit, then replay the height: the configured limit comes back
    let c = contract();
    state.set_state(&c.address, c.storage_layout.mint_limit, U256::ONE.to_word());
    state.finalise();
    registry.execute(ACTIVATION, &mut state, "replay");

    assert_eq!(mint_limit(&state), ether(1000));
    assert_eq!(state.journal().len(), 3);
}

#[test_log::test]
fn independent_nodes_agree_on_state_root() {
    let config = chain_config();
    let registry = MigrationRegistry::initialize(&config).unwrap();

    let mut roots = Vec::new();
    for source in ["node-a", "node-b"] {
        let mut state = funded();
        registry.execute(ACTIVATION, &mut state, source);
        state.finalise();
        roots.push(state.state_root().unwrap());
    }

    assert_eq!(roots[0], roots[1]);
    assert_ne!(roots[0], Hash::ZERO);
}
