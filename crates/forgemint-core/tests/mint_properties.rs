//! Property tests for mint instruction recognition.

mod common;

use common::*;
use forgemint_core::mint::{contract, parse};
use forgemint_types::{Address, Hash, U256};
use forgemint_vm::{BlockContext, ExecutionContext};
use proptest::prelude::*;

fn parse_amount(limit: u128, amount: u128) -> Option<U256> {
    let mut state = prepared_state(U256::from(limit));
    let block = BlockContext::new(BLOCK_NUMBER, COINBASE);
    let ctx = ExecutionContext::new(&block, &mut state);
    let data = mint_payload(U256::from(amount), Hash::ZERO, 0);
    parse(&ctx, &OWNER, &contract().address, &data).map(|ix| ix.next_limit())
}

proptest! {
    #[test]
    fn amount_within_limit_lowers_limit(amount in any::<u128>(), headroom in any::<u128>()) {
        let limit = amount.saturating_add(headroom);
        prop_assert_eq!(parse_amount(limit, amount), Some(U256::from(limit - amount)));
    }

    #[test]
    fn amount_over_limit_is_rejected(limit in 0u128..u128::MAX, excess in 1u128..1_000_000) {
        let amount = limit.saturating_add(excess);
        prop_assume!(amount > limit);
        prop_assert!(parse_amount(limit, amount).is_none());
    }

    #[test]
    fn wrong_length_is_rejected(data in proptest::collection::vec(any::<u8>(), 0..130)) {
        prop_assume!(data.len() != 65);
        let mut state = prepared_state(U256::MAX);
        let block = BlockContext::new(BLOCK_NUMBER, COINBASE);
        let ctx = ExecutionContext::new(&block, &mut state);
        prop_assert!(parse(&ctx, &OWNER, &contract().address, &data).is_none());
    }

    #[test]
    fn other_receivers_are_rejected(receiver in any::<[u8; 20]>()) {
        let receiver = Address::from_bytes(receiver);
        prop_assume!(receiver != contract().address);
        let mut state = prepared_state(U256::MAX);
        let block = BlockContext::new(BLOCK_NUMBER, COINBASE);
        let ctx = ExecutionContext::new(&block, &mut state);
        let data = mint_payload(U256::ONE, Hash::ZERO, 0);
        prop_assert!(parse(&ctx, &OWNER, &receiver, &data).is_none());
    }

    #[test]
    fn non_owner_is_rejected(sender in any::<[u8; 20]>(), amount in any::<u128>()) {
        let sender = Address::from_bytes(sender);
        prop_assume!(sender != OWNER);
        let mut state = prepared_state(U256::MAX);
        let block = BlockContext::new(BLOCK_NUMBER, COINBASE);
        let ctx = ExecutionContext::new(&block, &mut state);
        let data = mint_payload(U256::from(amount), Hash::ZERO, 0);
        prop_assert!(parse(&ctx, &sender, &contract().address, &data).is_none());
    }

    #[test]
    fn unknown_network_is_rejected(tag in 2u8..=255, amount in any::<u128>()) {
        let mut state = prepared_state(U256::MAX);
        let block = BlockContext::new(BLOCK_NUMBER, COINBASE);
        let ctx = ExecutionContext::new(&block, &mut state);
        let data = mint_payload(U256::from(amount), burn_tx_hash(), tag);
        prop_assert!(parse(&ctx, &OWNER, &contract().address, &data).is_none());
    }
}
