//! ABI encoding of the `Mint` event.

use super::instruction::BurnNetwork;
use alloy_primitives::B256;
use alloy_sol_types::{sol, SolEvent};
use forgemint_types::{Hash, U256};

sol! {
    event Mint(uint256 amount, bytes32 burnTxHash, uint8 burnTxNetwork);
}

/// `keccak256("Mint(uint256,bytes32,uint8)")`
pub const MINT_EVENT_TOPIC: Hash = Hash::from_bytes(Mint::SIGNATURE_HASH.0);

/// Three static words.
pub const MINT_EVENT_DATA_LEN: usize = 96;

/// ABI-encode the non-indexed `Mint` event fields.
///
/// # Panics
///
/// If the encoder produces anything but three words. The tuple is fully
/// static, so this only happens if the event definition above is broken.
pub fn encode_mint_data(amount: U256, burn_tx_hash: Hash, network: BurnNetwork) -> Vec<u8> {
    let event = Mint {
        amount: alloy_primitives::U256::from_be_bytes(amount.to_be_bytes()),
        burnTxHash: B256::from(*burn_tx_hash.as_bytes()),
        burnTxNetwork: network.tag(),
    };
    let data = event.encode_data();
    assert_eq!(
        data.len(),
        MINT_EVENT_DATA_LEN,
        "failed to pack Mint event data: unexpected length {}",
        data.len()
    );
    data
}
