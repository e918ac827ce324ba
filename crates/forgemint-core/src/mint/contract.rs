//! The predefined mint contract.

use forgemint_types::{Address, Hash};
use once_cell::sync::Lazy;

/// Address the mint contract is installed at.
pub const MINT_CONTRACT_ADDRESS: Address = Address::from_bytes([
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0x10, 0x01,
]);

/// Runtime code of the mint contract.
///
/// Hand-assembled, not compiler output: a chain that deployed a compiled
/// contract has different code at this address, and its code hash will not
/// match [`MintContract::bytecode_hash`]. Nodes only agree on minting if they
/// install this exact image, so changing a byte here is a hard fork.
///
/// Exposes the two read-only getters `owner()` (selector `0x8da5cb5b`,
/// returns slot 0) and `mintLimit()` (selector `0x996517cf`, returns slot 1)
/// and reverts on any other input. Minting itself never reaches this code.
const MINT_CONTRACT_BYTECODE: [u8; 56] = [
    0x60, 0x00, 0x35, 0x60, 0xe0, 0x1c, 0x80, 0x63, 0x8d, 0xa5, 0xcb, 0x5b, 0x14, 0x61, 0x00,
    0x20, 0x57, 0x80, 0x63, 0x99, 0x65, 0x17, 0xcf, 0x14, 0x61, 0x00, 0x2c, 0x57, 0x60, 0x00,
    0x80, 0xfd, 0x5b, 0x60, 0x00, 0x54, 0x60, 0x00, 0x52, 0x60, 0x20, 0x60, 0x00, 0xf3, 0x5b,
    0x60, 0x01, 0x54, 0x60, 0x00, 0x52, 0x60, 0x20, 0x60, 0x00, 0xf3,
];

/// Storage slots used by the mint contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageLayout {
    /// Owner address, left-padded to 32 bytes
    pub owner: Hash,
    /// Remaining mint limit, 32-byte big-endian
    pub mint_limit: Hash,
}

/// Static description of the mint contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintContract {
    pub address: Address,
    pub bytecode: Vec<u8>,
    /// keccak-256 of `bytecode`
    pub bytecode_hash: Hash,
    pub storage_layout: StorageLayout,
}

impl MintContract {
    fn predefined() -> Self {
        let bytecode = MINT_CONTRACT_BYTECODE.to_vec();
        Self {
            address: MINT_CONTRACT_ADDRESS,
            bytecode_hash: Hash::compute(&bytecode),
            bytecode,
            storage_layout: StorageLayout {
                owner: Hash::ZERO,
                mint_limit: Hash::from_low_u64_be(1),
            },
        }
    }
}

static CONTRACT: Lazy<MintContract> = Lazy::new(MintContract::predefined);

/// The process-wide mint contract descriptor.
pub fn contract() -> &'static MintContract {
    &CONTRACT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytecode_hash_matches_bytecode() {
        let c = contract();
        assert_eq!(c.bytecode_hash, Hash::compute(&c.bytecode));
        assert_eq!(
            c.bytecode_hash.to_string(),
            "0x903b941a2ed92532a966e97de86e9817357ebea68467b070529fc5e1a683ba36"
        );
    }

    #[test]
    fn test_bytecode_dispatches_getters() {
        let code = &contract().bytecode;
        let has = |needle: &[u8]| code.windows(needle.len()).any(|w| w == needle);

        // PUSH4 <selector>
        assert!(has(&[0x63, 0x8d, 0xa5, 0xcb, 0x5b]));
        assert!(has(&[0x63, 0x99, 0x65, 0x17, 0xcf]));
        // SLOAD of slot 0 and slot 1
        assert!(has(&[0x60, 0x00, 0x54]));
        assert!(has(&[0x60, 0x01, 0x54]));
        // PUSH1 0 DUP1 REVERT for unknown selectors
        assert!(has(&[0x60, 0x00, 0x80, 0xfd]));
        assert_eq!(code.last(), Some(&0xf3));
    }

    #[test]
    fn test_contract_address() {
        assert_eq!(
            contract().address.to_string(),
            "0x0000000000000000000000000000000000001001"
        );
    }

    #[test]
    fn test_storage_layout() {
        let layout = contract().storage_layout;
        assert!(layout.owner.is_zero());
        assert_eq!(layout.mint_limit.as_bytes()[31], 1);
        assert_ne!(layout.owner, layout.mint_limit);
    }

    #[test]
    fn test_descriptor_is_singleton() {
        assert!(std::ptr::eq(contract(), contract()));
    }
}
