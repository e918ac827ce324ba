use crate::hash::Hash;
use crate::u256::U256;
use std::fmt;

/// On-chain account header. Code and storage live beside it in the state store.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "borsh", derive(borsh::BorshSerialize, borsh::BorshDeserialize))]
pub struct Account {
    /// Transaction count (nonce)
    pub nonce: u64,
    /// Balance in wei
    pub balance: U256,
    /// keccak256 of the account code (`Hash::KECCAK_EMPTY` when there is none)
    pub code_hash: Hash,
}

impl Default for Account {
    fn default() -> Self {
        Self {
            nonce: 0,
            balance: U256::ZERO,
            code_hash: Hash::KECCAK_EMPTY,
        }
    }
}

impl Account {
    /// Check if account has code deployed
    pub fn has_code(&self) -> bool {
        self.code_hash != Hash::KECCAK_EMPTY
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Account {{ nonce: {}, balance: {}, code_hash: {} }}",
            self.nonce, self.balance, self.code_hash
        )
    }
}
