use super::contract::{contract, MintContract};
use forgemint_state::StateDB;
use forgemint_types::{Address, Hash, U256};

/// Read-only view of the mint contract storage.
///
/// Only exists when the contract account holds the expected code; values
/// are read from the state store on every call.
pub struct MintState<'a> {
    state: &'a dyn StateDB,
    contract: &'static MintContract,
}

impl<'a> MintState<'a> {
    /// Returns `None` if the contract code hash differs from the predefined one.
    pub fn from_state(state: &'a dyn StateDB) -> Option<Self> {
        let contract = contract();
        if state.get_code_hash(&contract.address) != contract.bytecode_hash {
            return None;
        }
        Some(Self { state, contract })
    }

    pub fn owner(&self) -> Address {
        Address::from_word(&self.slot(&self.contract.storage_layout.owner))
    }

    pub fn mint_limit(&self) -> U256 {
        U256::from_word(&self.slot(&self.contract.storage_layout.mint_limit))
    }

    fn slot(&self, key: &Hash) -> Hash {
        self.state.get_state(&self.contract.address, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forgemint_state::MemoryState;

    fn installed(owner: Address, limit: U256) -> MemoryState {
        let c = contract();
        let mut state = MemoryState::new();
        state.set_code(&c.address, c.bytecode.clone());
        state.set_state(&c.address, c.storage_layout.owner, owner.to_word());
        state.set_state(&c.address, c.storage_layout.mint_limit, limit.to_word());
        state
    }

    #[test]
    fn test_missing_contract() {
        let state = MemoryState::new();
        assert!(MintState::from_state(&state).is_none());
    }

    #[test]
    fn test_wrong_code() {
        let mut state = MemoryState::new();
        state.set_code(&contract().address, vec![0x00]);
        assert!(MintState::from_state(&state).is_none());
    }

    #[test]
    fn test_reads_owner_and_limit() {
        let owner = Address::from_bytes([0xaa; 20]);
        let state = installed(owner, U256::from(1000u64));
        let mint = MintState::from_state(&state).unwrap();
        assert_eq!(mint.owner(), owner);
        assert_eq!(mint.mint_limit(), U256::from(1000u64));
    }

    #[test]
    fn test_reads_are_fresh() {
        let owner = Address::from_bytes([0xaa; 20]);
        let mut state = installed(owner, U256::from(1000u64));
        {
            let mint = MintState::from_state(&state).unwrap();
            assert_eq!(mint.mint_limit(), U256::from(1000u64));
        }
        let c = contract();
        state.set_state(&c.address, c.storage_layout.mint_limit, U256::from(1u64).to_word());
        let mint = MintState::from_state(&state).unwrap();
        assert_eq!(mint.mint_limit(), U256::ONE);
    }
}
