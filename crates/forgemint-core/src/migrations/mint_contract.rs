use super::Migration;
use crate::error::MigrationError;
use crate::mint::contract;
use forgemint_state::StateDB;
use forgemint_types::{Address, ChainConfig, U256};

/// Installs the mint contract with its owner and initial mint limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintContractMigration {
    block: u64,
    owner: Address,
    mint_limit: U256,
}

impl MintContractMigration {
    pub const NAME: &'static str = "mint contract initialization";

    pub fn new(block: u64, owner: Address, mint_limit: U256) -> Self {
        Self {
            block,
            owner,
            mint_limit,
        }
    }

    /// `Ok(None)` when the fork is not scheduled, an error when it is
    /// scheduled with an unusable owner or limit.
    pub fn from_config(config: &ChainConfig) -> Result<Option<Self>, MigrationError> {
        let Some(mint) = config.mint_contract.as_ref() else {
            return Ok(None);
        };
        let Some(block) = mint.activation_block else {
            return Ok(None);
        };

        let owner = match mint.owner_address {
            Some(owner) if !owner.is_zero() => owner,
            _ => return Err(MigrationError::OwnerNotSpecified),
        };
        let mint_limit = mint.mint_limit.ok_or(MigrationError::MintLimitNotSpecified)?;

        Ok(Some(Self::new(block, owner, mint_limit)))
    }

    pub fn owner(&self) -> &Address {
        &self.owner
    }

    pub fn mint_limit(&self) -> U256 {
        self.mint_limit
    }
}

impl Migration for MintContractMigration {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn block(&self) -> u64 {
        self.block
    }

    fn execute(&self, state: &mut dyn StateDB) {
        let contract = contract();
        state.set_code(&contract.address, contract.bytecode.clone());
        state.set_state(&contract.address, contract.storage_layout.owner, self.owner.to_word());
        state.set_state(
            &contract.address,
            contract.storage_layout.mint_limit,
            self.mint_limit.to_word(),
        );
    }
}
