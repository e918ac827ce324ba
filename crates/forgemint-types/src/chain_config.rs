use crate::address::Address;
use crate::u256::U256;

/// Chain-level configuration parameters.
///
/// Every node on a network must run with the same values: the fork
/// parameters below decide when state migrations fire.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct ChainConfig {
    pub chain_id: u64,

    /// Block gas limit
    pub gas_limit: u64,

    /// Receives transaction fees instead of the block coinbase when set
    pub fee_collector: Option<Address>,

    /// Bridge-mint contract fork; `None` disables the feature
    pub mint_contract: Option<MintContractConfig>,
}

/// Parameters of the mint contract bootstrap fork.
///
/// All fields are optional so that a partially written section still
/// deserializes; the migration decides whether it is usable.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct MintContractConfig {
    /// Height at which the contract is installed
    pub activation_block: Option<u64>,
    /// Only account allowed to mint
    pub owner_address: Option<Address>,
    /// Initial mint quota in wei
    pub mint_limit: Option<U256>,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self::mainnet()
    }
}

impl ChainConfig {
    /// Mainnet configuration, mint fork not scheduled
    pub fn mainnet() -> Self {
        Self {
            chain_id: 1,
            gas_limit: 30_000_000,
            fee_collector: None,
            mint_contract: None,
        }
    }

    /// Local development configuration
    pub fn devnet() -> Self {
        Self {
            chain_id: 1337,
            ..Self::mainnet()
        }
    }

    /// Schedule the mint contract fork
    pub fn with_mint_contract(mut self, activation_block: u64, owner: Address, limit: U256) -> Self {
        self.mint_contract = Some(MintContractConfig {
            activation_block: Some(activation_block),
            owner_address: Some(owner),
            mint_limit: Some(limit),
        });
        self
    }

    /// Route fees to a dedicated collector
    pub fn with_fee_collector(mut self, collector: Address) -> Self {
        self.fee_collector = Some(collector);
        self
    }

    /// Check if chain ID is valid
    pub fn is_valid_chain_id(&self) -> bool {
        self.chain_id != 0
    }
}
