//! Migration schedule resolved from a chain config.

use forgemint_core::{Migration, MigrationRegistry, MintContractMigration};
use forgemint_state::{MemoryState, StateDB};
use forgemint_types::{ChainConfig, Hash};
use serde::Serialize;

/// One scheduled migration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedMigration {
    pub height: u64,
    pub name: String,
    /// State root of an empty chain after every migration up to this
    /// height; filled by [`simulate`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_root: Option<Hash>,
}

/// Build the registry for `config` and list its migrations in execution
/// order. Fails on a broken fork configuration.
pub fn resolve(config: &ChainConfig) -> anyhow::Result<(MigrationRegistry, Vec<PlannedMigration>)> {
    let registry = MigrationRegistry::initialize(config)?;

    let by_ref = &registry;
    let planned = by_ref
        .heights()
        .flat_map(move |height| {
            by_ref.at(height).iter().map(move |m| PlannedMigration {
                height,
                name: m.name().to_string(),
                state_root: None,
            })
        })
        .collect();

    Ok((registry, planned))
}

/// Run the registry height by height on an empty state and record the
/// resulting root next to each migration.
pub fn simulate(registry: &MigrationRegistry, planned: &mut [PlannedMigration]) -> anyhow::Result<()> {
    let mut state = MemoryState::new();

    for height in registry.heights() {
        registry.execute(height, &mut state, "simulate");
        state.finalise();
        let root = state.state_root()?;

        for entry in planned.iter_mut().filter(|p| p.height == height) {
            entry.state_root = Some(root);
        }
    }

    Ok(())
}

/// Human-readable mint fork summary, if the fork is scheduled.
pub fn describe_mint_fork(config: &ChainConfig) -> anyhow::Result<Option<String>> {
    Ok(MintContractMigration::from_config(config)?.map(|m| {
        format!(
            "mint contract at block {}: owner {}, limit {} wei",
            m.block(),
            m.owner(),
            m.mint_limit()
        )
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use forgemint_types::{Address, U256};

    #[test]
    fn test_resolve_empty() {
        let (registry, planned) = resolve(&ChainConfig::mainnet()).unwrap();
        assert!(registry.is_empty());
        assert!(planned.is_empty());
    }

    #[test]
    fn test_resolve_mint_fork() {
        let owner = Address::from_bytes([0x42; 20]);
        let config = ChainConfig::devnet().with_mint_contract(64, owner, U256::ETHER);
        let (_, planned) = resolve(&config).unwrap();

        assert_eq!(
            planned,
            vec![PlannedMigration {
                height: 64,
                name: "mint contract initialization".to_string(),
                state_root: None,
            }]
        );
    }

    #[test]
    fn test_resolve_broken_fork() {
        let config = ChainConfig::devnet().with_mint_contract(64, Address::ZERO, U256::ETHER);
        let err = resolve(&config).unwrap_err();
        assert!(err.to_string().contains("owner address is not specified"));
    }

    #[test]
    fn test_simulate_is_deterministic() {
        let owner = Address::from_bytes([0x42; 20]);
        let config = ChainConfig::devnet().with_mint_contract(64, owner, U256::ETHER);

        let (registry, mut first) = resolve(&config).unwrap();
        simulate(&registry, &mut first).unwrap();
        let (registry, mut second) = resolve(&config).unwrap();
        simulate(&registry, &mut second).unwrap();

        assert!(first[0].state_root.is_some());
        assert_eq!(first, second);
    }

    #[test]
    fn test_describe_mint_fork() {
        assert_eq!(describe_mint_fork(&ChainConfig::mainnet()).unwrap(), None);

        let owner = Address::from_bytes([0x42; 20]);
        let config = ChainConfig::devnet().with_mint_contract(64, owner, U256::from(5u64));
        let text = describe_mint_fork(&config).unwrap().unwrap();
        assert!(text.starts_with("mint contract at block 64"));
        assert!(text.ends_with("limit 5 wei"));
    }
}
