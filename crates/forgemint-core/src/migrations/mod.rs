//! Height-triggered state migrations.
//!
//! A migration is a one-off state change applied at a fixed block height,
//! the way a hard fork would be. Heights come from the chain configuration,
//! so every node running the same configuration changes state at the same
//! block.

pub mod mint_contract;

pub use mint_contract::MintContractMigration;

use crate::error::CoreError;
use forgemint_state::StateDB;
use forgemint_types::ChainConfig;
use std::collections::BTreeMap;
use tracing::info;

/// A single state migration.
pub trait Migration: Send + Sync {
    /// Human-readable name, used in logs
    fn name(&self) -> &str;

    /// Block height the migration runs at
    fn block(&self) -> u64;

    /// Apply the state changes
    fn execute(&self, state: &mut dyn StateDB);
}

/// Migrations grouped by the height they run at.
///
/// Within a height, migrations run in registration order. The registry does
/// not remember what it has executed: running the same height twice applies
/// the migrations twice.
#[derive(Default)]
pub struct MigrationRegistry {
    by_height: BTreeMap<u64, Vec<Box<dyn Migration>>>,
}

impl MigrationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the registry from chain configuration.
    ///
    /// Migrations whose configuration is absent are skipped. A present but
    /// broken configuration is an error; the node must not start with it.
    pub fn initialize(config: &ChainConfig) -> Result<Self, CoreError> {
        let mut registry = Self::new();

        if let Some(migration) = MintContractMigration::from_config(config)? {
            registry.append(Box::new(migration));
        }

        Ok(registry)
    }

    /// Register a migration after those already registered at its height.
    pub fn append(&mut self, migration: Box<dyn Migration>) {
        self.by_height
            .entry(migration.block())
            .or_default()
            .push(migration);
    }

    /// Run every migration registered at `height`. `source` names the caller
    /// in logs.
    pub fn execute(&self, height: u64, state: &mut dyn StateDB, source: &str) {
        let Some(migrations) = self.by_height.get(&height) else {
            return;
        };

        for migration in migrations {
            info!(
                name = migration.name(),
                height,
                source,
                "Executing state migration"
            );
            migration.execute(state);
        }
    }

    /// Migrations registered at `height`, in execution order
    pub fn at(&self, height: u64) -> &[Box<dyn Migration>] {
        self.by_height
            .get(&height)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Heights with at least one migration, ascending
    pub fn heights(&self) -> impl Iterator<Item = u64> + '_ {
        self.by_height.keys().copied()
    }

    /// Total number of registered migrations
    pub fn len(&self) -> usize {
        self.by_height.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_height.is_empty()
    }
}

impl std::fmt::Debug for MigrationRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for (height, migrations) in &self.by_height {
            let names: Vec<&str> = migrations.iter().map(|m| m.name()).collect();
            map.entry(height, &names);
        }
        map.finish()
    }
}
