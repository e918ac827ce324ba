//! Node configuration.
//!
//! A node config is a TOML file with a `[chain]` table (the consensus
//! parameters every node must agree on) and a `[logging]` table.

use forgemint_types::ChainConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Node configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    /// Node name, shown in logs
    pub name: String,
    /// Chain parameters
    pub chain: ChainConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            name: "forgemint-node".to_string(),
            chain: ChainConfig::devnet(),
            logging: LoggingConfig::default(),
        }
    }
}

impl NodeConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e))?;
        let config: NodeConfig = toml::from_str(&contents)
            .map_err(|e| anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e))?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn to_file(&self, path: &Path) -> anyhow::Result<()> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)
            .map_err(|e| anyhow::anyhow!("Failed to write config file '{}': {}", path.display(), e))?;
        Ok(())
    }

    /// Validate node-level settings.
    ///
    /// Fork parameters are checked when the migration registry is built.
    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.chain.is_valid_chain_id() {
            anyhow::bail!("Chain ID cannot be 0");
        }

        if self.chain.gas_limit == 0 {
            anyhow::bail!("Block gas limit cannot be 0");
        }

        if let Err(e) = EnvFilter::try_new(&self.logging.level) {
            anyhow::bail!("Invalid log level '{}': {}", self.logging.level, e);
        }

        Ok(())
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `info` or `forgemint_core=debug`
    pub level: String,
    /// Log to file instead of stdout
    pub log_file: Option<PathBuf>,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            log_file: None,
            format: LogFormat::Pretty,
        }
    }
}
