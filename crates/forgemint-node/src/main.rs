//! Forgemint node tool.
//!
//! Loads a node configuration, validates the chain parameters and prints
//! the state migrations the chain will run, optionally simulating them on
//! an empty state to show the resulting state roots.

pub mod config;
pub mod plan;
pub mod telemetry;

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::{error, info};

/// Output format for the migration schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Output {
    Text,
    Json,
}

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "forgemint-node")]
#[command(about = "Forgemint chain configuration checker")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Args {
    /// Config file path
    #[arg(short, long, value_name = "FILE", env = "FORGEMINT_CONFIG")]
    config: Option<PathBuf>,

    /// Override the configured log level
    #[arg(short, long)]
    log_level: Option<String>,

    /// Log as JSON
    #[arg(long)]
    json_logs: bool,

    /// Run every migration on an empty state and report state roots
    #[arg(long)]
    simulate: bool,

    /// Write the effective configuration, CLI overrides included, to FILE
    #[arg(long, value_name = "FILE")]
    write_config: Option<PathBuf>,

    /// Schedule output format
    #[arg(long, value_enum, default_value = "text")]
    output: Output,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => config::NodeConfig::from_file(path)?,
        None => config::NodeConfig::default(),
    };

    // Override with CLI args
    if let Some(level) = args.log_level {
        config.logging.level = level;
    }
    if args.json_logs {
        config.logging.format = config::LogFormat::Json;
    }

    config.validate()?;
    telemetry::init(&config.logging)?;

    match &args.config {
        Some(path) => info!(path = %path.display(), "Loaded configuration"),
        None => info!("Using default configuration"),
    }
    info!(
        name = %config.name,
        chain_id = config.chain.chain_id,
        gas_limit = config.chain.gas_limit,
        "Chain parameters"
    );
    if let Some(collector) = &config.chain.fee_collector {
        info!(%collector, "Fees go to collector");
    }

    let (registry, mut planned) = match plan::resolve(&config.chain) {
        Ok(resolved) => resolved,
        Err(e) => {
            error!("Invalid fork configuration: {}", e);
            return Err(e);
        }
    };
    if let Some(summary) = plan::describe_mint_fork(&config.chain)? {
        info!("{}", summary);
    }

    if let Some(path) = &args.write_config {
        config.to_file(path)?;
        info!(path = %path.display(), "Wrote configuration");
    }

    if args.simulate {
        plan::simulate(&registry, &mut planned)?;
    }

    match args.output {
        Output::Json => println!("{}", serde_json::to_string_pretty(&planned)?),
        Output::Text => print_schedule(&planned),
    }

    Ok(())
}

fn print_schedule(planned: &[plan::PlannedMigration]) {
    if planned.is_empty() {
        println!("No state migrations scheduled");
        return;
    }

    println!("{:>10}  migration", "height");
    for entry in planned {
        match &entry.state_root {
            Some(root) => println!("{:>10}  {} (root {})", entry.height, entry.name, root),
            None => println!("{:>10}  {}", entry.height, entry.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_args() {
        let args = Args::parse_from([
            "forgemint-node",
            "--config",
            "node.toml",
            "--simulate",
            "--output",
            "json",
        ]);

        assert_eq!(args.config, Some(PathBuf::from("node.toml")));
        assert!(args.simulate);
        assert_eq!(args.output, Output::Json);
        assert!(!args.json_logs);
        assert!(args.log_level.is_none());
    }

    #[test]
    fn test_cli_defaults() {
        let args = Args::parse_from(["forgemint-node"]);
        assert!(!args.simulate);
        assert!(args.write_config.is_none());
        assert_eq!(args.output, Output::Text);
    }
}
