//! TOML configuration file parsing
//!
//! A configuration file looks like:
//!
//! ```toml
//! [simulation]
//! disk_size = "73G"
//! stripe_width = "128k"
//! threads = 4
//!
//! [strategy]
//! hash = "fnv1a"
//! generator = "mt64"
//! placement = "round-robin"
//!
//! [[scenarios]]
//! name = "wide"
//! disks = 24
//! local_groups = 3
//! local_group_size = 7
//! global_parities = 1
//! ```

use super::*;
use crate::config::cli::Cli;
use crate::config::cli_convert::{
    convert_generator_type, convert_hash_type, convert_placement_type, parse_size,
};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Parse TOML configuration file
pub fn parse_toml_file(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_toml_string(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Parse TOML configuration from string
pub fn parse_toml_string(contents: &str) -> Result<Config> {
    let config: Config = ::toml::from_str(contents)
        .context("Failed to parse TOML configuration")?;

    Ok(config)
}

/// Build the run configuration from an optional file plus CLI overrides
pub fn load_config(cli: &Cli) -> Result<Config> {
    let config = match &cli.config {
        Some(path) => parse_toml_file(path)?,
        None => Config::default(),
    };
    merge_cli_with_config(cli, config)
}

/// Merge CLI arguments with TOML configuration (CLI takes precedence)
pub fn merge_cli_with_config(cli: &Cli, mut config: Config) -> Result<Config> {
    // A scenario on the command line replaces the file's list
    if let (Some(disks), Some(local_groups), Some(local_group_size)) =
        (cli.disks, cli.local_groups, cli.local_group_size)
    {
        let global_parities = cli.global_parities.unwrap_or(0);
        let name = cli.name.clone().unwrap_or_else(|| {
            format!("{}d-{}x{}+{}", disks, local_groups, local_group_size, global_parities)
        });
        config.scenarios = vec![ScenarioConfig::new(
            name,
            disks,
            local_groups,
            local_group_size,
            global_parities,
        )];
    }

    // Override strategy
    if let Some(hash) = cli.hash {
        config.strategy.hash = convert_hash_type(hash);
    }
    if let Some(generator) = cli.generator {
        config.strategy.generator = convert_generator_type(generator);
    }
    if let Some(placement) = cli.placement {
        config.strategy.placement = convert_placement_type(placement);
    }
    if cli.matrix {
        config.strategy.matrix = true;
    }

    // Override capacity
    if let Some(ref size_str) = cli.disk_size {
        config.simulation.disk_size = parse_size(size_str).context("Invalid disk size")?;
        config.simulation.stripes = None;
    }
    if let Some(ref width_str) = cli.stripe_width {
        config.simulation.stripe_width = parse_size(width_str).context("Invalid stripe width")?;
        config.simulation.stripes = None;
    }
    if let Some(stripes) = cli.stripes {
        config.simulation.stripes = Some(stripes);
    }
    if let Some(threads) = cli.threads {
        config.simulation.threads = threads;
    }

    // Override output settings
    if let Some(ref path) = cli.json_output {
        config.output.json_output = Some(path.clone());
    }
    if cli.compact_json {
        config.output.pretty = false;
    }
    if cli.no_counters {
        config.output.show_counters = false;
    }
    if let Some(n) = cli.show_stripes {
        config.output.show_stripes = n;
    }

    // Override runtime settings
    if cli.dry_run {
        config.runtime.dry_run = true;
    }

    Ok(config)
}
