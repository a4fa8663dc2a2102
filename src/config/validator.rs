//! Configuration validation

use super::*;
use anyhow::{Context, Result};
use std::collections::HashSet;

/// Upper bound on rendered stripes per run
const MAX_SHOW_STRIPES: usize = 1000;

/// Validate complete configuration
pub fn validate_config(config: &Config) -> Result<()> {
    validate_simulation(config)?;
    validate_scenarios(&config.scenarios)?;
    validate_output(&config.output)?;

    Ok(())
}

/// Validate capacity and execution settings
pub fn validate_simulation(config: &Config) -> Result<()> {
    let sim = &config.simulation;

    if sim.stripes.is_none() {
        if sim.stripe_width == 0 {
            anyhow::bail!("stripe_width must be greater than 0");
        }
        if sim.disk_size < sim.stripe_width {
            anyhow::bail!(
                "disk_size ({} bytes) is smaller than stripe_width ({} bytes)",
                sim.disk_size,
                sim.stripe_width
            );
        }
        if sim.disk_size % sim.stripe_width != 0 {
            tracing::warn!(
                disk_size = sim.disk_size,
                stripe_width = sim.stripe_width,
                "disk_size is not a multiple of stripe_width; the remainder is ignored"
            );
        }
    }

    if config.stripe_count() == 0 {
        anyhow::bail!("stripe count must be greater than 0");
    }

    Ok(())
}

/// Validate scenario list
pub fn validate_scenarios(scenarios: &[ScenarioConfig]) -> Result<()> {
    if scenarios.is_empty() {
        anyhow::bail!("at least one scenario is required");
    }

    let mut names = HashSet::new();
    for scenario in scenarios {
        if scenario.name.trim().is_empty() {
            anyhow::bail!("scenario names must not be empty");
        }
        if !names.insert(scenario.name.as_str()) {
            anyhow::bail!("duplicate scenario name: {}", scenario.name);
        }
        scenario
            .stripe_config()
            .with_context(|| format!("scenario '{}'", scenario.name))?;
    }

    Ok(())
}

/// Validate output configuration
pub fn validate_output(output: &OutputConfig) -> Result<()> {
    if output.show_stripes > MAX_SHOW_STRIPES {
        anyhow::bail!(
            "show_stripes must be at most {}, got {}",
            MAX_SHOW_STRIPES,
            output.show_stripes
        );
    }

    if let Some(ref path) = output.json_output {
        if path.is_dir() {
            anyhow::bail!("json_output must be a file path, got directory {}", path.display());
        }
    }

    Ok(())
}
