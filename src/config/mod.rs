//! Configuration module
//!
//! Handles CLI argument parsing, TOML configuration files, and validation.

pub mod cli;
pub mod cli_convert;
pub mod toml;
pub mod validator;

use crate::error::SimError;
use crate::generator::GeneratorKind;
use crate::hash::HashKind;
use crate::layout::StripeConfig;
use crate::placement::PlacementPolicy;
use crate::simulation::Strategy;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::PathBuf;

const KB: u64 = 1024;
const GB: u64 = 1024 * 1024 * 1024;

/// Complete simulation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub strategy: StrategyConfig,
    #[serde(default = "default_scenarios")]
    pub scenarios: Vec<ScenarioConfig>,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub runtime: RuntimeConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            strategy: StrategyConfig::default(),
            scenarios: default_scenarios(),
            output: OutputConfig::default(),
            runtime: RuntimeConfig::default(),
        }
    }
}

impl Config {
    /// Number of stripes each run simulates
    ///
    /// An explicit `stripes` wins; otherwise one disk's capacity divided by
    /// the stripe width.
    pub fn stripe_count(&self) -> u64 {
        match self.simulation.stripes {
            Some(n) => n,
            None if self.simulation.stripe_width == 0 => 0,
            None => self.simulation.disk_size / self.simulation.stripe_width,
        }
    }

    /// Strategy tuples to run for every scenario
    pub fn strategies(&self) -> Vec<Strategy> {
        if self.strategy.matrix {
            Strategy::matrix(self.strategy.placement)
        } else {
            vec![self.strategy.selected()]
        }
    }

    /// Worker threads, resolving 0 to the number of CPUs
    pub fn threads(&self) -> usize {
        match self.simulation.threads {
            0 => num_cpus::get(),
            n => n,
        }
    }
}

/// Capacity and execution settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Capacity of one disk in bytes
    #[serde(default = "default_disk_size", deserialize_with = "deserialize_size")]
    pub disk_size: u64,
    /// Bytes of one disk covered by one stripe
    #[serde(default = "default_stripe_width", deserialize_with = "deserialize_size")]
    pub stripe_width: u64,
    /// Explicit stripe count (overrides the capacity derivation)
    pub stripes: Option<u64>,
    /// Worker threads (0 = all CPUs)
    #[serde(default = "default_threads")]
    pub threads: usize,
}

fn default_disk_size() -> u64 {
    73 * GB
}

fn default_stripe_width() -> u64 {
    128 * KB
}

fn default_threads() -> usize {
    1
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            disk_size: default_disk_size(),
            stripe_width: default_stripe_width(),
            stripes: None,
            threads: default_threads(),
        }
    }
}

/// Hash, generator and placement selection
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct StrategyConfig {
    #[serde(default)]
    pub hash: HashKind,
    #[serde(default)]
    pub generator: GeneratorKind,
    #[serde(default)]
    pub placement: PlacementPolicy,
    /// Run every generator × hash pair instead of the selected one
    #[serde(default)]
    pub matrix: bool,
}

impl StrategyConfig {
    pub fn selected(&self) -> Strategy {
        Strategy::new(self.hash, self.generator, self.placement)
    }
}

/// One array configuration to simulate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub name: String,
    pub disks: usize,
    pub local_groups: usize,
    pub local_group_size: usize,
    #[serde(default)]
    pub global_parities: usize,
}

impl ScenarioConfig {
    pub fn new(
        name: impl Into<String>,
        disks: usize,
        local_groups: usize,
        local_group_size: usize,
        global_parities: usize,
    ) -> Self {
        Self {
            name: name.into(),
            disks,
            local_groups,
            local_group_size,
            global_parities,
        }
    }

    /// Validated core configuration
    pub fn stripe_config(&self) -> Result<StripeConfig, SimError> {
        StripeConfig::new(
            self.disks,
            self.local_groups,
            self.local_group_size,
            self.global_parities,
        )
    }
}

/// Built-in configurations used when none are supplied
pub fn default_scenarios() -> Vec<ScenarioConfig> {
    vec![
        ScenarioConfig::new("24d-3x7+1", 24, 3, 7, 1),
        ScenarioConfig::new("24d-2x10+2", 24, 2, 10, 2),
        ScenarioConfig::new("16d-2x6+1", 16, 2, 6, 1),
        ScenarioConfig::new("12d-2x4+1", 12, 2, 4, 1),
    ]
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// JSON report file path
    pub json_output: Option<PathBuf>,
    /// Pretty-print the JSON report
    #[serde(default = "default_true")]
    pub pretty: bool,
    /// Print every per-disk counter
    #[serde(default = "default_true")]
    pub show_counters: bool,
    /// Render the first N placed stripes of each run
    #[serde(default)]
    pub show_stripes: usize,
}

fn default_true() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            json_output: None,
            pretty: true,
            show_counters: true,
            show_stripes: 0,
        }
    }
}

/// Runtime configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Validate and print the configuration without simulating
    #[serde(default)]
    pub dry_run: bool,
}

/// Accept sizes as plain byte counts or suffixed strings ("128k", "73G")
fn deserialize_size<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Size {
        Bytes(u64),
        Text(String),
    }

    match Size::deserialize(deserializer)? {
        Size::Bytes(n) => Ok(n),
        Size::Text(s) => cli_convert::parse_size(&s).map_err(serde::de::Error::custom),
    }
}
