//! CLI argument parsing using clap

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// lrcsim - rebuild-load balance simulator for declustered LRC arrays
#[derive(Parser, Debug)]
#[command(name = "lrcsim")]
#[command(version, about, long_about = None)]
pub struct Cli {
    // === Array Options ===
    /// Total number of disks in the array
    #[arg(short = 'D', long)]
    pub disks: Option<usize>,

    /// Number of local parity groups per stripe
    #[arg(short = 'l', long)]
    pub local_groups: Option<usize>,

    /// Members per local group, including its local parity
    #[arg(short = 's', long)]
    pub local_group_size: Option<usize>,

    /// Number of global parities per stripe
    #[arg(short = 'g', long)]
    pub global_parities: Option<usize>,

    /// Name for the scenario given on the command line
    #[arg(long)]
    pub name: Option<String>,

    // === Strategy Options ===
    /// Seed hash applied to each stripe index
    #[arg(long, value_enum)]
    pub hash: Option<HashType>,

    /// Pseudo-random generator driving the shuffle
    #[arg(long, value_enum)]
    pub generator: Option<GeneratorType>,

    /// Stripe placement policy
    #[arg(long, value_enum)]
    pub placement: Option<PlacementType>,

    /// Run every generator/hash pair
    #[arg(long)]
    pub matrix: bool,

    // === Capacity Options ===
    /// Capacity of one disk (e.g., 73G, 4T)
    #[arg(long)]
    pub disk_size: Option<String>,

    /// Bytes of one disk covered by a stripe (e.g., 128k)
    #[arg(long)]
    pub stripe_width: Option<String>,

    /// Number of stripes to simulate (overrides disk-size / stripe-width)
    #[arg(short = 'n', long)]
    pub stripes: Option<u64>,

    /// Number of worker threads (0 = all CPUs)
    #[arg(short = 't', long, env = "LRCSIM_THREADS")]
    pub threads: Option<usize>,

    // === Output Options ===
    /// JSON report file path
    #[arg(long)]
    pub json_output: Option<PathBuf>,

    /// Write compact JSON instead of pretty-printed
    #[arg(long)]
    pub compact_json: bool,

    /// Do not print per-disk counters
    #[arg(long)]
    pub no_counters: bool,

    /// Render the first N placed stripes of every run
    #[arg(long)]
    pub show_stripes: Option<usize>,

    // === Configuration File ===
    /// TOML configuration file
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Dry run - validate configuration without simulating
    #[arg(long)]
    pub dry_run: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "LRCSIM_LOG_LEVEL")]
    pub log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    pub log_json: bool,
}

/// Seed hash type
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HashType {
    /// FNV-1a over the index bytes
    #[value(name = "fnv1a")]
    Fnv1a,
    /// Shift/add multiplicative hash
    Multiplicative,
}

/// Generator type
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GeneratorType {
    /// MT19937-64
    #[value(name = "mt64")]
    Mt64,
    /// Marsaglia xorshift128
    #[value(name = "xorshift128")]
    Xorshift128,
    /// xorshift128+
    #[value(name = "xorshift128-plus")]
    Xorshift128Plus,
    /// xoshiro256++
    #[value(name = "xoshiro256-plus-plus")]
    Xoshiro256PlusPlus,
}

/// Placement policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PlacementType {
    /// offset = index mod disks
    RoundRobin,
    /// offset = index * stripe_length mod disks
    Stride,
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// True when the array geometry was given on the command line
    pub fn has_scenario(&self) -> bool {
        self.disks.is_some() || self.local_groups.is_some() || self.local_group_size.is_some()
    }

    /// Validate CLI arguments
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.has_scenario()
            && (self.disks.is_none()
                || self.local_groups.is_none()
                || self.local_group_size.is_none())
        {
            anyhow::bail!("--disks, --local-groups and --local-group-size must be given together");
        }

        if self.global_parities.is_some() && !self.has_scenario() {
            anyhow::bail!(
                "--global-parities requires --disks, --local-groups and --local-group-size"
            );
        }

        if self.name.is_some() && !self.has_scenario() {
            anyhow::bail!("--name only applies to a scenario given on the command line");
        }

        if self.stripes.is_some() && (self.disk_size.is_some() || self.stripe_width.is_some()) {
            anyhow::bail!("--stripes cannot be combined with --disk-size or --stripe-width");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scenario() {
        let cli = Cli::try_parse_from([
            "lrcsim", "--disks", "24", "--local-groups", "3", "--local-group-size", "7",
            "--global-parities", "1", "--generator", "xorshift128-plus", "--placement", "stride",
        ])
        .unwrap();
        assert_eq!(cli.disks, Some(24));
        assert_eq!(cli.generator, Some(GeneratorType::Xorshift128Plus));
        assert_eq!(cli.placement, Some(PlacementType::Stride));
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn test_partial_scenario_rejected() {
        let cli = Cli::try_parse_from(["lrcsim", "--disks", "24"]).unwrap();
        assert!(cli.validate().is_err());

        let cli = Cli::try_parse_from(["lrcsim", "--global-parities", "2"]).unwrap();
        assert!(cli.validate().is_err());
    }

    #[test]
    fn test_stripes_conflicts_with_capacity() {
        let cli = Cli::try_parse_from(["lrcsim", "--stripes", "10", "--disk-size", "1G"]).unwrap();
        assert!(cli.validate().is_err());
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["lrcsim"]).unwrap();
        assert!(!cli.has_scenario());
        assert!(!cli.matrix);
        assert!(cli.validate().is_ok());
    }
}
