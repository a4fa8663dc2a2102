//! CLI to Config conversion utilities

use crate::config::cli;
use crate::generator::GeneratorKind;
use crate::hash::HashKind;
use crate::placement::PlacementPolicy;
use anyhow::{Context, Result};

/// Parse a size string (e.g., "1G", "100M", "128k") to bytes
pub fn parse_size(s: &str) -> Result<u64> {
    let s = s.trim().to_lowercase();

    let (num_str, multiplier) = if s.ends_with('k') || s.ends_with("kb") {
        (s.trim_end_matches("kb").trim_end_matches('k'), 1024u64)
    } else if s.ends_with('m') || s.ends_with("mb") {
        (s.trim_end_matches("mb").trim_end_matches('m'), 1024 * 1024)
    } else if s.ends_with('g') || s.ends_with("gb") {
        (s.trim_end_matches("gb").trim_end_matches('g'), 1024 * 1024 * 1024)
    } else if s.ends_with('t') || s.ends_with("tb") {
        (s.trim_end_matches("tb").trim_end_matches('t'), 1024 * 1024 * 1024 * 1024)
    } else {
        (s.as_str(), 1)
    };

    let num: u64 = num_str
        .trim()
        .parse()
        .with_context(|| format!("Invalid size format: {}", s))?;

    num.checked_mul(multiplier)
        .with_context(|| format!("Size out of range: {}", s))
}

/// Convert CLI HashType to HashKind
pub fn convert_hash_type(cli_type: cli::HashType) -> HashKind {
    match cli_type {
        cli::HashType::Fnv1a => HashKind::Fnv1a,
        cli::HashType::Multiplicative => HashKind::Multiplicative,
    }
}

/// Convert CLI GeneratorType to GeneratorKind
pub fn convert_generator_type(cli_type: cli::GeneratorType) -> GeneratorKind {
    match cli_type {
        cli::GeneratorType::Mt64 => GeneratorKind::Mt64,
        cli::GeneratorType::Xorshift128 => GeneratorKind::Xorshift128,
        cli::GeneratorType::Xorshift128Plus => GeneratorKind::Xorshift128Plus,
        cli::GeneratorType::Xoshiro256PlusPlus => GeneratorKind::Xoshiro256PlusPlus,
    }
}

/// Convert CLI PlacementType to PlacementPolicy
pub fn convert_placement_type(cli_type: cli::PlacementType) -> PlacementPolicy {
    match cli_type {
        cli::PlacementType::RoundRobin => PlacementPolicy::RoundRobin,
        cli::PlacementType::Stride => PlacementPolicy::Stride,
    }
}
