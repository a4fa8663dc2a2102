//! Human-readable text output

use crate::config::Config;
use crate::coordinator::RunOutcome;
use crate::layout::{Stripe, StripeConfig};

/// Print the resolved configuration
pub fn print_configuration(config: &Config) {
    println!("Configuration:");
    println!("  Simulation:");
    match config.simulation.stripes {
        Some(n) => println!("    Stripes: {}", format_number(n)),
        None => println!(
            "    Stripes: {} ({} / {})",
            format_number(config.stripe_count()),
            format_bytes(config.simulation.disk_size),
            format_bytes(config.simulation.stripe_width)
        ),
    }
    println!("    Threads: {}", config.threads());

    println!("  Strategy:");
    if config.strategy.matrix {
        println!("    Matrix: all generators x all hashes");
    } else {
        println!("    Hash: {}", config.strategy.hash);
        println!("    Generator: {}", config.strategy.generator);
    }
    println!("    Placement: {}", config.strategy.placement);

    println!("  Scenarios:");
    for scenario in &config.scenarios {
        println!(
            "    {}: {} disks, {} local groups x {}, {} global parities",
            scenario.name,
            scenario.disks,
            scenario.local_groups,
            scenario.local_group_size,
            scenario.global_parities
        );
    }
}

/// Print one run's results
///
/// Counters are listed disk by disk, followed by min, max and spread over the
/// surviving disks.
pub fn print_outcome(outcome: &RunOutcome, show_counters: bool) {
    let sim = &outcome.simulation;
    let config = sim.config();

    println!("═══════════════════════════════════════════════════════════");
    println!(
        "  {} [{}]  stripe length {}",
        outcome.scenario,
        outcome.strategy(),
        config.stripe_length()
    );
    println!("═══════════════════════════════════════════════════════════");

    for (i, (stripe, offset)) in outcome.preview.iter().enumerate() {
        println!("  #{:<4} {}", i, render_stripe(stripe, *offset, config));
    }
    if !outcome.preview.is_empty() {
        println!();
    }

    if show_counters {
        let counters: Vec<String> = outcome
            .load
            .counters()
            .iter()
            .map(|c| c.to_string())
            .collect();
        println!("{}", counters.join(" "));
    }

    match &outcome.statistics {
        Ok(stats) => {
            println!(
                "Min: {}, max: {}",
                format_number(stats.min),
                format_number(stats.max)
            );
            println!(
                "Diff: {}, (max-min)/max: {:.4}%",
                format_number(stats.spread),
                stats.spread_percent
            );
        }
        Err(e) => println!("Statistics unavailable: {}", e),
    }
    println!(
        "Stripes: {}  Reads: {}  Elapsed: {:.3}s",
        format_number(sim.stripes()),
        format_number(outcome.load.total_reads()),
        outcome.elapsed.as_secs_f64()
    );
    println!();
}

/// Print a one-line-per-run comparison table
pub fn print_summary(outcomes: &[RunOutcome]) {
    if outcomes.len() < 2 {
        return;
    }

    println!("Summary:");
    println!(
        "  {:<16} {:<40} {:>12} {:>12} {:>10}",
        "scenario", "strategy", "min", "max", "spread"
    );
    for outcome in outcomes {
        let strategy = outcome.strategy().to_string();
        match &outcome.statistics {
            Ok(stats) => println!(
                "  {:<16} {:<40} {:>12} {:>12} {:>9.4}%",
                outcome.scenario, strategy, stats.min, stats.max, stats.spread_percent
            ),
            Err(_) => println!(
                "  {:<16} {:<40} {:>12} {:>12} {:>10}",
                outcome.scenario, strategy, "-", "-", "n/a"
            ),
        }
    }
    println!();
}

/// Render a placed stripe across the array
///
/// One cell per physical disk: the role at that disk, `.` outside the
/// stripe's footprint. The failed reference disk 0 is bracketed.
pub fn render_stripe(stripe: &Stripe, offset: usize, config: &StripeConfig) -> String {
    let disks = config.disks();
    let mut out = String::with_capacity(disks * 5);

    for disk in 0..disks {
        let position = (disk + disks - offset % disks) % disks;
        let label = stripe
            .codes()
            .get(position)
            .map(|code| code.label(config.local_groups()))
            .unwrap_or_else(|| ".".to_string());

        if disk == 0 {
            out.push_str(&format!("[{:>3}]", label));
        } else {
            out.push_str(&format!(" {:>3} ", label));
        }
    }
    out.trim_end().to_string()
}

/// Format number with thousands separators
fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();

    for (count, c) in s.chars().rev().enumerate() {
        if count > 0 && count % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    result.chars().rev().collect()
}

/// Format bytes with appropriate units
fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;
    const TB: u64 = GB * 1024;

    if bytes >= TB {
        format!("{:.2} TB", bytes as f64 / TB as f64)
    } else if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
