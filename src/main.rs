//! lrcsim CLI entry point

use anyhow::{Context, Result};
use lrcsim::config::cli::Cli;
use lrcsim::config::{toml, validator};
use lrcsim::coordinator;
use lrcsim::output::{json, text};
use std::time::Instant;
use tracing::{debug, info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    let main_start = Instant::now();

    let cli = Cli::parse_args();
    init_logging(&cli);
    cli.validate()?;

    println!("lrcsim v{}", env!("CARGO_PKG_VERSION"));
    println!("Rebuild-load balance simulator");
    println!();

    let config = toml::load_config(&cli)?;
    validator::validate_config(&config).context("Configuration validation failed")?;
    debug!(?config, "resolved configuration");

    text::print_configuration(&config);
    println!();

    if config.runtime.dry_run {
        println!("Dry run mode - configuration validated successfully");
        return Ok(());
    }

    info!(stripes = config.stripe_count(), "starting simulation");
    let outcomes = coordinator::run_all(&config)?;

    for outcome in &outcomes {
        text::print_outcome(outcome, config.output.show_counters);
    }
    text::print_summary(&outcomes);

    if let Some(ref path) = config.output.json_output {
        let report = json::build_report(&config, &outcomes, main_start.elapsed());
        json::write_json_output(path, &report, config.output.pretty)?;
        info!(path = %path.display(), "wrote JSON report");
    }

    Ok(())
}

/// Install the tracing subscriber
fn init_logging(cli: &Cli) {
    let level = if cli.debug {
        Level::DEBUG
    } else {
        match cli.log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        }
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    if cli.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}
