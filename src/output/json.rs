//! JSON output formatting
//!
//! Writes one report per invocation: run metadata plus, for every scenario and
//! strategy tuple, the stripe configuration, per-disk counters and load
//! statistics. Runs with degenerate statistics carry the error text instead.

use crate::config::Config;
use crate::coordinator::RunOutcome;
use crate::layout::StripeConfig;
use crate::simulation::Strategy;
use crate::stats::LoadStatistics;
use crate::Result;
use anyhow::Context;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Duration;

/// Complete report
#[derive(Debug, Clone, Serialize)]
pub struct JsonReport {
    pub version: String,
    pub generated_at: String,
    pub stripes: u64,
    pub threads: usize,
    pub elapsed_secs: f64,
    pub runs: Vec<JsonRun>,
}

/// One scenario × strategy run
#[derive(Debug, Clone, Serialize)]
pub struct JsonRun {
    pub scenario: String,
    pub config: StripeConfig,
    pub stripe_length: usize,
    pub strategy: Strategy,
    pub counters: Vec<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistics: Option<LoadStatistics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub elapsed_secs: f64,
}

impl JsonRun {
    pub fn from_outcome(outcome: &RunOutcome) -> Self {
        let config = *outcome.simulation.config();
        let (statistics, error) = match &outcome.statistics {
            Ok(stats) => (Some(*stats), None),
            Err(e) => (None, Some(e.to_string())),
        };

        Self {
            scenario: outcome.scenario.clone(),
            config,
            stripe_length: config.stripe_length(),
            strategy: outcome.strategy(),
            counters: outcome.load.counters().to_vec(),
            statistics,
            error,
            elapsed_secs: outcome.elapsed.as_secs_f64(),
        }
    }
}

/// Assemble the report for a finished invocation
pub fn build_report(config: &Config, outcomes: &[RunOutcome], elapsed: Duration) -> JsonReport {
    JsonReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        generated_at: chrono::Local::now().to_rfc3339(),
        stripes: config.stripe_count(),
        threads: config.threads(),
        elapsed_secs: elapsed.as_secs_f64(),
        runs: outcomes.iter().map(JsonRun::from_outcome).collect(),
    }
}

/// Write JSON output to file
pub fn write_json_output(output_path: &Path, report: &JsonReport, pretty: bool) -> Result<()> {
    let file = File::create(output_path)
        .with_context(|| format!("Failed to create JSON output: {}", output_path.display()))?;
    let mut writer = BufWriter::new(file);

    if pretty {
        serde_json::to_writer_pretty(&mut writer, report)?;
    } else {
        serde_json::to_writer(&mut writer, report)?;
    }
    writer.flush().context("Failed to flush JSON output")?;

    Ok(())
}
