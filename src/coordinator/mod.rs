//! Coordinator module
//!
//! Expands a configuration into one run per scenario and strategy tuple,
//! executes each run and collects the outcomes for the reporters.

use crate::config::Config;
use crate::error::SimError;
use crate::layout::Stripe;
use crate::rebuild::DiskLoad;
use crate::simulation::{Simulation, Strategy};
use crate::stats::LoadStatistics;
use crate::Result;
use anyhow::Context;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// One scheduled run
#[derive(Debug, Clone)]
pub struct RunPlan {
    pub scenario: String,
    pub simulation: Simulation,
}

/// Result of one run
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub scenario: String,
    pub simulation: Simulation,
    pub load: DiskLoad,
    pub statistics: std::result::Result<LoadStatistics, SimError>,
    pub elapsed: Duration,
    /// First placed stripes with their offsets, for rendering
    pub preview: Vec<(Stripe, usize)>,
}

impl RunOutcome {
    pub fn strategy(&self) -> Strategy {
        self.simulation.strategy()
    }
}

/// Expand scenarios × strategies into validated runs
pub fn plan_runs(config: &Config) -> Result<Vec<RunPlan>> {
    let stripes = config.stripe_count();
    let strategies = config.strategies();

    let mut plans = Vec::with_capacity(config.scenarios.len() * strategies.len());
    for scenario in &config.scenarios {
        let stripe_config = scenario
            .stripe_config()
            .with_context(|| format!("scenario '{}'", scenario.name))?;
        for &strategy in &strategies {
            plans.push(RunPlan {
                scenario: scenario.name.clone(),
                simulation: Simulation::new(stripe_config, strategy, stripes),
            });
        }
    }
    Ok(plans)
}

/// Execute one run
pub fn execute(plan: &RunPlan, threads: usize, show_stripes: usize) -> Result<RunOutcome> {
    let sim = &plan.simulation;
    let start = Instant::now();
    let load = sim.run_parallel(threads)?;
    let elapsed = start.elapsed();

    let statistics = LoadStatistics::from_counters(load.counters());
    match &statistics {
        Ok(stats) => info!(
            scenario = %plan.scenario,
            strategy = %sim.strategy(),
            stripes = sim.stripes(),
            spread_percent = stats.spread_percent,
            elapsed_ms = elapsed.as_millis() as u64,
            "run complete"
        ),
        Err(e) => warn!(scenario = %plan.scenario, strategy = %sim.strategy(), "{}", e),
    }

    let preview = (0..sim.stripes().min(show_stripes as u64))
        .map(|i| sim.placed_stripe(i))
        .collect();

    Ok(RunOutcome {
        scenario: plan.scenario.clone(),
        simulation: sim.clone(),
        load,
        statistics,
        elapsed,
        preview,
    })
}

/// Plan and execute every run of a configuration
pub fn run_all(config: &Config) -> Result<Vec<RunOutcome>> {
    let threads = config.threads();
    let plans = plan_runs(config)?;
    info!(runs = plans.len(), threads, "planned runs");

    plans
        .iter()
        .map(|plan| execute(plan, threads, config.output.show_stripes))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScenarioConfig;

    fn small_config() -> Config {
        let mut config = Config::default();
        config.scenarios = vec![
            ScenarioConfig::new("a", 8, 2, 3, 0),
            ScenarioConfig::new("b", 12, 2, 4, 1),
        ];
        config.simulation.stripes = Some(480);
        config
    }

    #[test]
    fn test_plan_single_strategy() {
        let plans = plan_runs(&small_config()).unwrap();
        assert_eq!(plans.len(), 2);
        assert_eq!(plans[0].scenario, "a");
        assert_eq!(plans[1].simulation.config().disks(), 12);
        assert!(plans.iter().all(|p| p.simulation.stripes() == 480));
    }

    #[test]
    fn test_plan_matrix() {
        let mut config = small_config();
        config.strategy.matrix = true;
        assert_eq!(plan_runs(&config).unwrap().len(), 2 * 8);
    }

    #[test]
    fn test_plan_rejects_invalid_scenario() {
        let mut config = small_config();
        config.scenarios.push(ScenarioConfig::new("bad", 4, 2, 3, 0));
        let err = plan_runs(&config).unwrap_err();
        assert!(format!("{:#}", err).contains("scenario 'bad'"));
    }

    #[test]
    fn test_run_all() {
        let mut config = small_config();
        config.output.show_stripes = 3;
        config.simulation.threads = 2;
        let outcomes = run_all(&config).unwrap();

        assert_eq!(outcomes.len(), 2);
        for outcome in &outcomes {
            assert_eq!(outcome.preview.len(), 3);
            let stats = outcome.statistics.as_ref().unwrap();
            assert_eq!(stats.total_reads, outcome.load.total_reads());
            assert_eq!(outcome.load, outcome.simulation.run());
        }
    }
}
