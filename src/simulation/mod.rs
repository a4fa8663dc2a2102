//! Simulation runner
//!
//! Drives the per-stripe pipeline for `N` stripes:
//!
//! ```text
//! index -> seed hash -> generator shuffle -> placement offset -> accumulate
//! ```
//!
//! Every stripe is a pure function of its index, so the index range can be
//! split into contiguous shards, each accumulated into its own [`DiskLoad`]
//! on a rayon pool. Integer addition makes the merged counters identical to
//! the sequential run.
//!
//! # Example
//!
//! ```
//! use lrcsim::generator::GeneratorKind;
//! use lrcsim::hash::HashKind;
//! use lrcsim::layout::StripeConfig;
//! use lrcsim::placement::PlacementPolicy;
//! use lrcsim::simulation::{Simulation, Strategy};
//!
//! let config = StripeConfig::new(12, 2, 4, 1).unwrap();
//! let strategy = Strategy::new(HashKind::Fnv1a, GeneratorKind::Mt64, PlacementPolicy::RoundRobin);
//! let sim = Simulation::new(config, strategy, 1200);
//! assert_eq!(sim.run(), sim.run_parallel(4).unwrap());
//! ```

use crate::generator::{fill_stripe, GeneratorKind};
use crate::hash::HashKind;
use crate::layout::{build_canonical, CanonicalLayout, Stripe, StripeConfig};
use crate::placement::PlacementPolicy;
use crate::rebuild::DiskLoad;
use crate::Result;
use anyhow::Context;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use tracing::debug;

/// Strategy tuple selected for one run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Strategy {
    pub hash: HashKind,
    pub generator: GeneratorKind,
    pub placement: PlacementPolicy,
}

impl Strategy {
    pub fn new(hash: HashKind, generator: GeneratorKind, placement: PlacementPolicy) -> Self {
        Self {
            hash,
            generator,
            placement,
        }
    }

    /// Every generator × hash pair with a fixed placement
    pub fn matrix(placement: PlacementPolicy) -> Vec<Strategy> {
        GeneratorKind::ALL
            .into_iter()
            .flat_map(|generator| {
                HashKind::ALL
                    .into_iter()
                    .map(move |hash| Strategy::new(hash, generator, placement))
            })
            .collect()
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.generator, self.hash, self.placement)
    }
}

/// One configured run over `stripes` stripes
#[derive(Debug, Clone)]
pub struct Simulation {
    layout: CanonicalLayout,
    strategy: Strategy,
    stripes: u64,
}

impl Simulation {
    pub fn new(config: StripeConfig, strategy: Strategy, stripes: u64) -> Self {
        Self {
            layout: build_canonical(&config),
            strategy,
            stripes,
        }
    }

    pub fn config(&self) -> &StripeConfig {
        self.layout.config()
    }

    pub fn layout(&self) -> &CanonicalLayout {
        &self.layout
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn stripes(&self) -> u64 {
        self.stripes
    }

    /// Shuffled stripe and placement offset of one index
    pub fn placed_stripe(&self, index: u64) -> (Stripe, usize) {
        let mut stripe = Stripe::from_canonical(&self.layout);
        let offset = self.fill(&mut stripe, index);
        (stripe, offset)
    }

    #[inline]
    fn fill(&self, stripe: &mut Stripe, index: u64) -> usize {
        let config = self.layout.config();
        fill_stripe(
            stripe,
            index,
            &self.layout,
            self.strategy.hash,
            self.strategy.generator,
        );
        self.strategy
            .placement
            .offset(index, config.stripe_length(), config.disks())
    }

    /// Accumulate the stripes in `range` into a fresh counter array
    pub fn run_range(&self, range: Range<u64>) -> DiskLoad {
        let config = self.layout.config();
        let mut load = DiskLoad::new(config.disks());
        let mut stripe = Stripe::from_canonical(&self.layout);

        for index in range {
            let offset = self.fill(&mut stripe, index);
            load.accumulate(&stripe, offset, config);
        }
        load
    }

    /// Sequential reference run
    pub fn run(&self) -> DiskLoad {
        debug!(strategy = %self.strategy, stripes = self.stripes, "sequential run");
        self.run_range(0..self.stripes)
    }

    /// Sharded run on a dedicated pool of `threads` workers
    ///
    /// `threads == 1` falls back to [`Simulation::run`].
    pub fn run_parallel(&self, threads: usize) -> Result<DiskLoad> {
        if threads <= 1 {
            return Ok(self.run());
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .context("Failed to build simulation thread pool")?;

        let shards = shard_ranges(self.stripes, threads * 4);
        debug!(
            strategy = %self.strategy,
            stripes = self.stripes,
            threads,
            shards = shards.len(),
            "parallel run"
        );

        let disks = self.config().disks();
        let load = pool.install(|| {
            shards
                .into_par_iter()
                .map(|range| self.run_range(range))
                .reduce(
                    || DiskLoad::new(disks),
                    |mut acc, part| {
                        acc.merge(&part);
                        acc
                    },
                )
        });
        Ok(load)
    }
}

/// Split `[0, total)` into at most `shards` contiguous, non-empty ranges
pub fn shard_ranges(total: u64, shards: usize) -> Vec<Range<u64>> {
    let shards = (shards.max(1) as u64).min(total.max(1));
    let base = total / shards;
    let extra = total % shards;

    let mut ranges = Vec::with_capacity(shards as usize);
    let mut start = 0;
    for i in 0..shards {
        let len = base + u64::from(i < extra);
        if len > 0 {
            ranges.push(start..start + len);
        }
        start += len;
    }
    ranges
}
