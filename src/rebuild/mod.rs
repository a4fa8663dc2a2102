//! Rebuild-load accumulation
//!
//! Physical disk 0 is the reference failed disk. For every placed stripe the
//! accumulator finds which logical position landed on disk 0 and charges one
//! read to every surviving disk that must be read to rebuild that block:
//!
//! - a lost data or local-parity block reads the surviving members of its
//!   local group
//! - a lost global parity reads every data and local-parity block
//! - a lost empty slot, or a stripe whose footprint misses disk 0, costs
//!   nothing
//!
//! # Example
//!
//! ```
//! use lrcsim::layout::{build_canonical, Stripe, StripeConfig};
//! use lrcsim::rebuild::DiskLoad;
//!
//! let config = StripeConfig::new(4, 1, 3, 0).unwrap();
//! let stripe = Stripe::from_canonical(&build_canonical(&config));
//!
//! let mut load = DiskLoad::new(config.disks());
//! load.accumulate(&stripe, 0, &config);
//! assert_eq!(load.counters(), &[0, 1, 1, 0]);
//! ```

use crate::layout::{RoleCode, Stripe, StripeConfig};
use serde::Serialize;

/// True when both codes are members of the same local group
///
/// Data code `g` and local-parity code `g + L` belong to group `g`.
#[inline]
pub fn same_local_group(source: RoleCode, failed: RoleCode, local_groups: usize) -> bool {
    if !source.is_member() || !failed.is_member() {
        return false;
    }
    let (s, f, l) = (source.raw(), failed.raw(), local_groups as i32);
    s == f || s == f + l || f == s + l
}

/// Whether reading `source` helps rebuild `failed`
#[inline]
fn needs_read(source: RoleCode, failed: RoleCode, local_groups: usize) -> bool {
    same_local_group(source, failed, local_groups)
        || (failed.is_global_parity() && source.is_member())
}

/// Add one stripe's rebuild reads to `counters`
///
/// `counters` has one entry per disk; `offset` is the physical disk of the
/// stripe's logical position 0, taken modulo the disk count. Stripes whose
/// footprint misses disk 0 leave `counters` untouched.
pub fn accumulate(counters: &mut [u64], stripe: &Stripe, offset: usize, config: &StripeConfig) {
    let disks = config.disks();
    debug_assert_eq!(counters.len(), disks);

    let offset = offset % disks;
    let failed_index = (disks - offset) % disks;
    let codes = stripe.codes();
    if failed_index >= codes.len() {
        return;
    }

    let failed = codes[failed_index];
    let local_groups = config.local_groups();
    for (i, &source) in codes.iter().enumerate() {
        if i != failed_index && needs_read(source, failed, local_groups) {
            counters[(offset + i) % disks] += 1;
        }
    }
}

/// Per-disk rebuild read counters for one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DiskLoad {
    counters: Vec<u64>,
}

impl DiskLoad {
    pub fn new(disks: usize) -> Self {
        Self {
            counters: vec![0; disks],
        }
    }

    pub fn accumulate(&mut self, stripe: &Stripe, offset: usize, config: &StripeConfig) {
        accumulate(&mut self.counters, stripe, offset, config);
    }

    /// Add another partial load, disk by disk
    pub fn merge(&mut self, other: &DiskLoad) {
        debug_assert_eq!(self.counters.len(), other.counters.len());
        for (a, b) in self.counters.iter_mut().zip(&other.counters) {
            *a += b;
        }
    }

    pub fn counters(&self) -> &[u64] {
        &self.counters
    }

    pub fn total_reads(&self) -> u64 {
        self.counters.iter().sum()
    }
}
