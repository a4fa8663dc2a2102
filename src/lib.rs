//! lrcsim - rebuild-load balance simulator for declustered LRC arrays
//!
//! Simulates a large number of stripes of a local-reconstruction erasure code
//! (data blocks in local parity groups plus global parities) spread across a
//! disk array, and measures how evenly the reads needed to rebuild one failed
//! disk fall on the surviving disks.
//!
//! # Architecture
//!
//! - **Layout**: canonical role sequence of one stripe
//! - **Seed hashes**: stripe index to permutation seed (FNV-1a, multiplicative)
//! - **Generators**: pluggable PRNGs driving a Fisher-Yates shuffle
//! - **Placement**: rotates each stripe onto the array
//! - **Rebuild**: per-disk rebuild read counters
//! - **Simulation**: sequential and sharded parallel runs

pub mod config;
pub mod coordinator;
pub mod error;
pub mod generator;
pub mod hash;
pub mod layout;
pub mod output;
pub mod placement;
pub mod rebuild;
pub mod simulation;
pub mod stats;

// Re-export commonly used types
pub use config::Config;
pub use error::SimError;
pub use layout::{build_canonical, CanonicalLayout, RoleCode, Stripe, StripeConfig};
pub use simulation::{Simulation, Strategy};

/// Result type used throughout lrcsim
pub type Result<T> = anyhow::Result<T>;
