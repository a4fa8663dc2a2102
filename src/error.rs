//! Error types for the simulation core

use thiserror::Error;

/// Errors raised by the simulation core
///
/// Configuration errors are fatal and surface before any stripe is simulated.
/// Once a [`StripeConfig`](crate::layout::StripeConfig) exists, per-stripe
/// operations have no failure path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    /// Stripe configuration cannot describe a valid array
    #[error("invalid stripe configuration: {0}")]
    InvalidConfig(String),

    /// Final counters cannot produce a load spread
    #[error("degenerate statistics: {0}")]
    DegenerateStatistics(String),
}
