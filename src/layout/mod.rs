//! Stripe layout model
//!
//! A stripe of a local-reconstruction code holds `L` local groups of `S`
//! members each (`S - 1` data blocks plus one local parity), `P` global
//! parities and one empty slot. The canonical layout lists these roles in a
//! fixed order; every simulated stripe is a permutation of it.
//!
//! # Example
//!
//! ```
//! use lrcsim::layout::{build_canonical, RoleCode, StripeConfig};
//!
//! let config = StripeConfig::new(4, 1, 3, 0).unwrap();
//! let layout = build_canonical(&config);
//! assert_eq!(
//!     layout.codes(),
//!     &[RoleCode::data(1), RoleCode::data(1), RoleCode::local_parity(1, 1), RoleCode::EMPTY]
//! );
//! ```

pub mod role;

pub use role::{Role, RoleCode};

use crate::error::SimError;
use serde::Serialize;

/// Immutable description of one erasure-coded array
///
/// Only [`StripeConfig::new`] constructs it, so every instance satisfies
/// `stripe_length() <= disks()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StripeConfig {
    disks: usize,
    local_groups: usize,
    local_group_size: usize,
    global_parities: usize,
}

impl StripeConfig {
    /// Validate and build a configuration
    ///
    /// # Errors
    ///
    /// [`SimError::InvalidConfig`] when any count is zero (global parities
    /// excepted), when the stripe does not fit on the array, or when the
    /// role codes would not fit in their signed representation.
    pub fn new(
        disks: usize,
        local_groups: usize,
        local_group_size: usize,
        global_parities: usize,
    ) -> Result<Self, SimError> {
        if disks == 0 {
            return Err(SimError::InvalidConfig("disks must be at least 1".into()));
        }
        if local_groups == 0 {
            return Err(SimError::InvalidConfig("local_groups must be at least 1".into()));
        }
        if local_group_size == 0 {
            return Err(SimError::InvalidConfig(
                "local_group_size must be at least 1".into(),
            ));
        }
        if local_groups > (i32::MAX / 2) as usize {
            return Err(SimError::InvalidConfig(format!(
                "local_groups {} exceeds the role code range",
                local_groups
            )));
        }

        let stripe_length = local_groups
            .checked_mul(local_group_size)
            .and_then(|n| n.checked_add(global_parities))
            .and_then(|n| n.checked_add(1))
            .ok_or_else(|| SimError::InvalidConfig("stripe length overflows".into()))?;

        if stripe_length > disks {
            return Err(SimError::InvalidConfig(format!(
                "stripe length {} ({}x{} + {} global + 1 empty) exceeds {} disks",
                stripe_length, local_groups, local_group_size, global_parities, disks
            )));
        }

        Ok(Self {
            disks,
            local_groups,
            local_group_size,
            global_parities,
        })
    }

    pub fn disks(&self) -> usize {
        self.disks
    }

    pub fn local_groups(&self) -> usize {
        self.local_groups
    }

    pub fn local_group_size(&self) -> usize {
        self.local_group_size
    }

    pub fn global_parities(&self) -> usize {
        self.global_parities
    }

    /// Footprint width of one stripe: `L*S + P + 1`
    pub fn stripe_length(&self) -> usize {
        self.local_groups * self.local_group_size + self.global_parities + 1
    }
}

/// The unshuffled role sequence shared by every stripe of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalLayout {
    config: StripeConfig,
    codes: Vec<RoleCode>,
}

impl CanonicalLayout {
    pub fn config(&self) -> &StripeConfig {
        &self.config
    }

    pub fn codes(&self) -> &[RoleCode] {
        &self.codes
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

/// Build the canonical layout of a configuration
///
/// Group 1's data blocks and local parity come first, then group 2's, and so
/// on, followed by the global parities and the single empty slot.
pub fn build_canonical(config: &StripeConfig) -> CanonicalLayout {
    let mut codes = Vec::with_capacity(config.stripe_length());

    for group in 1..=config.local_groups {
        for _ in 0..config.local_group_size - 1 {
            codes.push(RoleCode::data(group));
        }
        codes.push(RoleCode::local_parity(group, config.local_groups));
    }
    codes.extend(std::iter::repeat(RoleCode::GLOBAL_PARITY).take(config.global_parities));
    codes.push(RoleCode::EMPTY);

    debug_assert_eq!(codes.len(), config.stripe_length());

    CanonicalLayout {
        config: *config,
        codes,
    }
}

/// One simulated stripe: a permutation of the canonical layout
///
/// Logical position `k` lands on physical disk `(offset + k) mod disks` once
/// the stripe is placed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stripe {
    codes: Vec<RoleCode>,
}

impl Stripe {
    /// Unshuffled copy of the canonical layout
    pub fn from_canonical(layout: &CanonicalLayout) -> Self {
        Self {
            codes: layout.codes.clone(),
        }
    }

    /// Wrap an explicit role sequence
    pub fn from_codes(codes: Vec<RoleCode>) -> Self {
        Self { codes }
    }

    pub fn codes(&self) -> &[RoleCode] {
        &self.codes
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Overwrite with the canonical order, reusing the allocation
    pub(crate) fn reset_from(&mut self, layout: &CanonicalLayout) {
        self.codes.clear();
        self.codes.extend_from_slice(&layout.codes);
    }

    pub(crate) fn codes_mut(&mut self) -> &mut [RoleCode] {
        &mut self.codes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(codes: &[RoleCode], code: RoleCode) -> usize {
        codes.iter().filter(|&&c| c == code).count()
    }

    #[test]
    fn test_stripe_length() {
        let config = StripeConfig::new(24, 3, 7, 1).unwrap();
        assert_eq!(config.stripe_length(), 23);

        let config = StripeConfig::new(4, 1, 3, 0).unwrap();
        assert_eq!(config.stripe_length(), 4);
    }

    #[test]
    fn test_reject_zero_counts() {
        assert!(matches!(StripeConfig::new(0, 1, 1, 0), Err(SimError::InvalidConfig(_))));
        assert!(matches!(StripeConfig::new(4, 0, 1, 0), Err(SimError::InvalidConfig(_))));
        assert!(matches!(StripeConfig::new(4, 1, 0, 0), Err(SimError::InvalidConfig(_))));
    }

    #[test]
    fn test_reject_stripe_wider_than_array() {
        // 3*7 + 1 + 1 = 23
        assert!(StripeConfig::new(23, 3, 7, 1).is_ok());
        let err = StripeConfig::new(22, 3, 7, 1).unwrap_err();
        assert!(err.to_string().contains("exceeds 22 disks"), "{}", err);
    }

    #[test]
    fn test_reject_overflowing_stripe() {
        assert!(StripeConfig::new(usize::MAX, 2, usize::MAX, 0).is_err());
    }

    #[test]
    fn test_canonical_small() {
        let config = StripeConfig::new(4, 1, 3, 0).unwrap();
        let layout = build_canonical(&config);
        let raw: Vec<i32> = layout.codes().iter().map(|c| c.raw()).collect();
        assert_eq!(raw, vec![1, 1, 2, -2]);
    }

    #[test]
    fn test_canonical_order() {
        let config = StripeConfig::new(10, 2, 3, 2).unwrap();
        let layout = build_canonical(&config);
        let raw: Vec<i32> = layout.codes().iter().map(|c| c.raw()).collect();
        assert_eq!(raw, vec![1, 1, 3, 2, 2, 4, -1, -1, -2]);
    }

    #[test]
    fn test_canonical_multiplicities() {
        for &(l, s, p) in &[(1, 1, 0), (3, 7, 1), (2, 10, 2), (4, 2, 3), (5, 1, 0)] {
            let config = StripeConfig::new(64, l, s, p).unwrap();
            let layout = build_canonical(&config);
            let codes = layout.codes();

            assert_eq!(codes.len(), config.stripe_length());
            for group in 1..=l {
                assert_eq!(count(codes, RoleCode::data(group)), s - 1);
                assert_eq!(count(codes, RoleCode::local_parity(group, l)), 1);
            }
            assert_eq!(count(codes, RoleCode::GLOBAL_PARITY), p);
            assert_eq!(count(codes, RoleCode::EMPTY), 1);
        }
    }

    #[test]
    fn test_stripe_reset_reuses_buffer() {
        let config = StripeConfig::new(8, 2, 2, 1).unwrap();
        let layout = build_canonical(&config);
        let mut stripe = Stripe::from_codes(vec![RoleCode::EMPTY; 2]);
        stripe.reset_from(&layout);
        assert_eq!(stripe, Stripe::from_canonical(&layout));
    }
}
