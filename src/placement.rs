//! Stripe placement
//!
//! Maps a stripe onto the array by choosing the physical disk that holds its
//! logical position 0. Position `k` then lives on `(offset + k) mod disks`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How consecutive stripes are rotated across the array
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlacementPolicy {
    /// `offset = index mod disks`
    RoundRobin,
    /// `offset = (index * stripe_length) mod disks`
    Stride,
}

impl PlacementPolicy {
    pub fn name(self) -> &'static str {
        match self {
            Self::RoundRobin => "round-robin",
            Self::Stride => "stride",
        }
    }

    #[inline]
    pub fn offset(self, stripe_index: u64, stripe_length: usize, disks: usize) -> usize {
        place(stripe_index, stripe_length, disks, self)
    }
}

impl Default for PlacementPolicy {
    fn default() -> Self {
        Self::RoundRobin
    }
}

impl fmt::Display for PlacementPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Physical disk holding logical position 0 of stripe `stripe_index`
///
/// `disks` must be non-zero, which a validated `StripeConfig` guarantees.
#[inline]
pub fn place(
    stripe_index: u64,
    stripe_length: usize,
    disks: usize,
    policy: PlacementPolicy,
) -> usize {
    let d = disks as u64;
    let offset = match policy {
        PlacementPolicy::RoundRobin => stripe_index % d,
        // Reduce both factors first so the product cannot overflow
        PlacementPolicy::Stride => {
            ((stripe_index % d) as u128 * (stripe_length as u64 % d) as u128 % d as u128) as u64
        }
    };
    offset as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_robin() {
        let offsets: Vec<usize> =
            (0..6).map(|i| place(i, 3, 4, PlacementPolicy::RoundRobin)).collect();
        assert_eq!(offsets, vec![0, 1, 2, 3, 0, 1]);
    }

    #[test]
    fn test_stride() {
        let offsets: Vec<usize> = (0..5).map(|i| place(i, 3, 4, PlacementPolicy::Stride)).collect();
        assert_eq!(offsets, vec![0, 3, 2, 1, 0]);
    }

    #[test]
    fn test_stride_full_width_stays_put() {
        for i in 0..10 {
            assert_eq!(place(i, 8, 8, PlacementPolicy::Stride), 0);
        }
    }

    #[test]
    fn test_stride_large_index() {
        let index = u64::MAX;
        let expected = ((index as u128 * 23) % 24) as usize;
        assert_eq!(place(index, 23, 24, PlacementPolicy::Stride), expected);
    }

    #[test]
    fn test_offset_in_range() {
        for policy in [PlacementPolicy::RoundRobin, PlacementPolicy::Stride] {
            for i in 0..1000 {
                assert!(policy.offset(i, 23, 24) < 24);
            }
        }
    }
}
