//! Permutation generators
//!
//! Each stripe's role order is a Fisher-Yates shuffle of the canonical layout,
//! driven by a pseudo-random stream seeded from the stripe index. The choice
//! of generator is the variable under study, so several structurally
//! different generators are available behind one capability.
//!
//! # Generators
//!
//! - **mt64**: MT19937-64, large state, reference-compatible seeding
//! - **xorshift128**: Marsaglia's four-word xorshift
//! - **xorshift128-plus**: xorshift128+ with additive output
//! - **xoshiro256-plus-plus**: xoshiro256++ from `rand_xoshiro`
//!
//! # Shuffle
//!
//! For `i` from `n-1` down to `1`, draw `r` and swap positions `i` and
//! `r mod (i+1)`. The modulo reduction keeps a small bias for ranges that do
//! not divide 2^64; the bias is part of what the simulation measures.
//!
//! # Example
//!
//! ```
//! use lrcsim::generator::{next_stripe, GeneratorKind};
//! use lrcsim::hash::HashKind;
//! use lrcsim::layout::{build_canonical, StripeConfig};
//!
//! let config = StripeConfig::new(24, 3, 7, 1).unwrap();
//! let layout = build_canonical(&config);
//! let a = next_stripe(17, &layout, HashKind::Fnv1a, GeneratorKind::Mt64);
//! let b = next_stripe(17, &layout, HashKind::Fnv1a, GeneratorKind::Mt64);
//! assert_eq!(a, b);
//! assert_eq!(a.len(), layout.len());
//! ```

pub mod mt64;
pub mod xorshift128;
pub mod xorshift128plus;

pub use mt64::Mt64;
pub use xorshift128::Xorshift128;
pub use xorshift128plus::Xorshift128Plus;

use crate::hash::{HashKind, SeedHash};
use crate::layout::{CanonicalLayout, RoleCode, Stripe};
use rand::SeedableRng;
use rand_core::RngCore;
use rand_xoshiro::Xoshiro256PlusPlus;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A 64-bit pseudo-random stream that can be built from a stripe seed
///
/// The same seed must always produce the same stream.
pub trait RandomStream: RngCore {
    fn from_stripe_seed(seed: u64) -> Self
    where
        Self: Sized;
}

impl RandomStream for Xoshiro256PlusPlus {
    fn from_stripe_seed(seed: u64) -> Self {
        Xoshiro256PlusPlus::seed_from_u64(seed)
    }
}

/// Generator selected for a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GeneratorKind {
    Mt64,
    Xorshift128,
    Xorshift128Plus,
    Xoshiro256PlusPlus,
}

impl GeneratorKind {
    pub const ALL: [GeneratorKind; 4] = [
        GeneratorKind::Mt64,
        GeneratorKind::Xorshift128,
        GeneratorKind::Xorshift128Plus,
        GeneratorKind::Xoshiro256PlusPlus,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Mt64 => "mt64",
            Self::Xorshift128 => "xorshift128",
            Self::Xorshift128Plus => "xorshift128-plus",
            Self::Xoshiro256PlusPlus => "xoshiro256-plus-plus",
        }
    }
}

impl Default for GeneratorKind {
    fn default() -> Self {
        Self::Mt64
    }
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fisher-Yates shuffle with modulo-reduced draws
pub fn shuffle<R: RngCore + ?Sized>(codes: &mut [RoleCode], rng: &mut R) {
    for i in (1..codes.len()).rev() {
        let j = (rng.next_u64() % (i as u64 + 1)) as usize;
        codes.swap(i, j);
    }
}

/// Shuffle with a fresh stream of the given kind seeded with `seed`
pub fn shuffle_seeded(codes: &mut [RoleCode], seed: u64, generator: GeneratorKind) {
    match generator {
        GeneratorKind::Mt64 => shuffle(codes, &mut Mt64::from_stripe_seed(seed)),
        GeneratorKind::Xorshift128 => shuffle(codes, &mut Xorshift128::from_stripe_seed(seed)),
        GeneratorKind::Xorshift128Plus => {
            shuffle(codes, &mut Xorshift128Plus::from_stripe_seed(seed))
        }
        GeneratorKind::Xoshiro256PlusPlus => {
            shuffle(codes, &mut Xoshiro256PlusPlus::from_stripe_seed(seed))
        }
    }
}

/// Build the stripe for `stripe_index`
pub fn next_stripe(
    stripe_index: u64,
    layout: &CanonicalLayout,
    hash: HashKind,
    generator: GeneratorKind,
) -> Stripe {
    let mut stripe = Stripe::from_canonical(layout);
    fill_stripe(&mut stripe, stripe_index, layout, hash, generator);
    stripe
}

/// Same as [`next_stripe`] but reuses `stripe`'s allocation
pub fn fill_stripe(
    stripe: &mut Stripe,
    stripe_index: u64,
    layout: &CanonicalLayout,
    hash: HashKind,
    generator: GeneratorKind,
) {
    stripe.reset_from(layout);
    shuffle_seeded(stripe.codes_mut(), hash.seed_for(stripe_index), generator);
}

/// SplitMix64 step, used to expand a 64-bit seed into wider state
#[inline]
pub(crate) fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{build_canonical, StripeConfig};

    /// Replays a fixed list of draws
    struct Scripted(Vec<u64>);

    impl RngCore for Scripted {
        fn next_u32(&mut self) -> u32 {
            self.next_u64() as u32
        }
        fn next_u64(&mut self) -> u64 {
            self.0.remove(0)
        }
        fn fill_bytes(&mut self, dest: &mut [u8]) {
            rand_core::impls::fill_bytes_via_next(self, dest)
        }
        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    fn sorted(codes: &[RoleCode]) -> Vec<RoleCode> {
        let mut v = codes.to_vec();
        v.sort();
        v
    }

    #[test]
    fn test_splitmix64_first_output() {
        let mut state = 0;
        assert_eq!(splitmix64(&mut state), 16_294_208_416_658_607_535);
    }

    #[test]
    fn test_shuffle_draw_reduction() {
        let mut codes: Vec<RoleCode> = (1..=4).map(RoleCode::from_raw).collect();
        // i=3: j = 7 % 4 = 3 (no-op); i=2: j = 3 % 3 = 0; i=1: j = 1 % 2 = 1 (no-op)
        let mut rng = Scripted(vec![7, 3, 1]);
        shuffle(&mut codes, &mut rng);
        let raw: Vec<i32> = codes.iter().map(|c| c.raw()).collect();
        assert_eq!(raw, vec![3, 2, 1, 4]);
        assert!(rng.0.is_empty());
    }

    #[test]
    fn test_shuffle_draws_n_minus_one_values() {
        let mut codes = vec![RoleCode::EMPTY; 6];
        let mut rng = Scripted(vec![0; 5]);
        shuffle(&mut codes, &mut rng);
        assert!(rng.0.is_empty());
    }

    #[test]
    fn test_shuffle_trivial_lengths() {
        let mut empty: Vec<RoleCode> = Vec::new();
        shuffle(&mut empty, &mut Scripted(Vec::new()));

        let mut single = vec![RoleCode::EMPTY];
        shuffle(&mut single, &mut Scripted(Vec::new()));
        assert_eq!(single, vec![RoleCode::EMPTY]);
    }

    #[test]
    fn test_next_stripe_is_permutation() {
        let config = StripeConfig::new(24, 3, 7, 1).unwrap();
        let layout = build_canonical(&config);
        let expected = sorted(layout.codes());

        for generator in GeneratorKind::ALL {
            for hash in HashKind::ALL {
                for index in 0..200 {
                    let stripe = next_stripe(index, &layout, hash, generator);
                    assert_eq!(stripe.len(), layout.len());
                    assert_eq!(
                        sorted(stripe.codes()),
                        expected,
                        "{} {} {}",
                        generator,
                        hash,
                        index
                    );
                }
            }
        }
    }

    #[test]
    fn test_next_stripe_deterministic() {
        let config = StripeConfig::new(16, 2, 6, 1).unwrap();
        let layout = build_canonical(&config);

        for generator in GeneratorKind::ALL {
            for hash in HashKind::ALL {
                for index in [0u64, 1, 1000, u64::MAX] {
                    assert_eq!(
                        next_stripe(index, &layout, hash, generator),
                        next_stripe(index, &layout, hash, generator)
                    );
                }
            }
        }
    }

    #[test]
    fn test_fill_stripe_matches_next_stripe() {
        let config = StripeConfig::new(12, 2, 4, 1).unwrap();
        let layout = build_canonical(&config);
        let mut stripe = Stripe::from_canonical(&layout);

        for index in 0..50 {
            fill_stripe(
                &mut stripe,
                index,
                &layout,
                HashKind::Multiplicative,
                GeneratorKind::Xorshift128,
            );
            assert_eq!(
                stripe,
                next_stripe(index, &layout, HashKind::Multiplicative, GeneratorKind::Xorshift128)
            );
        }
    }

    #[test]
    fn test_generators_differ() {
        let config = StripeConfig::new(24, 3, 7, 1).unwrap();
        let layout = build_canonical(&config);

        // Over many stripes, two different generators should not agree everywhere
        let same = (0..100)
            .filter(|&i| {
                next_stripe(i, &layout, HashKind::Fnv1a, GeneratorKind::Mt64)
                    == next_stripe(i, &layout, HashKind::Fnv1a, GeneratorKind::Xorshift128Plus)
            })
            .count();
        assert!(same < 100);
    }

    #[test]
    fn test_shuffle_position_coverage() {
        // The empty slot should visit every position over many stripes
        let config = StripeConfig::new(10, 2, 4, 1).unwrap();
        let layout = build_canonical(&config);
        let mut hits = vec![0u32; layout.len()];

        for index in 0..5000 {
            let stripe = next_stripe(index, &layout, HashKind::Fnv1a, GeneratorKind::Mt64);
            let pos = stripe.codes().iter().position(|&c| c == RoleCode::EMPTY).unwrap();
            hits[pos] += 1;
        }

        // 5000 / 10 = 500 per position; allow wide slack
        for count in hits {
            assert!(count > 350 && count < 650, "position count {} outside expected range", count);
        }
    }
}
