//! MT19937-64 Mersenne Twister
//!
//! The large-state strategy: 312 words of state, period 2^19937 - 1. Seeding
//! follows the reference `init_genrand64`, so a given seed yields the same
//! stream as any conforming `mt19937_64`.

use super::RandomStream;
use rand_core::{impls, Error, RngCore};

const NN: usize = 312;
const MM: usize = 156;
const MATRIX_A: u64 = 0xb502_6f5a_a966_19e9;
const UPPER_MASK: u64 = 0xffff_ffff_8000_0000;
const LOWER_MASK: u64 = 0x0000_0000_7fff_ffff;

/// 64-bit Mersenne Twister
#[derive(Clone)]
pub struct Mt64 {
    state: [u64; NN],
    index: usize,
}

impl Mt64 {
    pub fn new(seed: u64) -> Self {
        let mut state = [0u64; NN];
        state[0] = seed;
        for i in 1..NN {
            let prev = state[i - 1];
            state[i] = 6_364_136_223_846_793_005u64
                .wrapping_mul(prev ^ (prev >> 62))
                .wrapping_add(i as u64);
        }
        Self { state, index: NN }
    }

    fn twist(&mut self) {
        for i in 0..NN {
            let x = (self.state[i] & UPPER_MASK) | (self.state[(i + 1) % NN] & LOWER_MASK);
            let mut xa = x >> 1;
            if x & 1 != 0 {
                xa ^= MATRIX_A;
            }
            self.state[i] = self.state[(i + MM) % NN] ^ xa;
        }
        self.index = 0;
    }
}

impl std::fmt::Debug for Mt64 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mt64").field("index", &self.index).finish_non_exhaustive()
    }
}

impl RngCore for Mt64 {
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        if self.index >= NN {
            self.twist();
        }
        let mut x = self.state[self.index];
        self.index += 1;

        // Tempering
        x ^= (x >> 29) & 0x5555_5555_5555_5555;
        x ^= (x << 17) & 0x71d6_7fff_eda6_0000;
        x ^= (x << 37) & 0xfff7_eee0_0000_0000;
        x ^= x >> 43;
        x
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        impls::fill_bytes_via_next(self, dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl RandomStream for Mt64 {
    fn from_stripe_seed(seed: u64) -> Self {
        Self::new(seed)
    }
}
