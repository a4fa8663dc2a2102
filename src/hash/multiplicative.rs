//! Multiplicative (kernel-style) hash
//!
//! Six shift-and-accumulate steps, each shifting the current value. All
//! arithmetic wraps modulo 2^64, so the step order determines the result.

use super::SeedHash;

/// Steps applied in order: `h = h ± (h << shift)`
const STEPS: [(Op, u32); 6] = [
    (Op::Sub, 18),
    (Op::Sub, 33),
    (Op::Add, 3),
    (Op::Sub, 3),
    (Op::Add, 4),
    (Op::Add, 2),
];

#[derive(Debug, Clone, Copy)]
enum Op {
    Add,
    Sub,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MultiplicativeHash;

impl SeedHash for MultiplicativeHash {
    #[inline]
    fn seed_for(&self, index: u64) -> u64 {
        STEPS.iter().fold(index, |h, &(op, shift)| {
            let shifted = h << shift;
            match op {
                Op::Add => h.wrapping_add(shifted),
                Op::Sub => h.wrapping_sub(shifted),
            }
        })
    }
}
