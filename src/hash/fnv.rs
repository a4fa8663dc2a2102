//! FNV-1a, 64-bit

use super::SeedHash;

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// FNV-1a over the 8 bytes of the index, least significant byte first
#[derive(Debug, Clone, Copy, Default)]
pub struct Fnv1a64;

impl SeedHash for Fnv1a64 {
    #[inline]
    fn seed_for(&self, index: u64) -> u64 {
        index
            .to_le_bytes()
            .iter()
            .fold(FNV_OFFSET_BASIS, |h, &byte| {
                (h ^ byte as u64).wrapping_mul(FNV_PRIME)
            })
    }
}
