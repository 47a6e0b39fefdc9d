// crates/ft_core/src/rng.rs
//
// Deterministic, integer-only RNG for the seeded tie policy.
// The tie seed is the only source of randomness in the engine; the same seed
// always yields the same tie-group orderings on every platform.

use rand_chacha::ChaCha20Rng;
use rand_core::{RngCore, SeedableRng};

/// Deterministic RNG for ties.
///
/// ChaCha20 with an explicit 32-byte seed derived from the 64-bit tie seed
/// (little-endian bytes in the first 8 positions; the rest 0).
#[derive(Debug, Clone)]
pub struct TieRng {
    rng: ChaCha20Rng,
}

impl TieRng {
    #[inline]
    pub fn from_seed_u64(seed: u64) -> Self {
        let mut seed32 = [0u8; 32];
        seed32[..8].copy_from_slice(&seed.to_le_bytes());
        Self { rng: ChaCha20Rng::from_seed(seed32) }
    }

    /// Unbiased integer in [0, n) by rejection sampling. `None` if `n == 0`.
    #[inline]
    pub fn gen_range(&mut self, n: u64) -> Option<u64> {
        if n == 0 {
            return None;
        }
        let threshold = n.wrapping_neg() % n; // == (2^64 % n)
        loop {
            let x = self.rng.next_u64();
            if x >= threshold {
                return Some(x % n);
            }
        }
    }

    /// Deterministic in-place Fisher–Yates shuffle.
    pub fn shuffle_in_place<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            if let Some(j) = self.gen_range(i as u64 + 1) {
                slice.swap(i, j as usize);
            }
        }
    }
}
