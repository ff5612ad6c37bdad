//! Width-jitter sources for natural corridors.
//!
//! The router only asks for a bounded integer per segment. Determinism of the whole carve
//! therefore reduces to the determinism of the source handed in.

use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

pub trait JitterSource {
    /// Returns a value in `0..bound`. A `bound` of 0 yields 0.
    fn next_below(&mut self, bound: u32) -> u32;
}

impl<F> JitterSource for F
where
    F: FnMut(u32) -> u32,
{
    fn next_below(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        self(bound) % bound
    }
}

/// ChaCha8-backed jitter. Each `(seed, stream)` pair yields an independent sequence.
#[derive(Clone, Debug)]
pub struct SeededJitter {
    rng: ChaCha8Rng,
}

impl SeededJitter {
    pub fn new(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed) }
    }

    /// Sequence for one stream (for example one connector) of a seeded carve.
    pub fn for_stream(seed: u64, stream: u64) -> Self {
        Self::new(mix_seed_stream(seed, stream))
    }
}

impl JitterSource for SeededJitter {
    fn next_below(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        self.rng.next_u32() % bound
    }
}

/// Always returns the midpoint of the range: natural corridors keep their base width.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoJitter;

impl JitterSource for NoJitter {
    fn next_below(&mut self, bound: u32) -> u32 {
        bound / 2
    }
}

pub(crate) fn mix_seed_stream(seed: u64, stream: u64) -> u64 {
    let mut mixed = seed ^ stream.wrapping_mul(0xD6E8_FD9A_5B89_7A4D);
    mixed ^= mixed >> 33;
    mixed = mixed.wrapping_mul(0xFF51_AFD7_ED55_8CCD);
    mixed ^= mixed >> 33;
    mixed = mixed.wrapping_mul(0xC4CE_B9FE_1A85_EC53);
    mixed ^ (mixed >> 33)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_jitter_is_reproducible_per_stream() {
        let draw = |mut jitter: SeededJitter| -> Vec<u32> {
            (0..32).map(|_| jitter.next_below(3)).collect()
        };
        assert_eq!(draw(SeededJitter::for_stream(7, 1)), draw(SeededJitter::for_stream(7, 1)));
        assert_ne!(draw(SeededJitter::for_stream(7, 1)), draw(SeededJitter::for_stream(7, 2)));
    }

    #[test]
    fn seeded_jitter_stays_below_bound() {
        let mut jitter = SeededJitter::new(2026);
        for _ in 0..200 {
            assert!(jitter.next_below(3) < 3);
        }
        assert_eq!(jitter.next_below(0), 0);
    }

    #[test]
    fn closures_act_as_jitter_sources() {
        let mut calls = 0;
        let mut counting = |bound: u32| {
            calls += 1;
            bound + 1
        };
        assert_eq!(counting.next_below(3), 1);
        assert_eq!(counting.next_below(0), 0);
        assert_eq!(calls, 1);
    }

    #[test]
    fn no_jitter_keeps_the_middle_value() {
        assert_eq!(NoJitter.next_below(3), 1);
    }
}
