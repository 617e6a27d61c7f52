mod containers;

use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg64;

/// An iterator that will generate `num` random keys in `[0, max)`, with repetitions.
/// The same seed always gives the same sequence
pub struct RandomKeys {
    remaining: usize,
    max: i32,
    rng: Pcg64,
}

impl RandomKeys {
    pub fn new(num: usize, max: i32, seed: u64) -> RandomKeys {
        assert!(max > 0);
        RandomKeys {
            remaining: num,
            max,
            rng: Pcg64::seed_from_u64(seed),
        }
    }

    /// Draw a value in `[0, bound)` from the same stream
    pub fn below(&mut self, bound: usize) -> usize {
        self.rng.gen_range(0, bound)
    }
}

impl Iterator for RandomKeys {
    type Item = i32;

    fn next(&mut self) -> Option<i32> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(self.rng.gen_range(0, self.max))
    }
}
