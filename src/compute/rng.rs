//! Seedable random number source owned by one population.

use rand::prelude::*;

/// Random number generator wrapper for selection and mutation.
#[derive(Debug, Clone)]
pub struct PopulationRng {
    rng: StdRng,
}

impl PopulationRng {
    /// Create from seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create with random seed.
    pub fn random() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// RNG for one offspring chunk of a parallel generation.
    ///
    /// Depends only on the generation seed and the chunk position, so results
    /// do not vary with the number of worker threads.
    pub fn for_chunk(generation_seed: u64, chunk: usize) -> StdRng {
        StdRng::seed_from_u64(generation_seed ^ (chunk as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
    }

    /// Generate next u64 for seeding child RNGs.
    pub fn next_seed(&mut self) -> u64 {
        self.rng.r#gen()
    }

    /// Underlying generator.
    pub fn inner(&mut self) -> &mut StdRng {
        &mut self.rng
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = PopulationRng::new(7);
        let mut b = PopulationRng::new(7);
        let xs: Vec<u64> = (0..8).map(|_| a.next_seed()).collect();
        let ys: Vec<u64> = (0..8).map(|_| b.next_seed()).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn test_chunk_streams_differ() {
        let mut c0 = PopulationRng::for_chunk(11, 0);
        let mut c1 = PopulationRng::for_chunk(11, 1);
        assert_ne!(c0.r#gen::<u64>(), c1.r#gen::<u64>());
    }
}
