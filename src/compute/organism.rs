//! Point-genotype organisms.

use rand::Rng;

use super::FitnessLandscape;

/// One mutation step on the genotype grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationDirection {
    IncreaseX,
    DecreaseX,
    IncreaseY,
    DecreaseY,
}

impl MutationDirection {
    pub const ALL: [MutationDirection; 4] = [
        MutationDirection::IncreaseX,
        MutationDirection::DecreaseX,
        MutationDirection::IncreaseY,
        MutationDirection::DecreaseY,
    ];

    /// Uniformly random direction.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

/// Genotype coordinate plus cached fitness.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Organism {
    pub x: usize,
    pub y: usize,
    /// Score of `(x, y)` as of the last [`Organism::refresh_fitness`].
    pub fitness: f64,
}

impl Organism {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y, fitness: 0.0 }
    }

    /// Organism at `(x, y)` already scored against `landscape`.
    pub fn scored(x: usize, y: usize, landscape: &FitnessLandscape) -> Self {
        let mut organism = Self::new(x, y);
        organism.refresh_fitness(landscape);
        organism
    }

    #[inline]
    pub fn refresh_fitness(&mut self, landscape: &FitnessLandscape) {
        self.fitness = landscape.get(self.x, self.y);
    }

    /// Move one step in `direction`. Steps that would leave
    /// `[0, width) x [0, height)` are ignored.
    #[inline]
    pub fn mutate(&mut self, direction: MutationDirection, width: usize, height: usize) {
        match direction {
            MutationDirection::IncreaseX => {
                if self.x + 1 < width {
                    self.x += 1;
                }
            }
            MutationDirection::DecreaseX => {
                if self.x > 0 {
                    self.x -= 1;
                }
            }
            MutationDirection::IncreaseY => {
                if self.y + 1 < height {
                    self.y += 1;
                }
            }
            MutationDirection::DecreaseY => {
                if self.y > 0 {
                    self.y -= 1;
                }
            }
        }
    }

    /// Pull the genotype into `[0, width) x [0, height)`.
    pub fn clamp_to(&mut self, width: usize, height: usize) {
        self.x = self.x.min(width.saturating_sub(1));
        self.y = self.y.min(height.saturating_sub(1));
    }

    #[inline]
    pub fn genotype(&self) -> (usize, usize) {
        (self.x, self.y)
    }
}
