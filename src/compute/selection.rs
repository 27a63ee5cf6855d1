//! Parent selection and offspring production.
//!
//! A generation is built by picking a parent for every offspring slot with a
//! [`Selector`], copying its genotype, applying at most one mutation step, and
//! re-scoring against the landscape. Slots are independent of one another, so
//! they can be filled sequentially or in parallel chunks.

use rand::Rng;
use rayon::prelude::*;

use super::organism::{MutationDirection, Organism};
use super::rng::PopulationRng;
use super::weighted_index::WeightedIndex;
use super::FitnessLandscape;
use crate::schema::Execution;

/// Total parent fitness is zero, so fitness-proportionate selection cannot
/// pick anyone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Population is extinct: total fitness is zero")]
pub struct Extinction;

/// Parent selection strategy.
pub trait Selector {
    /// Called once per generation before any parent is picked.
    fn prepare(&mut self, _parents: &[Organism]) -> Result<(), Extinction> {
        Ok(())
    }

    /// Pick the index of one parent. `parents` must be non-empty.
    fn pick<R: Rng + ?Sized>(&self, parents: &[Organism], rng: &mut R) -> usize;
}

/// Tournament selection with strict-max comparison.
#[derive(Debug, Clone, Copy)]
pub struct Tournament {
    size: usize,
}

impl Tournament {
    /// A size of 0 is treated as 1.
    pub fn new(size: usize) -> Self {
        Self { size: size.max(1) }
    }

    pub fn size(&self) -> usize {
        self.size
    }
}

impl Selector for Tournament {
    fn pick<R: Rng + ?Sized>(&self, parents: &[Organism], rng: &mut R) -> usize {
        tournament_winner(parents, self.size, rng)
    }
}

/// Draw `size` candidates uniformly with replacement and return the fittest.
///
/// Later candidates replace the current best only on strictly greater
/// fitness, so ties go to the earliest draw.
pub fn tournament_winner<R: Rng + ?Sized>(parents: &[Organism], size: usize, rng: &mut R) -> usize {
    let n = parents.len();
    let mut best = rng.gen_range(0..n);
    for _ in 1..size.max(1) {
        let candidate = rng.gen_range(0..n);
        if parents[candidate].fitness > parents[best].fitness {
            best = candidate;
        }
    }
    best
}

/// Fitness-proportionate selection backed by a [`WeightedIndex`].
#[derive(Debug)]
pub struct Roulette<'a, W: WeightedIndex> {
    index: &'a mut W,
}

impl<'a, W: WeightedIndex> Roulette<'a, W> {
    pub fn new(index: &'a mut W) -> Self {
        Self { index }
    }
}

impl<W: WeightedIndex> Selector for Roulette<'_, W> {
    /// Rebuild the index from parent fitness.
    ///
    /// Scores are finite but their sum may not be. In that case every weight
    /// is divided by the largest one, which keeps the proportions.
    fn prepare(&mut self, parents: &[Organism]) -> Result<(), Extinction> {
        let mut weights: Vec<f64> = parents.iter().map(|p| p.fitness).collect();
        self.index.assign(&weights);

        if self.index.total_weight().is_infinite() {
            let max = weights.iter().copied().fold(0.0, f64::max);
            for w in &mut weights {
                *w /= max;
            }
            self.index.assign(&weights);
        }

        if self.index.total_weight() > 0.0 {
            Ok(())
        } else {
            Err(Extinction)
        }
    }

    fn pick<R: Rng + ?Sized>(&self, _parents: &[Organism], rng: &mut R) -> usize {
        // prepare() guarantees a positive finite total
        self.index.draw(rng).unwrap_or(0)
    }
}

/// Overwrite `child` with a copy of `parent`, mutate with probability
/// `mutation_rate`, and re-score.
#[inline]
pub fn spawn<R: Rng + ?Sized>(
    child: &mut Organism,
    parent: &Organism,
    landscape: &FitnessLandscape,
    mutation_rate: f64,
    rng: &mut R,
) {
    child.x = parent.x;
    child.y = parent.y;
    if rng.r#gen::<f64>() < mutation_rate {
        let direction = MutationDirection::random(rng);
        child.mutate(direction, landscape.width(), landscape.height());
    }
    child.refresh_fitness(landscape);
}

/// Fill every slot of `offspring` from `parents`.
///
/// `selector.prepare` must already have succeeded for `parents`.
pub fn breed<S: Selector + Sync>(
    selector: &S,
    parents: &[Organism],
    offspring: &mut [Organism],
    landscape: &FitnessLandscape,
    mutation_rate: f64,
    rng: &mut PopulationRng,
    execution: Execution,
) {
    if parents.is_empty() {
        return;
    }

    match execution {
        Execution::Sequential => {
            let rng = rng.inner();
            for child in offspring.iter_mut() {
                let parent = selector.pick(parents, rng);
                spawn(child, &parents[parent], landscape, mutation_rate, rng);
            }
        }
        Execution::Parallel { chunk_size } => {
            let generation_seed = rng.next_seed();
            offspring
                .par_chunks_mut(chunk_size.max(1))
                .enumerate()
                .for_each(|(chunk, children)| {
                    let mut rng = PopulationRng::for_chunk(generation_seed, chunk);
                    for child in children {
                        let parent = selector.pick(parents, &mut rng);
                        spawn(child, &parents[parent], landscape, mutation_rate, &mut rng);
                    }
                });
        }
    }
}
