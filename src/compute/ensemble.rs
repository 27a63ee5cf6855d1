//! Independent replicate runs on the rayon thread pool.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::population::{Population, PopulationError};
use super::stats::PopulationStats;
use super::FitnessLandscape;
use crate::schema::{PopulationConfig, SelectionPolicy};

/// Outcome of one replicate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplicateResult {
    /// Replicate number.
    pub replicate: usize,
    /// Seed the replicate ran with.
    pub seed: u64,
    /// Generations completed.
    pub generations: u64,
    /// Final statistics.
    pub stats: PopulationStats,
    /// Wall time of the replicate.
    pub elapsed_seconds: f64,
}

/// Evolve `replicates` independent populations for `generations` each.
///
/// Replicate `i` uses seed `base_seed + i`, so a batch is reproducible. The
/// populations share nothing but a read-only copy of the landscape.
pub fn run_replicates(
    landscape: &FitnessLandscape,
    config: &PopulationConfig,
    policy: SelectionPolicy,
    generations: u64,
    replicates: usize,
    base_seed: u64,
) -> Vec<Result<ReplicateResult, PopulationError>> {
    log::info!(
        "Running {replicates} replicates of {generations} generations ({policy}, n={})",
        config.size
    );

    (0..replicates)
        .into_par_iter()
        .map(|replicate| -> Result<ReplicateResult, PopulationError> {
            let seed = base_seed.wrapping_add(replicate as u64);
            let config = PopulationConfig {
                random_seed: Some(seed),
                ..config.clone()
            };

            let start = std::time::Instant::now();
            let mut population = Population::new(landscape.clone(), &config)?;
            population.evolve(generations, policy)?;

            Ok(ReplicateResult {
                replicate,
                seed,
                generations: population.generation(),
                stats: population.stats(),
                elapsed_seconds: start.elapsed().as_secs_f64(),
            })
        })
        .collect()
}
