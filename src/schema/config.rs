//! Configuration types for populations and evolution runs.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::{DEFAULT_TOURNAMENT_SIZE, InvalidSelectionPolicy, LandscapePattern, SelectionPolicy};
use crate::compute::{MAX_LANDSCAPE_DIM, MAX_POPULATION};

fn default_size() -> usize {
    10_000
}
fn default_mutation_rate() -> f64 {
    0.01
}
fn default_generations() -> u64 {
    100
}
fn default_chunk_size() -> usize {
    1024
}

/// How offspring slots of one generation are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode")]
pub enum Execution {
    /// One pass over the offspring using the population RNG.
    #[default]
    Sequential,
    /// Offspring split into chunks computed on the rayon pool, each chunk with
    /// its own RNG seeded from a per-generation seed.
    Parallel {
        #[serde(default = "default_chunk_size")]
        chunk_size: usize,
    },
}

/// Population parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulationConfig {
    /// Number of organisms.
    #[serde(default = "default_size")]
    pub size: usize,
    /// Probability (0.0-1.0) that an offspring takes one mutation step.
    #[serde(default = "default_mutation_rate")]
    pub mutation_rate: f64,
    /// Starting genotype. Defaults to the landscape center.
    #[serde(default)]
    pub start: Option<(usize, usize)>,
    /// Random seed for reproducibility.
    #[serde(default)]
    pub random_seed: Option<u64>,
    /// Offspring execution strategy.
    #[serde(default)]
    pub execution: Execution,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            size: default_size(),
            mutation_rate: default_mutation_rate(),
            start: None,
            random_seed: None,
            execution: Execution::default(),
        }
    }
}

/// Where the fitness landscape of a run comes from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum LandscapeSource {
    /// A landscape map file.
    File { path: PathBuf },
    /// A generated pattern.
    Pattern {
        width: usize,
        height: usize,
        pattern: LandscapePattern,
    },
}

impl Default for LandscapeSource {
    fn default() -> Self {
        Self::Pattern {
            width: 20,
            height: 20,
            pattern: LandscapePattern::default(),
        }
    }
}

/// Top-level configuration for a single evolution run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Fitness landscape.
    #[serde(default)]
    pub landscape: LandscapeSource,
    /// Population parameters.
    #[serde(default)]
    pub population: PopulationConfig,
    /// Parent selection policy.
    #[serde(default)]
    pub selection: SelectionPolicy,
    /// Number of generations to run.
    #[serde(default = "default_generations")]
    pub generations: u64,
    /// If set, write a snapshot of every generation into this directory.
    #[serde(default)]
    pub snapshot_dir: Option<PathBuf>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            landscape: LandscapeSource::default(),
            population: PopulationConfig::default(),
            selection: SelectionPolicy::default(),
            generations: default_generations(),
            snapshot_dir: None,
        }
    }
}

impl PopulationConfig {
    /// Validate population parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size > MAX_POPULATION {
            return Err(ConfigError::PopulationTooLarge {
                size: self.size,
                max: MAX_POPULATION,
            });
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(ConfigError::InvalidMutationRate(self.mutation_rate));
        }
        if let Execution::Parallel { chunk_size: 0 } = self.execution {
            return Err(ConfigError::InvalidChunkSize);
        }
        Ok(())
    }
}

impl RunConfig {
    /// Replace the selection policy from an identifier such as `"t"` or
    /// `"roulette"`. A configured tournament size is kept. Unknown
    /// identifiers fall back to the default tournament and the reason is
    /// returned.
    pub fn override_selection(&mut self, id: &str) -> Option<InvalidSelectionPolicy> {
        let size = match self.selection {
            SelectionPolicy::Tournament { size } => size,
            SelectionPolicy::Roulette => DEFAULT_TOURNAMENT_SIZE,
        };
        let resolved = SelectionPolicy::resolve(id, size);
        self.selection = resolved.policy;
        resolved.fallback
    }

    /// Validate the run configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.population.validate()?;

        if let SelectionPolicy::Tournament { size: 0 } = self.selection {
            return Err(ConfigError::InvalidTournamentSize);
        }
        if let LandscapeSource::Pattern { width, height, .. } = self.landscape
            && (width == 0 || height == 0 || width > MAX_LANDSCAPE_DIM || height > MAX_LANDSCAPE_DIM)
        {
            return Err(ConfigError::InvalidLandscapeDimensions { width, height });
        }
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Population size {size} exceeds the limit of {max}")]
    PopulationTooLarge { size: usize, max: usize },
    #[error("Mutation rate {0} must lie in [0, 1]")]
    InvalidMutationRate(f64),
    #[error("Tournament size must be at least 1")]
    InvalidTournamentSize,
    #[error("Parallel chunk size must be non-zero")]
    InvalidChunkSize,
    #[error("Landscape dimensions {width}x{height} must be within 1..={max}", max = MAX_LANDSCAPE_DIM)]
    InvalidLandscapeDimensions { width: usize, height: usize },
}
