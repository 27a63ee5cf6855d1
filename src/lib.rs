//! Landscape Evo - Point-genotype populations on 2D fitness landscapes.
//!
//! Every organism's genotype is an integer coordinate `(x, y)` and its fitness
//! is the landscape score at that cell. Generations advance by tournament or
//! roulette parent selection, a one-step bounded random-walk mutation, and a
//! fitness refresh, using two alternating organism buffers.
//!
//! # Architecture
//!
//! - `schema`: Configuration, selection policy, and landscape pattern types
//! - `compute`: Landscape, organisms, weighted index, selection, population
//! - `persist`: Snapshot text format and per-generation recording
//!
//! # Example
//!
//! ```rust,no_run
//! use landscape_evo::{
//!     compute::{FitnessLandscape, Population},
//!     schema::{PopulationConfig, SelectionPolicy},
//! };
//!
//! let landscape = FitnessLandscape::load_from_path("maps/peaks.map")?;
//! let config = PopulationConfig {
//!     size: 1000,
//!     mutation_rate: 0.01,
//!     random_seed: Some(42),
//!     ..Default::default()
//! };
//!
//! let mut population = Population::new(landscape, &config)?;
//! population.evolve(100, SelectionPolicy::Tournament { size: 7 })?;
//!
//! println!("Generation {}: {}", population.generation(), population.stats());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod compute;
pub mod persist;
pub mod schema;

// Re-export commonly used types
pub use compute::{FitnessLandscape, Organism, Population, PopulationError, PopulationStats};
pub use persist::{PopulationSnapshot, SnapshotRecorder};
pub use schema::{PopulationConfig, RunConfig, SelectionPolicy};
