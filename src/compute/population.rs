//! Double-buffered population controller.

use std::io::{Read, Write};
use std::path::Path;

use super::landscape::{FitnessLandscape, LandscapeError};
use super::organism::Organism;
use super::rng::PopulationRng;
use super::selection::{Roulette, Selector, Tournament, breed};
use super::stats::PopulationStats;
use super::weighted_index::FenwickIndex;
use crate::persist::{PopulationSnapshot, SnapshotError, SnapshotHook};
use crate::schema::{Execution, PopulationConfig, SelectionPolicy};

/// Largest allowed population.
pub const MAX_POPULATION: usize = 100_000;

/// Population errors.
#[derive(Debug, thiserror::Error)]
pub enum PopulationError {
    #[error("Population size {size} exceeds the limit of {max}")]
    PopulationTooLarge { size: usize, max: usize },
    #[error("Mutation rate {0} must lie in [0, 1]")]
    InvalidMutationRate(f64),
    #[error("Start ({x}, {y}) is outside the {width}x{height} landscape")]
    StartOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
    #[error("Population went extinct in generation {generation}: total fitness is zero")]
    Extinction { generation: u64 },
    #[error("Landscape error: {0}")]
    Landscape(#[from] LandscapeError),
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),
}

/// Lifecycle state of a population.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PopulationState {
    /// Seeded and able to evolve.
    #[default]
    Ready,
    /// Roulette selection found zero total fitness.
    Extinct,
}

/// How an `evolve` call finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvolveStatus {
    /// Every requested generation ran.
    Completed,
    /// Nothing ran because the population is empty.
    EmptyPopulation,
}

/// Summary of an `evolve` call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvolveReport {
    pub status: EvolveStatus,
    /// Generations completed by this call.
    pub generations_run: u64,
    /// Generation counter after the call.
    pub generation: u64,
}

/// A population of point-genotype organisms on one fitness landscape.
///
/// Two organism buffers alternate roles: each generation reads the current
/// buffer and overwrites the other one, then the roles flip.
pub struct Population {
    landscape: FitnessLandscape,
    buffer_a: Vec<Organism>,
    buffer_b: Vec<Organism>,
    current_is_a: bool,
    mutation_rate: f64,
    generation: u64,
    rng: PopulationRng,
    roulette: FenwickIndex,
    execution: Execution,
    state: PopulationState,
    /// Landscape revision the current buffer was last scored against.
    scored_revision: u64,
}

impl Population {
    /// Create a population with every organism at the configured start
    /// (default: landscape center).
    pub fn new(landscape: FitnessLandscape, config: &PopulationConfig) -> Result<Self, PopulationError> {
        check_size(config.size)?;
        check_mutation_rate(config.mutation_rate)?;

        let (x, y) = config.start.unwrap_or_else(|| landscape.center());
        check_start(&landscape, x, y)?;

        let rng = match config.random_seed {
            Some(seed) => PopulationRng::new(seed),
            None => PopulationRng::random(),
        };

        let seed = Organism::scored(x, y, &landscape);
        let scored_revision = landscape.revision();

        Ok(Self {
            landscape,
            buffer_a: vec![seed; config.size],
            buffer_b: vec![seed; config.size],
            current_is_a: true,
            mutation_rate: config.mutation_rate,
            generation: 0,
            rng,
            roulette: FenwickIndex::new(config.size),
            execution: config.execution,
            state: PopulationState::Ready,
            scored_revision,
        })
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.buffer_a.len()
    }

    #[inline]
    pub fn mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    pub fn set_mutation_rate(&mut self, rate: f64) -> Result<(), PopulationError> {
        check_mutation_rate(rate)?;
        self.mutation_rate = rate;
        Ok(())
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[inline]
    pub fn state(&self) -> PopulationState {
        self.state
    }

    pub fn execution(&self) -> Execution {
        self.execution
    }

    pub fn set_execution(&mut self, execution: Execution) {
        self.execution = execution;
    }

    pub fn landscape(&self) -> &FitnessLandscape {
        &self.landscape
    }

    /// Overwrite one landscape cell. Organism fitness is re-derived before
    /// the next generation or snapshot.
    pub fn set_cell(&mut self, x: usize, y: usize, value: f64) -> Result<(), PopulationError> {
        self.landscape.set(x, y, value)?;
        Ok(())
    }

    /// Resize the landscape. Organisms outside the new bounds are clamped
    /// into them before the next generation or snapshot.
    pub fn resize_landscape(&mut self, width: usize, height: usize) -> Result<(), PopulationError> {
        self.landscape.resize(width, height)?;
        log::debug!("Resized landscape to {width}x{height}");
        Ok(())
    }

    /// True if the landscape changed since the organisms were last scored.
    pub fn is_stale(&self) -> bool {
        self.scored_revision != self.landscape.revision()
    }

    /// The current generation, in buffer order.
    ///
    /// Cached fitness may be stale after a landscape edit; see
    /// [`Population::refresh_fitness`].
    pub fn organisms(&self) -> &[Organism] {
        if self.current_is_a {
            &self.buffer_a
        } else {
            &self.buffer_b
        }
    }

    /// Re-score the current generation against the landscape, clamping
    /// organisms into bounds first if the landscape shrank.
    pub fn refresh_fitness(&mut self) {
        let landscape = &self.landscape;
        let (width, height) = (landscape.width(), landscape.height());
        let current = if self.current_is_a {
            &mut self.buffer_a
        } else {
            &mut self.buffer_b
        };
        for organism in current.iter_mut() {
            organism.clamp_to(width, height);
            organism.refresh_fitness(landscape);
        }
        self.scored_revision = landscape.revision();
        log::debug!(
            "Re-scored {} organisms against landscape revision {}",
            current.len(),
            self.scored_revision
        );
    }

    fn ensure_scored(&mut self) {
        if self.is_stale() {
            self.refresh_fitness();
        }
    }

    /// Run `generations` generations with `policy`.
    pub fn evolve(
        &mut self,
        generations: u64,
        policy: SelectionPolicy,
    ) -> Result<EvolveReport, PopulationError> {
        self.run(generations, policy, None)
    }

    /// Run `generations` generations, handing a snapshot to `hook` before the
    /// first generation and after every completed one.
    pub fn evolve_with_hook<H: SnapshotHook>(
        &mut self,
        generations: u64,
        policy: SelectionPolicy,
        hook: &mut H,
    ) -> Result<EvolveReport, PopulationError> {
        self.run(generations, policy, Some(hook))
    }

    fn run(
        &mut self,
        generations: u64,
        policy: SelectionPolicy,
        mut hook: Option<&mut dyn SnapshotHook>,
    ) -> Result<EvolveReport, PopulationError> {
        if self.size() == 0 {
            log::warn!("Cannot evolve an empty population");
            return Ok(EvolveReport {
                status: EvolveStatus::EmptyPopulation,
                generations_run: 0,
                generation: self.generation,
            });
        }

        self.ensure_scored();
        if let Some(hook) = hook.as_deref_mut() {
            hook.on_generation(&self.snapshot())?;
        }

        for run in 0..generations {
            if let Err(err) = self.advance(policy) {
                log::warn!("{err} (after {run} of {generations} requested generations)");
                return Err(err);
            }
            if let Some(hook) = hook.as_deref_mut() {
                hook.on_generation(&self.snapshot())?;
            }
        }

        Ok(EvolveReport {
            status: EvolveStatus::Completed,
            generations_run: generations,
            generation: self.generation,
        })
    }

    /// Advance exactly one generation.
    ///
    /// An empty population is left untouched and reported as
    /// [`EvolveStatus::EmptyPopulation`].
    pub fn step(&mut self, policy: SelectionPolicy) -> Result<EvolveStatus, PopulationError> {
        if self.size() == 0 {
            log::warn!("Cannot step an empty population");
            return Ok(EvolveStatus::EmptyPopulation);
        }
        self.advance(policy)?;
        Ok(EvolveStatus::Completed)
    }

    fn advance(&mut self, policy: SelectionPolicy) -> Result<(), PopulationError> {
        self.ensure_scored();

        let (parents, offspring) = if self.current_is_a {
            (&self.buffer_a, &mut self.buffer_b)
        } else {
            (&self.buffer_b, &mut self.buffer_a)
        };

        match policy {
            SelectionPolicy::Tournament { size } => {
                let selector = Tournament::new(size);
                breed(
                    &selector,
                    parents,
                    offspring,
                    &self.landscape,
                    self.mutation_rate,
                    &mut self.rng,
                    self.execution,
                );
            }
            SelectionPolicy::Roulette => {
                let mut selector = Roulette::new(&mut self.roulette);
                if selector.prepare(parents).is_err() {
                    self.state = PopulationState::Extinct;
                    return Err(PopulationError::Extinction {
                        generation: self.generation + 1,
                    });
                }
                breed(
                    &selector,
                    parents,
                    offspring,
                    &self.landscape,
                    self.mutation_rate,
                    &mut self.rng,
                    self.execution,
                );
            }
        }

        self.current_is_a = !self.current_is_a;
        self.generation += 1;
        self.state = PopulationState::Ready;
        Ok(())
    }

    /// Put every organism of both buffers at `(x, y)` and restart the
    /// generation count.
    pub fn reset(&mut self, x: usize, y: usize) -> Result<(), PopulationError> {
        check_start(&self.landscape, x, y)?;
        let seed = Organism::scored(x, y, &self.landscape);
        self.buffer_a.fill(seed);
        self.buffer_b.fill(seed);
        self.generation = 0;
        self.state = PopulationState::Ready;
        self.scored_revision = self.landscape.revision();
        Ok(())
    }

    /// Snapshot of the current generation. Stale organisms are reported with
    /// their fitness on the current landscape.
    pub fn snapshot(&self) -> PopulationSnapshot {
        let organisms = if self.is_stale() {
            let (width, height) = (self.landscape.width(), self.landscape.height());
            self.organisms()
                .iter()
                .map(|o| {
                    let mut o = *o;
                    o.clamp_to(width, height);
                    o.refresh_fitness(&self.landscape);
                    o
                })
                .collect()
        } else {
            self.organisms().to_vec()
        };

        PopulationSnapshot {
            mutation_rate: self.mutation_rate,
            generation: self.generation,
            organisms,
        }
    }

    /// Write the current generation in the snapshot text format.
    pub fn save<W: Write>(&self, writer: &mut W) -> Result<(), PopulationError> {
        self.snapshot()
            .write_to(writer)
            .map_err(SnapshotError::from)?;
        Ok(())
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), PopulationError> {
        self.snapshot().save_to_path(path)?;
        Ok(())
    }

    /// Replace size, mutation rate, generation, and organisms from a snapshot.
    /// Nothing changes unless the whole snapshot is valid for this landscape.
    pub fn load<R: Read>(&mut self, reader: R) -> Result<(), PopulationError> {
        let snapshot = PopulationSnapshot::load(reader)?;
        self.restore(snapshot)
    }

    pub fn load_from_path<P: AsRef<Path>>(&mut self, path: P) -> Result<(), PopulationError> {
        let snapshot = PopulationSnapshot::load_from_path(path)?;
        self.restore(snapshot)
    }

    /// Apply a parsed snapshot. Cached fitness values are taken from the
    /// snapshot as-is.
    pub fn restore(&mut self, snapshot: PopulationSnapshot) -> Result<(), PopulationError> {
        snapshot.validate_for(&self.landscape)?;

        let size = snapshot.organisms.len();
        self.mutation_rate = snapshot.mutation_rate;
        self.generation = snapshot.generation;
        self.buffer_a = snapshot.organisms;
        self.buffer_b = self.buffer_a.clone();
        self.current_is_a = true;
        self.roulette = FenwickIndex::new(size);
        self.state = PopulationState::Ready;
        self.scored_revision = self.landscape.revision();
        Ok(())
    }

    /// Swap in a landscape parsed from `reader`. On error the current
    /// landscape is kept.
    pub fn load_landscape<R: Read>(&mut self, reader: R) -> Result<(), PopulationError> {
        let landscape = FitnessLandscape::load(reader)?;
        self.replace_landscape(landscape);
        Ok(())
    }

    pub fn load_landscape_from_path<P: AsRef<Path>>(
        &mut self,
        path: P,
    ) -> Result<(), PopulationError> {
        let landscape = FitnessLandscape::load_from_path(path)?;
        self.replace_landscape(landscape);
        Ok(())
    }

    /// Replace the landscape and re-score the current generation.
    pub fn replace_landscape(&mut self, landscape: FitnessLandscape) {
        self.landscape.replace(landscape);
        self.refresh_fitness();
    }

    /// Summary statistics of the current generation.
    pub fn stats(&self) -> PopulationStats {
        PopulationStats::from_organisms(self.organisms())
    }
}

fn check_size(size: usize) -> Result<(), PopulationError> {
    if size > MAX_POPULATION {
        return Err(PopulationError::PopulationTooLarge {
            size,
            max: MAX_POPULATION,
        });
    }
    Ok(())
}

fn check_mutation_rate(rate: f64) -> Result<(), PopulationError> {
    if (0.0..=1.0).contains(&rate) {
        Ok(())
    } else {
        Err(PopulationError::InvalidMutationRate(rate))
    }
}

fn check_start(landscape: &FitnessLandscape, x: usize, y: usize) -> Result<(), PopulationError> {
    if landscape.contains(x, y) {
        Ok(())
    } else {
        Err(PopulationError::StartOutOfBounds {
            x,
            y,
            width: landscape.width(),
            height: landscape.height(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 2x2 landscape `[[0, 1], [1, 0]]`.
    fn checkerboard() -> FitnessLandscape {
        FitnessLandscape::from_rows(vec![vec![0.0, 1.0], vec![1.0, 0.0]]).unwrap()
    }

    fn config(size: usize, mutation_rate: f64) -> PopulationConfig {
        PopulationConfig {
            size,
            mutation_rate,
            start: Some((0, 0)),
            random_seed: Some(42),
            execution: Execution::Sequential,
        }
    }

    #[test]
    fn test_new_defaults_to_center() {
        let landscape = FitnessLandscape::flat(10, 6, 1.0).unwrap();
        let config = PopulationConfig {
            size: 5,
            random_seed: Some(1),
            ..Default::default()
        };
        let population = Population::new(landscape, &config).unwrap();
        assert!(population.organisms().iter().all(|o| o.genotype() == (5, 3)));
        assert_eq!(population.generation(), 0);
        assert_eq!(population.state(), PopulationState::Ready);
    }

    #[test]
    fn test_new_rejects_bad_parameters() {
        assert!(matches!(
            Population::new(checkerboard(), &config(MAX_POPULATION + 1, 0.0)),
            Err(PopulationError::PopulationTooLarge { .. })
        ));
        assert!(matches!(
            Population::new(checkerboard(), &config(4, -0.1)),
            Err(PopulationError::InvalidMutationRate(_))
        ));
        let mut bad_start = config(4, 0.0);
        bad_start.start = Some((2, 0));
        assert!(matches!(
            Population::new(checkerboard(), &bad_start),
            Err(PopulationError::StartOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_no_movement_without_mutation() {
        let mut population = Population::new(checkerboard(), &config(4, 0.0)).unwrap();
        population
            .evolve(1, SelectionPolicy::Tournament { size: 2 })
            .unwrap();
        assert!(population.organisms().iter().all(|o| o.genotype() == (0, 0)));
        assert_eq!(population.generation(), 1);
    }

    #[test]
    fn test_roulette_on_zero_fitness_is_extinction() {
        let mut population = Population::new(checkerboard(), &config(4, 1.0)).unwrap();
        let err = population.evolve(1, SelectionPolicy::Roulette).unwrap_err();
        assert!(matches!(err, PopulationError::Extinction { generation: 1 }));
        assert_eq!(population.state(), PopulationState::Extinct);
        assert_eq!(population.generation(), 0);
        assert!(population.organisms().iter().all(|o| o.genotype() == (0, 0)));
    }

    #[test]
    fn test_tournament_survives_zero_fitness() {
        let mut population = Population::new(checkerboard(), &config(4, 1.0)).unwrap();
        let _ = population.evolve(1, SelectionPolicy::Roulette);
        population
            .evolve(3, SelectionPolicy::Tournament { size: 2 })
            .unwrap();
        assert_eq!(population.state(), PopulationState::Ready);
        assert_eq!(population.generation(), 3);
    }

    #[test]
    fn test_evolve_counts_generations() {
        let landscape = FitnessLandscape::flat(5, 5, 1.0).unwrap();
        let mut population = Population::new(landscape, &config(20, 0.5)).unwrap();

        let report = population.evolve(0, SelectionPolicy::Roulette).unwrap();
        assert_eq!(report.generations_run, 0);
        assert_eq!(population.generation(), 0);

        population.evolve(7, SelectionPolicy::Roulette).unwrap();
        assert_eq!(population.generation(), 7);
        population
            .evolve(3, SelectionPolicy::Tournament { size: 7 })
            .unwrap();
        assert_eq!(population.generation(), 10);
    }

    #[test]
    fn test_empty_population_is_reported() {
        let mut population = Population::new(checkerboard(), &config(0, 0.1)).unwrap();
        let report = population.evolve(5, SelectionPolicy::Roulette).unwrap();
        assert_eq!(report.status, EvolveStatus::EmptyPopulation);
        assert_eq!(report.generations_run, 0);
        assert_eq!(population.generation(), 0);
    }

    #[test]
    fn test_step_on_empty_population_is_not_extinction() {
        let mut population = Population::new(checkerboard(), &config(0, 0.1)).unwrap();
        let status = population.step(SelectionPolicy::Roulette).unwrap();
        assert_eq!(status, EvolveStatus::EmptyPopulation);
        assert_eq!(population.state(), PopulationState::Ready);
        assert_eq!(population.generation(), 0);
    }

    #[test]
    fn test_step_reports_completed_generation() {
        let landscape = FitnessLandscape::flat(3, 3, 1.0).unwrap();
        let mut population = Population::new(landscape, &config(5, 0.5)).unwrap();
        let status = population.step(SelectionPolicy::Roulette).unwrap();
        assert_eq!(status, EvolveStatus::Completed);
        assert_eq!(population.generation(), 1);
    }

    #[test]
    fn test_roulette_survives_overflowing_fitness_sum() {
        let landscape = FitnessLandscape::flat(2, 2, 1e308).unwrap();
        let mut population = Population::new(landscape, &config(4, 0.5)).unwrap();
        population.evolve(3, SelectionPolicy::Roulette).unwrap();
        assert_eq!(population.generation(), 3);
        assert!(population.organisms().iter().all(|o| o.fitness == 1e308));
    }

    #[test]
    fn test_save_writes_snapshot_format() {
        let landscape = FitnessLandscape::flat(3, 3, 2.0).unwrap();
        let mut population = Population::new(landscape, &config(2, 0.25)).unwrap();
        population.reset(1, 2).unwrap();

        let mut out = Vec::new();
        population.save(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "N 2\nM 0.25\nG 0\n1 2 2\n1 2 2\n");
    }

    #[test]
    fn test_reset_restores_both_buffers() {
        let landscape = FitnessLandscape::flat(6, 6, 2.0).unwrap();
        let mut population = Population::new(landscape, &config(10, 1.0)).unwrap();
        population
            .evolve(5, SelectionPolicy::Tournament { size: 3 })
            .unwrap();

        population.reset(4, 1).unwrap();
        assert_eq!(population.generation(), 0);
        assert!(population.organisms().iter().all(|o| o.genotype() == (4, 1) && o.fitness == 2.0));
        assert!(population.buffer_a.iter().chain(&population.buffer_b).all(|o| o.genotype() == (4, 1)));
        assert!(population.reset(6, 0).is_err());
    }

    #[test]
    fn test_landscape_edit_rescores_before_next_generation() {
        let mut population = Population::new(checkerboard(), &config(4, 0.0)).unwrap();
        population.set_cell(0, 0, 3.0).unwrap();
        assert!(population.is_stale());
        assert_eq!(population.snapshot().organisms[0].fitness, 3.0);

        // Zero total fitness before the edit, so roulette only works if the
        // index is rebuilt from re-scored organisms.
        population.evolve(1, SelectionPolicy::Roulette).unwrap();
        assert!(!population.is_stale());
        assert!(population.organisms().iter().all(|o| o.fitness == 3.0));
    }

    #[test]
    fn test_shrunk_landscape_clamps_organisms() {
        let landscape = FitnessLandscape::flat(10, 10, 1.0).unwrap();
        let mut population = Population::new(landscape, &config(3, 0.0)).unwrap();
        population.reset(9, 9).unwrap();
        population.resize_landscape(4, 4).unwrap();
        population.refresh_fitness();
        assert!(population.organisms().iter().all(|o| o.genotype() == (3, 3)));
    }

    #[test]
    fn test_evolve_after_shrink_clamps_first() {
        let landscape = FitnessLandscape::flat(10, 10, 1.0).unwrap();
        let mut population = Population::new(landscape, &config(4, 0.5)).unwrap();
        population.reset(5, 5).unwrap();
        population.resize_landscape(2, 2).unwrap();
        assert!(population.is_stale());

        population
            .evolve(1, SelectionPolicy::Tournament { size: 2 })
            .unwrap();
        assert!(population.organisms().iter().all(|o| o.x < 2 && o.y < 2));
    }

    #[test]
    fn test_replacing_with_fresh_landscape_rescores() {
        let landscape = FitnessLandscape::flat(10, 10, 1.0).unwrap();
        let mut population = Population::new(landscape, &config(4, 0.0)).unwrap();
        population.reset(5, 5).unwrap();

        // A newly built landscape starts at revision 0, same as the old one
        population.replace_landscape(FitnessLandscape::flat(2, 2, 3.0).unwrap());
        assert!(!population.is_stale());
        assert!(population.organisms().iter().all(|o| o.genotype() == (1, 1) && o.fitness == 3.0));

        population
            .evolve(2, SelectionPolicy::Tournament { size: 2 })
            .unwrap();
        assert_eq!(population.generation(), 2);
    }

    #[test]
    fn test_invalid_edits_are_rejected() {
        let mut population = Population::new(checkerboard(), &config(4, 0.0)).unwrap();
        assert!(matches!(
            population.set_cell(2, 0, 1.0),
            Err(PopulationError::Landscape(LandscapeError::OutOfBounds { .. }))
        ));
        assert!(matches!(
            population.set_cell(0, 0, -1.0),
            Err(PopulationError::Landscape(LandscapeError::InvalidScore(_)))
        ));
        assert!(matches!(
            population.resize_landscape(101, 1),
            Err(PopulationError::Landscape(LandscapeError::TooLarge { .. }))
        ));
        assert!(!population.is_stale());
    }

    #[test]
    fn test_failed_landscape_load_keeps_previous() {
        let mut population = Population::new(checkerboard(), &config(4, 0.0)).unwrap();
        let before = population.landscape().clone();
        let err = population
            .load_landscape("200 2 1 1\n".as_bytes())
            .unwrap_err();
        assert!(matches!(
            err,
            PopulationError::Landscape(LandscapeError::TooLarge { .. })
        ));
        let err = population
            .load_landscape("2 2 1 1\n0 1\n".as_bytes())
            .unwrap_err();
        assert!(matches!(
            err,
            PopulationError::Landscape(LandscapeError::Malformed(_))
        ));
        assert_eq!(population.landscape(), &before);
    }

    #[test]
    fn test_load_landscape_rescores() {
        let mut population = Population::new(checkerboard(), &config(4, 0.0)).unwrap();
        population
            .load_landscape("2 2 5 1\n4 0\n0 0\n".as_bytes())
            .unwrap();
        assert!(population.organisms().iter().all(|o| o.fitness == 4.0));
    }

    #[test]
    fn test_same_seed_same_trajectory() {
        let run = |execution| {
            let landscape = FitnessLandscape::from_rows(vec![vec![1.0, 2.0, 3.0, 4.0]; 4]).unwrap();
            let mut config = config(50, 0.3);
            config.execution = execution;
            let mut population = Population::new(landscape, &config).unwrap();
            population.evolve(10, SelectionPolicy::Roulette).unwrap();
            population.organisms().to_vec()
        };

        assert_eq!(run(Execution::Sequential), run(Execution::Sequential));
        let parallel = Execution::Parallel { chunk_size: 8 };
        assert_eq!(run(parallel), run(parallel));
    }
}
