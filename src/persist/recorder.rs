//! Snapshot hooks for recording a run generation by generation.

use std::fs;
use std::path::{Path, PathBuf};

use super::snapshot::{PopulationSnapshot, SnapshotError};

/// Receives a snapshot before the first generation of an `evolve` call and
/// after every completed generation.
pub trait SnapshotHook {
    fn on_generation(&mut self, snapshot: &PopulationSnapshot) -> Result<(), SnapshotError>;
}

impl<F> SnapshotHook for F
where
    F: FnMut(&PopulationSnapshot) -> Result<(), SnapshotError>,
{
    fn on_generation(&mut self, snapshot: &PopulationSnapshot) -> Result<(), SnapshotError> {
        self(snapshot)
    }
}

/// Writes `gen_<generation>.txt` snapshot files into a directory.
///
/// Usage:
/// ```ignore
/// let mut recorder = SnapshotRecorder::new("runs/a")?;
/// population.evolve_with_hook(100, policy, &mut recorder)?;
/// println!("{} snapshots", recorder.written().len());
/// ```
#[derive(Debug)]
pub struct SnapshotRecorder {
    dir: PathBuf,
    /// Record generations divisible by this (1 = every generation).
    interval: u64,
    written: Vec<PathBuf>,
}

impl SnapshotRecorder {
    /// Create a recorder, creating `dir` if needed.
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self, SnapshotError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            interval: 1,
            written: Vec::new(),
        })
    }

    /// Only record generations that are a multiple of `interval`.
    pub fn with_interval(mut self, interval: u64) -> Self {
        self.interval = interval.max(1);
        self
    }

    /// Path of the snapshot file for `generation`.
    pub fn path_for(&self, generation: u64) -> PathBuf {
        self.dir.join(format!("gen_{generation}.txt"))
    }

    /// Files written so far, in order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl SnapshotHook for SnapshotRecorder {
    fn on_generation(&mut self, snapshot: &PopulationSnapshot) -> Result<(), SnapshotError> {
        if snapshot.generation % self.interval != 0 {
            return Ok(());
        }
        let path = self.path_for(snapshot.generation);
        snapshot.save_to_path(&path)?;
        log::debug!("Wrote snapshot {}", path.display());
        self.written.push(path);
        Ok(())
    }
}
