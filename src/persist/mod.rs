//! Population snapshots and per-generation recording.
//!
//! # File Format
//!
//! A snapshot is plain text holding the current generation of a population:
//!
//! ```text
//! N <size>
//! M <mutation rate>
//! G <generation>
//! <x> <y> <fitness>      (one line per organism, in buffer order)
//! ```
//!
//! Numbers are written in their shortest round-trip form, so loading a saved
//! snapshot reproduces every value exactly.

mod recorder;
mod snapshot;

pub use recorder::{SnapshotHook, SnapshotRecorder};
pub use snapshot::{PopulationSnapshot, SnapshotError};
