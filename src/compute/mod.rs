//! Compute module - Landscape, organisms, selection, and the generation loop.

mod ensemble;
mod landscape;
mod organism;
mod population;
mod rng;
mod selection;
mod stats;
mod weighted_index;

pub use ensemble::*;
pub use landscape::*;
pub use organism::*;
pub use population::*;
pub use rng::*;
pub use selection::*;
pub use stats::*;
pub use weighted_index::*;
