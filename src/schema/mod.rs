//! Schema module - Configuration, policy, and landscape pattern types.

mod config;
mod pattern;
mod policy;

pub use config::*;
pub use pattern::*;
pub use policy::*;
