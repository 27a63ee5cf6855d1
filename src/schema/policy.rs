//! Parent selection policy identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Tournament size used when a policy identifier is not recognised.
pub const DEFAULT_TOURNAMENT_SIZE: usize = 7;

fn default_tournament_size() -> usize {
    DEFAULT_TOURNAMENT_SIZE
}

/// Parent selection policy used to build the next generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method")]
pub enum SelectionPolicy {
    /// Strict-max among `size` uniform draws with replacement.
    Tournament {
        #[serde(default = "default_tournament_size")]
        size: usize,
    },
    /// Fitness-proportionate selection.
    Roulette,
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self::Tournament {
            size: DEFAULT_TOURNAMENT_SIZE,
        }
    }
}

/// An unrecognised selection policy identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown selection policy '{id}', expected 't'/'tournament' or 'r'/'roulette'")]
pub struct InvalidSelectionPolicy {
    pub id: String,
}

/// Outcome of [`SelectionPolicy::resolve`]: the policy to run and, if the
/// identifier was not understood, the reason the fallback was taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPolicy {
    pub policy: SelectionPolicy,
    pub fallback: Option<InvalidSelectionPolicy>,
}

impl SelectionPolicy {
    /// Parse an identifier, using `tournament_size` for tournaments.
    pub fn parse(id: &str, tournament_size: usize) -> Result<Self, InvalidSelectionPolicy> {
        match id.trim().to_ascii_lowercase().as_str() {
            "t" | "tournament" => Ok(Self::Tournament {
                size: tournament_size,
            }),
            "r" | "roulette" => Ok(Self::Roulette),
            _ => Err(InvalidSelectionPolicy { id: id.to_string() }),
        }
    }

    /// Parse an identifier, falling back to `Tournament { size: 7 }` when it
    /// is not recognised. The fallback is logged and reported in the result.
    pub fn resolve(id: &str, tournament_size: usize) -> ResolvedPolicy {
        match Self::parse(id, tournament_size) {
            Ok(policy) => ResolvedPolicy {
                policy,
                fallback: None,
            },
            Err(err) => {
                log::warn!("{err}; falling back to tournament size {DEFAULT_TOURNAMENT_SIZE}");
                ResolvedPolicy {
                    policy: Self::default(),
                    fallback: Some(err),
                }
            }
        }
    }
}

impl FromStr for SelectionPolicy {
    type Err = InvalidSelectionPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, DEFAULT_TOURNAMENT_SIZE)
    }
}

impl fmt::Display for SelectionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionPolicy::Tournament { size } => write!(f, "tournament({size})"),
            SelectionPolicy::Roulette => write!(f, "roulette"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_ids() {
        assert_eq!(
            SelectionPolicy::parse("t", 3).unwrap(),
            SelectionPolicy::Tournament { size: 3 }
        );
        assert_eq!(
            SelectionPolicy::parse(" Roulette ", 3).unwrap(),
            SelectionPolicy::Roulette
        );
    }

    #[test]
    fn test_unknown_id_falls_back_observably() {
        let resolved = SelectionPolicy::resolve("x", 3);
        assert_eq!(resolved.policy, SelectionPolicy::Tournament { size: 7 });
        assert_eq!(
            resolved.fallback,
            Some(InvalidSelectionPolicy {
                id: "x".to_string()
            })
        );

        let resolved = SelectionPolicy::resolve("r", 3);
        assert!(resolved.fallback.is_none());
    }

    #[test]
    fn test_serde_defaults_tournament_size() {
        let policy: SelectionPolicy = serde_json::from_str(r#"{"method":"Tournament"}"#).unwrap();
        assert_eq!(policy, SelectionPolicy::Tournament { size: 7 });

        let json = serde_json::to_string(&SelectionPolicy::Roulette).unwrap();
        let parsed: SelectionPolicy = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, SelectionPolicy::Roulette);
    }
}
