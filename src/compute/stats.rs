//! Summary statistics over one generation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::Organism;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationStats {
    pub size: usize,
    pub mean_fitness: f64,
    pub max_fitness: f64,
    pub min_fitness: f64,
    /// Number of distinct genotypes present.
    pub distinct_genotypes: usize,
    /// Most common genotype and how many organisms carry it.
    pub dominant_genotype: Option<((usize, usize), usize)>,
}

impl PopulationStats {
    /// Compute statistics from a generation.
    pub fn from_organisms(organisms: &[Organism]) -> Self {
        let mut total = 0.0f64;
        let mut max_fitness = f64::NEG_INFINITY;
        let mut min_fitness = f64::INFINITY;
        let mut counts: HashMap<(usize, usize), usize> = HashMap::new();

        for o in organisms {
            total += o.fitness;
            max_fitness = max_fitness.max(o.fitness);
            min_fitness = min_fitness.min(o.fitness);
            *counts.entry(o.genotype()).or_default() += 1;
        }

        // Ties broken by genotype so the result does not depend on hash order
        let dominant_genotype = counts
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
            .map(|(&g, &c)| (g, c));

        if organisms.is_empty() {
            return Self {
                size: 0,
                mean_fitness: 0.0,
                max_fitness: 0.0,
                min_fitness: 0.0,
                distinct_genotypes: 0,
                dominant_genotype: None,
            };
        }

        Self {
            size: organisms.len(),
            mean_fitness: total / organisms.len() as f64,
            max_fitness,
            min_fitness,
            distinct_genotypes: counts.len(),
            dominant_genotype,
        }
    }
}

impl std::fmt::Display for PopulationStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "n={}, fitness mean={:.4} min={:.4} max={:.4}, {} genotypes",
            self.size, self.mean_fitness, self.min_fitness, self.max_fitness, self.distinct_genotypes
        )?;
        if let Some(((x, y), count)) = self.dominant_genotype {
            write!(f, ", dominant ({x}, {y}) x{count}")?;
        }
        Ok(())
    }
}
