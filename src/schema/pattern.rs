//! Landscape patterns for generating fitness grids without a map file.

use rand::prelude::*;
use serde::{Deserialize, Serialize};

/// Predefined fitness landscape shapes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum LandscapePattern {
    /// Every cell has the same score.
    Flat {
        /// Score assigned to every cell.
        value: f64,
    },
    /// Only the origin cell scores; everything else is zero.
    Corner {
        /// Score at `(0, 0)`.
        value: f64,
    },
    /// Single Gaussian hill.
    GaussianPeak {
        /// Center position as fraction of grid size (0.0-1.0).
        center: (f64, f64),
        /// Radius as fraction of the smaller grid dimension.
        radius: f64,
        /// Score at the summit.
        height: f64,
    },
    /// Absolute Gaussian noise, scaled by `amplitude`.
    Noise {
        /// Noise scale.
        amplitude: f64,
        /// Random seed.
        seed: u64,
    },
    /// Custom cell values (sparse representation).
    Custom {
        /// List of (x, y, value) entries. Out-of-range cells are ignored.
        values: Vec<(usize, usize, f64)>,
    },
}

impl Default for LandscapePattern {
    fn default() -> Self {
        Self::GaussianPeak {
            center: (0.75, 0.75),
            radius: 0.2,
            height: 5.0,
        }
    }
}

impl LandscapePattern {
    /// Generate a row-major `width * height` grid of scores.
    ///
    /// Every produced value is finite and non-negative.
    pub fn generate(&self, width: usize, height: usize) -> Vec<f64> {
        let mut cells = vec![0.0f64; width * height];

        match self {
            LandscapePattern::Flat { value } => {
                cells.fill(sanitize(*value));
            }
            LandscapePattern::Corner { value } => {
                if let Some(cell) = cells.first_mut() {
                    *cell = sanitize(*value);
                }
            }
            LandscapePattern::GaussianPeak {
                center,
                radius,
                height: peak,
            } => {
                let cx = center.0 * width as f64;
                let cy = center.1 * height as f64;
                let r = (radius * width.min(height) as f64).max(f64::EPSILON);
                let two_r_sq = 2.0 * r * r;
                for y in 0..height {
                    for x in 0..width {
                        let dx = x as f64 - cx;
                        let dy = y as f64 - cy;
                        let v = peak * (-(dx * dx + dy * dy) / two_r_sq).exp();
                        cells[y * width + x] = sanitize(v);
                    }
                }
            }
            LandscapePattern::Noise { amplitude, seed } => {
                let mut rng = StdRng::seed_from_u64(*seed);
                for cell in cells.iter_mut() {
                    let noise: f64 = rng.sample(rand_distr::StandardNormal);
                    *cell = sanitize(noise.abs() * amplitude);
                }
            }
            LandscapePattern::Custom { values } => {
                for &(x, y, v) in values {
                    if x < width && y < height {
                        cells[y * width + x] = sanitize(v);
                    }
                }
            }
        }

        cells
    }
}

/// Map anything that is not a finite non-negative score to zero.
fn sanitize(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 { v } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corner_only_origin_scores() {
        let cells = LandscapePattern::Corner { value: 1.0 }.generate(4, 3);
        assert_eq!(cells.len(), 12);
        assert_eq!(cells[0], 1.0);
        assert!(cells[1..].iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_peak_is_highest_at_center() {
        let pattern = LandscapePattern::GaussianPeak {
            center: (0.5, 0.5),
            radius: 0.2,
            height: 3.0,
        };
        let cells = pattern.generate(10, 10);
        let summit = cells[5 * 10 + 5];
        assert!((summit - 3.0).abs() < 1e-9);
        assert!(cells.iter().all(|&v| v <= summit));
    }

    #[test]
    fn test_noise_is_seeded_and_non_negative() {
        let a = LandscapePattern::Noise {
            amplitude: 2.0,
            seed: 9,
        }
        .generate(8, 8);
        let b = LandscapePattern::Noise {
            amplitude: 2.0,
            seed: 9,
        }
        .generate(8, 8);
        assert_eq!(a, b);
        assert!(a.iter().all(|&v| v >= 0.0 && v.is_finite()));
    }

    #[test]
    fn test_negative_values_are_zeroed() {
        let cells = LandscapePattern::Custom {
            values: vec![(0, 0, -1.0), (1, 0, f64::NAN), (1, 1, 2.5), (9, 9, 4.0)],
        }
        .generate(2, 2);
        assert_eq!(cells, vec![0.0, 0.0, 0.0, 2.5]);
    }
}
