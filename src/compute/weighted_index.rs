//! Weighted index structures for fitness-proportionate sampling.
//!
//! A [`WeightedIndex`] maps a uniform draw in `[0, total_weight)` to the
//! smallest index whose cumulative weight exceeds the draw, so each index is
//! picked with probability `weight / total_weight`.

use rand::Rng;

/// Point-updatable weighted sampling structure.
pub trait WeightedIndex {
    /// Number of entries.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Set the weight of one entry. Weights must be finite and non-negative.
    fn update(&mut self, index: usize, weight: f64);

    /// Rebuild from scratch, resizing to `weights.len()` entries.
    fn assign(&mut self, weights: &[f64]);

    /// Sum of all weights.
    fn total_weight(&self) -> f64;

    /// Index whose cumulative weight first exceeds `draw`.
    ///
    /// `draw` should lie in `[0, total_weight)`. Draws at or past the total
    /// (floating point rounding) resolve to the last entry with non-zero
    /// weight.
    fn sample(&self, draw: f64) -> usize;

    /// Draw an index proportionally to weight, or `None` if the total weight
    /// is zero or not finite.
    fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<usize>
    where
        Self: Sized,
    {
        let total = self.total_weight();
        if total > 0.0 && total.is_finite() {
            Some(self.sample(rng.gen_range(0.0..total)))
        } else {
            None
        }
    }
}

/// Last entry with positive weight, used when a draw overshoots the total.
fn last_positive(weights: &[f64]) -> usize {
    weights.iter().rposition(|&w| w > 0.0).unwrap_or(0)
}

/// Binary indexed (Fenwick) tree: `O(log n)` update and sample.
#[derive(Debug, Clone, Default)]
pub struct FenwickIndex {
    weights: Vec<f64>,
    /// 1-based partial sums; `tree[0]` is unused.
    tree: Vec<f64>,
}

impl FenwickIndex {
    /// Index with `len` zero-weight entries.
    pub fn new(len: usize) -> Self {
        Self {
            weights: vec![0.0; len],
            tree: vec![0.0; len + 1],
        }
    }

    pub fn from_weights(weights: &[f64]) -> Self {
        let mut index = Self::default();
        index.assign(weights);
        index
    }

    /// Sum of the first `count` weights.
    pub fn prefix_sum(&self, count: usize) -> f64 {
        let mut i = count.min(self.weights.len());
        let mut sum = 0.0;
        while i > 0 {
            sum += self.tree[i];
            i &= i - 1;
        }
        sum
    }
}

impl WeightedIndex for FenwickIndex {
    fn len(&self) -> usize {
        self.weights.len()
    }

    fn update(&mut self, index: usize, weight: f64) {
        debug_assert!(weight.is_finite() && weight >= 0.0);
        let delta = weight - self.weights[index];
        self.weights[index] = weight;

        let n = self.weights.len();
        let mut i = index + 1;
        while i <= n {
            self.tree[i] += delta;
            i += i & i.wrapping_neg();
        }
    }

    fn assign(&mut self, weights: &[f64]) {
        let n = weights.len();
        self.weights.clear();
        self.weights.extend_from_slice(weights);

        // Linear-time construction
        self.tree.clear();
        self.tree.resize(n + 1, 0.0);
        self.tree[1..].copy_from_slice(weights);
        for i in 1..=n {
            let parent = i + (i & i.wrapping_neg());
            if parent <= n {
                self.tree[parent] += self.tree[i];
            }
        }
    }

    fn total_weight(&self) -> f64 {
        self.prefix_sum(self.weights.len())
    }

    fn sample(&self, draw: f64) -> usize {
        let n = self.weights.len();
        if n == 0 {
            return 0;
        }

        // Descend to the largest prefix whose sum is <= draw
        let mut pos = 0;
        let mut remaining = draw;
        let mut step = 1usize << (usize::BITS - 1 - n.leading_zeros());
        while step > 0 {
            let next = pos + step;
            if next <= n && self.tree[next] <= remaining {
                pos = next;
                remaining -= self.tree[next];
            }
            step >>= 1;
        }

        if pos < n && self.weights[pos] > 0.0 {
            pos
        } else {
            last_positive(&self.weights)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn cumulative_before(weights: &[f64], count: usize) -> f64 {
        weights[..count].iter().sum()
    }

    /// Linear scan reference for `sample`.
    fn scan(weights: &[f64], draw: f64) -> usize {
        let mut running = 0.0;
        for (i, &w) in weights.iter().enumerate() {
            running += w;
            if running > draw {
                return i;
            }
        }
        last_positive(weights)
    }

    #[test]
    fn test_fenwick_sample_boundaries() {
        let index = FenwickIndex::from_weights(&[1.0, 0.0, 2.0, 3.0]);
        assert_eq!(index.total_weight(), 6.0);
        assert_eq!(index.sample(0.0), 0);
        assert_eq!(index.sample(0.999), 0);
        // Zero-weight entries are never chosen
        assert_eq!(index.sample(1.0), 2);
        assert_eq!(index.sample(2.5), 2);
        assert_eq!(index.sample(3.0), 3);
        assert_eq!(index.sample(5.999), 3);
        assert_eq!(index.sample(6.0), 3);
    }

    #[test]
    fn test_leading_zero_weights_are_skipped() {
        let index = FenwickIndex::from_weights(&[0.0, 0.0, 5.0]);
        assert_eq!(index.sample(0.0), 2);
    }

    #[test]
    fn test_overshoot_resolves_to_last_positive() {
        let index = FenwickIndex::from_weights(&[1.0, 2.0, 0.0]);
        assert_eq!(index.sample(3.0), 1);
    }

    #[test]
    fn test_update_changes_total() {
        let mut index = FenwickIndex::new(5);
        assert_eq!(index.total_weight(), 0.0);
        index.update(3, 4.0);
        index.update(0, 1.0);
        assert_eq!(index.total_weight(), 5.0);
        assert_eq!(index.prefix_sum(3), 1.0);
        index.update(3, 0.5);
        assert_eq!(index.total_weight(), 1.5);
        assert_eq!(index.sample(1.2), 3);
    }

    #[test]
    fn test_all_zero_has_no_draw() {
        let mut rng = StdRng::seed_from_u64(0);
        let index = FenwickIndex::from_weights(&[0.0, 0.0]);
        assert_eq!(index.total_weight(), 0.0);
        assert_eq!(index.draw(&mut rng), None);
    }

    #[test]
    fn test_infinite_total_has_no_draw() {
        let mut rng = StdRng::seed_from_u64(0);
        let index = FenwickIndex::from_weights(&[f64::MAX, f64::MAX]);
        assert!(index.total_weight().is_infinite());
        assert_eq!(index.draw(&mut rng), None);
    }

    #[test]
    fn test_draw_frequencies_converge() {
        let weights = [1.0, 3.0, 0.0, 6.0];
        let index = FenwickIndex::from_weights(&weights);
        let mut rng = StdRng::seed_from_u64(42);

        let trials = 100_000;
        let mut counts = [0usize; 4];
        for _ in 0..trials {
            counts[index.draw(&mut rng).unwrap()] += 1;
        }

        for (count, weight) in counts.iter().zip(weights) {
            let observed = *count as f64 / trials as f64;
            let expected = weight / 10.0;
            assert!(
                (observed - expected).abs() < 0.01,
                "observed {observed}, expected {expected}"
            );
        }
    }

    proptest! {
        #[test]
        fn prop_sample_matches_scan(
            raw in prop::collection::vec(0u32..10, 1..64),
            offset in 0u32..1000,
        ) {
            // Integer weights and half-integer draws keep every sum exact
            let weights: Vec<f64> = raw.iter().map(|&w| w as f64).collect();
            let fenwick = FenwickIndex::from_weights(&weights);
            let total: u32 = raw.iter().sum();
            prop_assume!(total > 0);

            let draw = (offset % total) as f64 + 0.5;
            let i = scan(&weights, draw);
            prop_assert!(weights[i] > 0.0);
            prop_assert!(cumulative_before(&weights, i) <= draw);
            prop_assert!(cumulative_before(&weights, i + 1) > draw);
            prop_assert_eq!(fenwick.sample(draw), i);
        }

        #[test]
        fn prop_updates_match_rebuild(
            initial in prop::collection::vec(0.0f64..10.0, 1..32),
            edits in prop::collection::vec((0usize..32, 0.0f64..10.0), 0..32),
        ) {
            let mut fenwick = FenwickIndex::from_weights(&initial);
            let mut expected = initial.clone();
            for (i, w) in edits {
                let i = i % initial.len();
                fenwick.update(i, w);
                expected[i] = w;
            }
            let rebuilt = FenwickIndex::from_weights(&expected);
            let sum: f64 = expected.iter().sum();
            prop_assert!((fenwick.total_weight() - sum).abs() < 1e-9);
            for count in 0..=expected.len() {
                prop_assert!((fenwick.prefix_sum(count) - rebuilt.prefix_sum(count)).abs() < 1e-9);
            }
        }
    }
}
