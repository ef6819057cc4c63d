use crate::{GbdtError, Regressor, Result, Sample, WeakLearner};

use crate::weak_learner::common::{
    split_rule::*,
    type_and_struct::*,
};

use super::node::*;

use std::fmt;


/// Two candidate scores closer than this are treated as equal,
/// so a split must strictly improve the node.
const GAIN_TOLERANCE: f64 = 1e-12;


/// A greedy regression tree.
///
/// Each node searches every feature for the threshold that minimizes
/// the weighted squared error of the targets,
/// and each leaf predicts the weighted mean of its targets.
/// An unfitted tree is a single leaf that predicts `0.0`.
///
/// # Example
///
/// ```no_run
/// use gbdt::prelude::*;
///
/// let tree = RegressionTreeBuilder::new()
///     .max_depth(3)
///     .min_leaf_size(5)
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct RegressionTree {
    // The maximal depth of the tree (number of splits on a path).
    max_depth: usize,

    // The minimal number of samples in a leaf.
    min_leaf_size: usize,

    // The minimal total weight in a leaf.
    min_weight: f64,

    // Fitted tree.
    root: Node,
}


/// Sufficient statistics of a node for the weighted squared error.
#[derive(Clone, Copy, Default)]
struct Stats {
    count: usize,
    weight: f64,
    weighted_target: f64,
    weighted_square: f64,
}


impl Stats {
    #[inline]
    fn push(&mut self, target: f64, weight: f64) {
        self.count += 1;
        self.weight += weight;
        self.weighted_target += weight * target;
        self.weighted_square += weight * target * target;
    }


    #[inline]
    fn mean(&self) -> Prediction<f64> {
        if self.weight > 0.0 {
            Prediction(self.weighted_target / self.weight)
        } else {
            Prediction(0.0)
        }
    }


    /// `Σ w·y² - (Σ w·y)² / Σ w`
    #[inline]
    fn loss(&self) -> LossValue {
        LossValue(self.weighted_square - self.score())
    }


    /// `(Σ w·y)² / Σ w`, the part of the loss a split can reduce.
    #[inline]
    fn score(&self) -> f64 {
        if self.weight > 0.0 {
            self.weighted_target.powi(2) / self.weight
        } else {
            0.0
        }
    }


    #[inline]
    fn minus(&self, other: &Self) -> Self {
        Self {
            count: self.count - other.count,
            weight: self.weight - other.weight,
            weighted_target: self.weighted_target - other.weighted_target,
            weighted_square: self.weighted_square - other.weighted_square,
        }
    }
}


impl RegressionTree {
    #[inline]
    pub(super) fn from_components(
        max_depth: usize,
        min_leaf_size: usize,
        min_weight: f64,
    ) -> Self
    {
        Self {
            max_depth,
            min_leaf_size,
            min_weight,
            root: Node::leaf(0.0),
        }
    }


    /// Returns the number of leaves of the fitted tree.
    #[inline]
    pub fn leaves(&self) -> usize {
        self.root.leaves()
    }


    /// Returns the depth of the fitted tree.
    #[inline]
    pub fn depth(&self) -> usize {
        self.root.depth()
    }


    fn stats(samples: &[Sample], targets: &[f64], indices: &[usize])
        -> Stats
    {
        let mut stats = Stats::default();
        for &i in indices {
            stats.push(targets[i], samples[i].weight);
        }
        stats
    }


    #[inline]
    fn is_admissible(&self, side: &Stats) -> bool {
        side.count >= self.min_leaf_size && side.weight >= self.min_weight
    }


    /// Returns the best splitting rule for the samples in `indices`
    /// and the score `Σ_side (Σ w·y)² / Σ w` it achieves.
    fn best_split(
        &self,
        samples: &[Sample],
        targets: &[f64],
        indices: &[usize],
        total: &Stats,
    ) -> Option<(Splitter, f64)>
    {
        let n_feature = samples[indices[0]].features.len();

        let mut best: Option<(Splitter, f64)> = None;
        let mut order = indices.to_vec();
        for feature in 0..n_feature {
            order.sort_by(|&a, &b| {
                samples[a].feature(feature)
                    .total_cmp(&samples[b].feature(feature))
            });

            let mut left = Stats::default();
            for k in 0..order.len() - 1 {
                let i = order[k];
                left.push(targets[i], samples[i].weight);

                let here = samples[i].feature(feature);
                let next = samples[order[k + 1]].feature(feature);
                // Samples with equal values cannot be separated.
                if here >= next { continue; }

                let right = total.minus(&left);
                if !self.is_admissible(&left) || !self.is_admissible(&right) {
                    continue;
                }

                let score = left.score() + right.score();
                let improves = best.as_ref()
                    .map_or(true, |(_, s)| score > *s + GAIN_TOLERANCE);
                if improves {
                    let mut threshold = 0.5 * (here + next);
                    // Adjacent floats: the midpoint rounds onto `here`.
                    if threshold <= here { threshold = next; }
                    let rule = Splitter::new(feature, threshold.into());
                    best = Some((rule, score));
                }
            }
        }

        best
    }


    fn full_tree(
        &self,
        samples: &[Sample],
        targets: &[f64],
        indices: Vec<usize>,
        depth: usize,
    ) -> Node
    {
        let total = Self::stats(samples, targets, &indices);
        let prediction = total.mean();


        // A pure node, or a node that cannot be split anymore,
        // becomes a leaf.
        if depth >= self.max_depth
            || indices.len() < 2 * self.min_leaf_size
            || total.loss().0 <= GAIN_TOLERANCE
        {
            return Node::leaf(prediction.0);
        }


        let (rule, score) = match self.best_split(
            samples, targets, &indices[..], &total,
        ) {
            Some(found) => found,
            None => { return Node::leaf(prediction.0); },
        };

        // If the split has no meaning, construct a leaf node.
        if score <= total.score() + GAIN_TOLERANCE {
            return Node::leaf(prediction.0);
        }


        let (lindices, rindices): (Vec<usize>, Vec<usize>) = indices
            .into_iter()
            .partition(|&i| rule.split(&samples[i]) == LR::Left);

        let ltree = self.full_tree(samples, targets, lindices, depth + 1);
        let rtree = self.full_tree(samples, targets, rindices, depth + 1);

        Node::branch(rule, ltree, rtree)
    }
}


impl Default for RegressionTree {
    fn default() -> Self {
        super::RegressionTreeBuilder::new().build()
    }
}


impl Regressor for RegressionTree {
    #[inline]
    fn predict(&self, sample: &Sample) -> f64 {
        self.root.predict(sample)
    }
}


impl WeakLearner for RegressionTree {
    fn name(&self) -> &str {
        "Regression Tree"
    }


    fn info(&self) -> Option<Vec<(&str, String)>> {
        let info = Vec::from([
            ("Max depth", format!("{}", self.max_depth)),
            ("Min leaf size", format!("{}", self.min_leaf_size)),
            ("Min leaf weight", format!("{}", self.min_weight)),
        ]);
        Some(info)
    }


    fn fit(&mut self, samples: &[Sample], targets: &[f64]) -> Result<()> {
        if samples.len() != targets.len() {
            return Err(GbdtError::DimensionMismatch {
                expected: samples.len(),
                actual: targets.len(),
            });
        }

        self.root = if samples.is_empty() {
            Node::leaf(0.0)
        } else {
            let indices = (0..samples.len()).collect::<Vec<_>>();
            self.full_tree(samples, targets, indices, 0)
        };
        Ok(())
    }


    fn save(&self) -> String {
        // `serde_json` writes a single line, so the payload
        // never contains the ensemble separator.
        serde_json::to_string(&self.root)
            .unwrap_or_else(|_| String::from("null"))
    }


    fn load(&mut self, text: &str) -> Result<()> {
        let root: Node = serde_json::from_str(text.trim())
            .map_err(|e| GbdtError::LearnerParse {
                message: format!("invalid regression tree: {e}"),
            })?;
        if !root.is_finite() {
            return Err(GbdtError::LearnerParse {
                message: "regression tree holds a non-finite value".into(),
            });
        }
        self.root = root;
        Ok(())
    }
}


impl fmt::Display for RegressionTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "\
            ----------\n\
            # Regression Tree Weak Learner\n\n\
            - Max depth: {}\n\
            - Min leaf size: {}\n\
            - Leaves: {}\n\
            ----------\
            ",
            self.max_depth,
            self.min_leaf_size,
            self.leaves(),
        )
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::weak_learner::RegressionTreeBuilder;

    fn step_samples() -> (Vec<Sample>, Vec<f64>) {
        let samples = (0..8)
            .map(|i| Sample::new(vec![i as f64, 0.0], 0.0))
            .collect::<Vec<_>>();
        let targets = (0..8)
            .map(|i| if i < 4 { -1.0 } else { 2.0 })
            .collect::<Vec<_>>();
        (samples, targets)
    }


    #[test]
    fn fits_a_step_function_exactly() {
        let (samples, targets) = step_samples();
        let mut tree = RegressionTreeBuilder::new().max_depth(2).build();
        tree.fit(&samples, &targets).unwrap();

        assert_eq!(tree.leaves(), 2);
        for (sample, &y) in samples.iter().zip(&targets) {
            assert_eq!(tree.predict(sample), y);
        }
        let probe = Sample::new(vec![3.4, 0.0], 0.0);
        assert_eq!(tree.predict(&probe), -1.0);
        let probe = Sample::new(vec![3.6, 0.0], 0.0);
        assert_eq!(tree.predict(&probe), 2.0);
    }


    #[test]
    fn leaf_is_weighted_mean() {
        let samples = vec![
            Sample::new(vec![0.0], 0.0).with_weight(3.0),
            Sample::new(vec![0.0], 0.0).with_weight(1.0),
        ];
        let targets = vec![1.0, 5.0];
        let mut tree = RegressionTree::default();
        tree.fit(&samples, &targets).unwrap();

        assert_eq!(tree.leaves(), 1);
        assert_eq!(tree.predict(&samples[0]), 2.0);
    }


    #[test]
    fn min_leaf_size_limits_splits() {
        let (samples, targets) = step_samples();
        let mut tree = RegressionTreeBuilder::new()
            .max_depth(4)
            .min_leaf_size(5)
            .build();
        tree.fit(&samples, &targets).unwrap();
        assert_eq!(tree.leaves(), 1);
    }


    #[test]
    fn unfitted_tree_predicts_zero() {
        let tree = RegressionTree::default();
        assert_eq!(tree.predict(&Sample::new(vec![1.0], 1.0)), 0.0);
    }


    #[test]
    fn target_length_must_match() {
        let (samples, _) = step_samples();
        let mut tree = RegressionTree::default();
        assert!(tree.fit(&samples, &[1.0]).is_err());
    }
}
