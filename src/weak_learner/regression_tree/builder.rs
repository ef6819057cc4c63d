use crate::Config;
use super::RegressionTree;


/// The maxmial depth set as default.
pub const DEFAULT_MAX_DEPTH: usize = crate::config::DEFAULT_MAX_DEPTH;
/// The minimal number of samples in a leaf set as default.
pub const DEFAULT_MIN_LEAF_SIZE: usize = crate::config::DEFAULT_MIN_LEAF_SIZE;
/// The minimal total weight in a leaf set as default.
pub const DEFAULT_MIN_WEIGHT: f64 = 0.0;


/// A struct that builds `RegressionTree`.
/// `RegressionTreeBuilder` keeps parameters for constructing `RegressionTree`.
///
/// # Example
///
/// ```no_run
/// use gbdt::prelude::*;
///
/// let weak_learner = RegressionTreeBuilder::new()
///     .max_depth(2)
///     .min_leaf_size(10)
///     .build();
/// ```
#[derive(Clone, Debug)]
pub struct RegressionTreeBuilder {
    max_depth: usize,
    min_leaf_size: usize,
    min_weight: f64,
}


impl Default for RegressionTreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}


impl RegressionTreeBuilder {
    /// Construct a new instance of `RegressionTreeBuilder`.
    /// By default,
    /// `RegressionTreeBuilder` sets the parameters as follows;
    /// ```text
    /// max_depth: DEFAULT_MAX_DEPTH == 3,
    /// min_leaf_size: DEFAULT_MIN_LEAF_SIZE == 1,
    /// min_weight: DEFAULT_MIN_WEIGHT == 0.0,
    /// ```
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            min_leaf_size: DEFAULT_MIN_LEAF_SIZE,
            min_weight: DEFAULT_MIN_WEIGHT,
        }
    }


    /// Take the tree parameters from `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::new()
            .max_depth(config.max_depth)
            .min_leaf_size(config.min_leaf_size)
    }


    /// Specify the maximal depth of the tree.
    /// A tree of depth `d` splits at most `d` times along any path.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }


    /// Specify the minimal number of samples in a leaf.
    /// Values below `1` are raised to `1`.
    pub fn min_leaf_size(mut self, size: usize) -> Self {
        self.min_leaf_size = size.max(1);
        self
    }


    /// Specify the minimal total weight in a leaf.
    pub fn min_weight(mut self, weight: f64) -> Self {
        self.min_weight = weight;
        self
    }


    /// Build a `RegressionTree`.
    /// This method consumes `self`.
    pub fn build(self) -> RegressionTree {
        RegressionTree::from_components(
            self.max_depth, self.min_leaf_size, self.min_weight,
        )
    }
}
