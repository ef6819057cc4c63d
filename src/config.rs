//! Training configuration.
//!
//! A [`Config`] is an explicit value handed to [`GBDT::new`](crate::GBDT::new).
//! It can be built with the setter methods or read from a JSON file:
//!
//! ```json
//! {
//!     "stage_count": 50,
//!     "shrinkage": 0.1,
//!     "loss": "logistic",
//!     "sampling_ratio": 0.8,
//!     "debug": false,
//!     "seed": 1234
//! }
//! ```
//! Missing keys take their default values.
use serde::{Serialize, Deserialize};

use std::fs;
use std::path::Path;

use crate::common::checker;
use crate::{GbdtError, Loss, Result};


/// The number of boosting stages set as default.
pub const DEFAULT_STAGE_COUNT: usize = 100;
/// The shrinkage set as default.
pub const DEFAULT_SHRINKAGE: f64 = 0.1;
/// The maximal depth of regression trees set as default.
pub const DEFAULT_MAX_DEPTH: usize = 3;
/// The minimal number of samples in a leaf set as default.
pub const DEFAULT_MIN_LEAF_SIZE: usize = 1;


/// Parameters of a boosting run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Number of boosting stages (weak learners).
    pub stage_count: usize,
    /// Weight applied to every stage's contribution.
    pub shrinkage: f64,
    /// Loss minimized by the ensemble.
    pub loss: Loss,
    /// Fraction of the dataset used per stage, in `(0, 1]`.
    /// `1.0` disables subsampling and shuffling.
    pub sampling_ratio: f64,
    /// Print a per-stage training report.
    pub debug: bool,
    /// Seed for the random number generator used by [`GBDT::fit`](crate::GBDT::fit).
    pub seed: u64,
    /// Maximal depth of the regression trees.
    pub max_depth: usize,
    /// Minimal number of samples in a regression tree leaf.
    pub min_leaf_size: usize,
}


impl Default for Config {
    fn default() -> Self {
        Self {
            stage_count: DEFAULT_STAGE_COUNT,
            shrinkage: DEFAULT_SHRINKAGE,
            loss: Loss::default(),
            sampling_ratio: 1.0,
            debug: false,
            seed: 0,
            max_depth: DEFAULT_MAX_DEPTH,
            min_leaf_size: DEFAULT_MIN_LEAF_SIZE,
        }
    }
}


impl Config {
    /// Read a configuration from a JSON file and validate it.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }


    /// Read a configuration from a JSON string and validate it.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }


    /// Check every parameter.
    pub fn validate(&self) -> Result<()> {
        checker::check_stage_count(self.stage_count)?;
        checker::check_shrinkage(self.shrinkage)?;
        checker::check_sampling_ratio(self.sampling_ratio)?;
        if self.max_depth == 0 {
            return Err(GbdtError::config(
                "max_depth", self.max_depth, "must be at least 1",
            ));
        }
        if self.min_leaf_size == 0 {
            return Err(GbdtError::config(
                "min_leaf_size", self.min_leaf_size, "must be at least 1",
            ));
        }
        Ok(())
    }


    /// Set the number of boosting stages.
    pub fn stage_count(mut self, stage_count: usize) -> Self {
        self.stage_count = stage_count;
        self
    }


    /// Set the shrinkage.
    pub fn shrinkage(mut self, shrinkage: f64) -> Self {
        self.shrinkage = shrinkage;
        self
    }


    /// Set the loss function.
    pub fn loss(mut self, loss: Loss) -> Self {
        self.loss = loss;
        self
    }


    /// Set the sampling ratio.
    pub fn sampling_ratio(mut self, ratio: f64) -> Self {
        self.sampling_ratio = ratio;
        self
    }


    /// Turn the per-stage report on or off.
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }


    /// Set the random seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }


    /// Set the maximal depth of the regression trees.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }


    /// Set the minimal leaf size of the regression trees.
    pub fn min_leaf_size(mut self, size: usize) -> Self {
        self.min_leaf_size = size;
        self
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_take_defaults() {
        let config = Config::from_json_str(r#"{ "loss": "logistic" }"#)
            .unwrap();
        assert_eq!(config.loss, Loss::Logistic);
        assert_eq!(config.stage_count, DEFAULT_STAGE_COUNT);
        assert_eq!(config.sampling_ratio, 1.0);
    }


    #[test]
    fn unknown_keys_are_rejected() {
        assert!(Config::from_json_str(r#"{ "tree_count": 3 }"#).is_err());
    }


    #[test]
    fn invalid_values_are_rejected() {
        let err = Config::from_json_str(r#"{ "sampling_ratio": 0.0 }"#)
            .unwrap_err();
        assert!(matches!(err, GbdtError::Config { .. }));
        assert!(Config::default().stage_count(0).validate().is_err());
        assert!(Config::default().max_depth(0).validate().is_err());
    }
}
