#![warn(missing_docs)]

//!
//! A crate that trains additive ensembles by functional gradient boosting.
//!
//! At each stage, [`GBDT`] computes the pseudo-residual
//! (negative gradient) of the loss at the current prediction
//! and fits a weak learner to it.
//! The final predictor is the bias plus a shrinkage-weighted sum
//! of every stage's output.
//!
//! - Losses: least squares and logistic ([`Loss`]).
//! - Weak learner: any [`WeakLearner`]; this crate ships [`RegressionTree`].
//! - Row subsampling per stage, driven by an explicit random number generator.
//! - A flat text encoding of the ensemble ([`GBDT::save`], [`GBDT::load`]).
//!
//! ```no_run
//! use gbdt::prelude::*;
//!
//! let mut dataset = SampleReader::new()
//!     .file("/path/to/train.csv")
//!     .has_header(true)
//!     .target_feature("price")
//!     .read()
//!     .unwrap();
//! let config = Config::default().stage_count(20);
//! let tree = RegressionTreeBuilder::from_config(&config).build();
//!
//! let mut gbdt = GBDT::new(&config, tree).unwrap();
//! gbdt.fit(&mut dataset).unwrap();
//! println!("{}", gbdt.predict(&dataset[0]));
//! ```

pub mod error;
pub mod config;
pub mod common;
pub mod sample;
pub mod hypothesis;
pub mod weak_learner;
pub mod booster;
pub mod research;

pub mod prelude;


pub use error::{GbdtError, Result};
pub use config::Config;

pub use common::{LossFunction, Loss};

pub use sample::{Sample, Dataset, SampleReader};

pub use hypothesis::Regressor;

pub use weak_learner::{
    WeakLearner,
    RegressionTree,
    RegressionTreeBuilder,
};

pub use booster::{
    Booster,
    GBDT,
    UNKNOWN_VALUE,
    SEPARATOR,
};
