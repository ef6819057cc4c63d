//! Exports the standard boosting algorithms and traits.
//!
pub use crate::booster::{
    // Booster trait
    Booster,

    // Gradient boosting
    GBDT,
    UNKNOWN_VALUE,
};


pub use crate::weak_learner::{
    // Weak Learner trait
    WeakLearner,

    // Regression -------------------------------
    RegressionTree,
    RegressionTreeBuilder,
};


pub use crate::common::{
    LossFunction,
    Loss,
};


pub use crate::sample::{
    Sample,
    Dataset,
    SampleReader,
};


pub use crate::hypothesis::Regressor;

pub use crate::config::Config;

pub use crate::error::{GbdtError, Result};
