//! This file defines split rules for regression tree.
use serde::{Serialize, Deserialize};

use crate::weak_learner::type_and_struct::*;
use crate::Sample;


/// The output of the function `split` of `Splitter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LR {
    Left,
    Right,
}


/// Sends a sample to the left child
/// if its `feature`-th value is below `threshold`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Splitter {
    pub(crate) feature: usize,
    pub(crate) threshold: Threshold,
}


impl Splitter {
    #[inline]
    pub(crate) fn new(feature: usize, threshold: Threshold) -> Self {
        Self { feature, threshold, }
    }


    /// Defines the splitting.
    #[inline]
    pub(crate) fn split(&self, sample: &Sample) -> LR {
        if sample.feature(self.feature) < self.threshold.0 {
            LR::Left
        } else {
            LR::Right
        }
    }
}
