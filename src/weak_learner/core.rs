//! The core library for the weak learner in the boosting protocol.
//!
//! In gradient boosting, each stage hands the weak learner
//! a prefix of the training samples together with one
//! pseudo-residual per sample.
//! The weak learner fits a regression function to the triples
//! `(features, target, weight)` and keeps the fitted state in place,
//! so that the ensemble can predict with it and persist it as text.
use crate::{Regressor, Result, Sample};


/// A trait that defines the behavior of a weak learner
/// owned by a [`GBDT`](crate::GBDT) stage slot.
///
/// Implementors must be cheap to [`Clone`] while unfitted:
/// the ensemble clones a prototype once per stage.
pub trait WeakLearner: Regressor + Clone {
    /// Returns the name of the weak learner.
    fn name(&self) -> &str;


    /// Returns the information of the weak learner as `String`.
    fn info(&self) -> Option<Vec<(&str, String)>> {
        None
    }


    /// Fit `self` to `samples[i].features`, `targets[i]`
    /// and `samples[i].weight`.
    /// Any previously fitted state is replaced.
    fn fit(&mut self, samples: &[Sample], targets: &[f64]) -> Result<()>;


    /// Serialize the fitted state to text.
    /// The text must not contain the ensemble separator `"\n;\n"`.
    fn save(&self) -> String;


    /// Restore the fitted state from the text produced by
    /// [`WeakLearner::save`].
    fn load(&mut self, text: &str) -> Result<()>;
}
