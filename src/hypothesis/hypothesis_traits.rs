use rayon::prelude::*;

use crate::{Dataset, Sample};


/// A trait that defines the behavor of regressor.
/// You only need to implement `predict` method.
pub trait Regressor {
    /// Predicts the target value of `sample`.
    fn predict(&self, sample: &Sample) -> f64;


    /// Predicts the target values of every sample in `dataset`,
    /// in the dataset's current order.
    fn predict_all(&self, dataset: &Dataset) -> Vec<f64>
        where Self: Sync,
    {
        dataset.samples()
            .par_iter()
            .map(|sample| self.predict(sample))
            .collect::<Vec<_>>()
    }
}
