//! This file defines some functions that checks some pre-conditions
//! E.g., Shape of data

use crate::{Dataset, GbdtError, Result};


/// Check whether the training dataset is valid or not.
#[inline]
pub(crate) fn check_dataset(dataset: &Dataset) -> Result<()> {
    let (n_sample, n_feature) = dataset.shape();

    if n_sample == 0 {
        return Err(GbdtError::degenerate_dataset("no samples"));
    }

    // A dataset without features only fits constant learners.
    if n_feature == 0 {
        log::warn!("the training dataset has no features");
    }
    Ok(())
}


/// Check the number of boosting stages.
#[inline]
pub(crate) fn check_stage_count(stage_count: usize) -> Result<()> {
    if stage_count == 0 {
        return Err(GbdtError::config(
            "stage_count", stage_count, "must be at least 1",
        ));
    }
    Ok(())
}


/// Check the shrinkage (learning rate).
#[inline]
pub(crate) fn check_shrinkage(shrinkage: f64) -> Result<()> {
    if !(shrinkage.is_finite() && shrinkage > 0.0) {
        return Err(GbdtError::config(
            "shrinkage", shrinkage, "must be a positive finite number",
        ));
    }
    Ok(())
}


/// Check the sampling ratio, which must be in `(0, 1]`.
#[inline]
pub(crate) fn check_sampling_ratio(ratio: f64) -> Result<()> {
    if !(ratio > 0.0 && ratio <= 1.0) {
        return Err(GbdtError::config(
            "sampling_ratio", ratio, "must be in (0, 1]",
        ));
    }
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sampling_ratio_bounds() {
        assert!(check_sampling_ratio(1.0).is_ok());
        assert!(check_sampling_ratio(0.25).is_ok());
        assert!(check_sampling_ratio(0.0).is_err());
        assert!(check_sampling_ratio(1.5).is_err());
        assert!(check_sampling_ratio(f64::NAN).is_err());
    }


    #[test]
    fn shrinkage_must_be_positive() {
        assert!(check_shrinkage(0.1).is_ok());
        assert!(check_shrinkage(0.0).is_err());
        assert!(check_shrinkage(f64::INFINITY).is_err());
    }
}
