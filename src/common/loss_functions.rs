use serde::{Serialize, Deserialize};

use std::fmt;

use crate::{GbdtError, Result};


/// This trait defines the loss functions minimized by gradient boosting.
/// A loss provides the initial bias of an ensemble and
/// the pseudo-residual each stage is fit to.
pub trait LossFunction {
    /// The name of the loss function.
    fn name(&self) -> &str;


    /// Loss value for a single point.
    fn eval_at_point(&self, label: f64, prediction: f64) -> f64;


    /// Weighted average loss over the given points.
    fn eval(&self, labels: &[f64], predictions: &[f64], weights: &[f64])
        -> f64
    {
        let total = weights.iter().sum::<f64>();
        if total <= 0.0 { return 0.0; }

        labels.iter()
            .zip(predictions)
            .zip(weights)
            .map(|((&y, &p), &w)| w * self.eval_at_point(y, p))
            .sum::<f64>()
            / total
    }


    /// The initial bias given the weighted mean label `y_avg`.
    fn bias_from_mean(&self, y_avg: f64) -> Result<f64>;


    /// The initial bias of the ensemble for the full label distribution.
    fn bias(&self, labels: &[f64], weights: &[f64]) -> Result<f64> {
        let y_avg = weighted_mean(labels, weights)?;
        self.bias_from_mean(y_avg)
    }


    /// The pseudo-residual (negative gradient) at the current prediction.
    fn gradient(&self, label: f64, prediction: f64) -> f64;
}


/// Loss functions supported by [`GBDT`](crate::GBDT).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Loss {
    /// Least squares loss `(y - F)^2`.
    /// The pseudo-residual is the plain residual `y - F`.
    #[default]
    LeastSquares,


    /// Negative binomial log-likelihood `ln(1 + exp(-2yF))`
    /// for labels in `{-1, +1}`, where `F` is half the log-odds.
    /// The pseudo-residual is `2y / (1 + exp(2yF))`.
    Logistic,
}


impl LossFunction for Loss {
    fn name(&self) -> &str {
        match self {
            Self::LeastSquares => "Least squares",
            Self::Logistic => "Logistic",
        }
    }


    fn eval_at_point(&self, label: f64, prediction: f64) -> f64 {
        match self {
            Self::LeastSquares => (label - prediction).powi(2),
            Self::Logistic => {
                let margin = -2.0 * label * prediction;
                // ln(1 + e^m) without overflow for large margins.
                if margin > 0.0 {
                    margin + (-margin).exp().ln_1p()
                } else {
                    margin.exp().ln_1p()
                }
            },
        }
    }


    fn bias_from_mean(&self, y_avg: f64) -> Result<f64> {
        match self {
            Self::LeastSquares => Ok(y_avg),
            Self::Logistic => {
                if !(y_avg > -1.0 && y_avg < 1.0) {
                    return Err(GbdtError::DegenerateLabelDistribution {
                        y_avg
                    });
                }
                Ok(0.5 * ((1.0 + y_avg) / (1.0 - y_avg)).ln())
            },
        }
    }


    fn gradient(&self, label: f64, prediction: f64) -> f64 {
        match self {
            Self::LeastSquares => label - prediction,
            Self::Logistic => {
                2.0 * label / (1.0 + (2.0 * label * prediction).exp())
            },
        }
    }
}


impl fmt::Display for Loss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}


/// Returns `Σ(label·weight) / Σ(weight)`.
/// Fails with [`GbdtError::DegenerateDataset`]
/// when the total weight is zero or not finite.
pub fn weighted_mean(labels: &[f64], weights: &[f64]) -> Result<f64> {
    if labels.len() != weights.len() {
        return Err(GbdtError::DimensionMismatch {
            expected: labels.len(),
            actual: weights.len(),
        });
    }
    if labels.is_empty() {
        return Err(GbdtError::degenerate_dataset("no samples"));
    }

    let (s, c) = labels.iter()
        .zip(weights)
        .fold((0.0_f64, 0.0_f64), |(s, c), (&y, &w)| (s + y * w, c + w));

    if c == 0.0 || !c.is_finite() {
        return Err(GbdtError::degenerate_dataset(
            format!("total sample weight is {c}")
        ));
    }

    Ok(s / c)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logistic_loss_is_stable_for_large_margins() {
        let loss = Loss::Logistic;
        let v = loss.eval_at_point(-1.0, 1_000.0);
        assert!(v.is_finite());
        assert!((v - 2_000.0).abs() < 1e-9);
        assert!(loss.eval_at_point(1.0, 1_000.0) < 1e-12);
    }


    #[test]
    fn weighted_eval_ignores_zero_weights() {
        let loss = Loss::LeastSquares;
        let v = loss.eval(&[1.0, 5.0], &[0.0, 0.0], &[1.0, 0.0]);
        assert_eq!(v, 1.0);
    }
}
