use std::path::Path;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::collections::HashSet;
use std::ops::Index;

use polars::prelude::*;
use serde::{Serialize, Deserialize};

use crate::{GbdtError, Result};


/// A labeled, weighted training record with a dense feature vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Feature values, one per column of the dataset.
    pub features: Vec<f64>,
    /// Target label.
    pub label: f64,
    /// Non-negative sample weight.
    pub weight: f64,
}


impl Sample {
    /// Construct a new sample with unit weight.
    #[inline]
    pub fn new(features: Vec<f64>, label: f64) -> Self {
        Self { features, label, weight: 1.0, }
    }


    /// Set the weight of this sample.
    #[inline]
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }


    /// Returns the value of the `index`-th feature.
    /// Features beyond the stored vector read as `0.0`.
    #[inline]
    pub fn feature(&self, index: usize) -> f64 {
        self.features.get(index).copied().unwrap_or(0.0)
    }
}


/// Struct `Dataset` holds an ordered batch of [`Sample`]s.
/// The order is mutable (boosting with subsampling shuffles it in place),
/// the membership is not.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    samples: Vec<Sample>,
    feature_names: Vec<String>,
    n_feature: usize,
}


impl Dataset {
    /// Construct a dataset from the given samples.
    /// Every sample must have the same number of features,
    /// and every weight must be a non-negative finite number.
    pub fn new(samples: Vec<Sample>) -> Result<Self> {
        let n_feature = samples.first()
            .map(|s| s.features.len())
            .unwrap_or(0);

        for (i, sample) in samples.iter().enumerate() {
            if sample.features.len() != n_feature {
                return Err(GbdtError::DimensionMismatch {
                    expected: n_feature,
                    actual: sample.features.len(),
                });
            }
            if !sample.weight.is_finite() || sample.weight < 0.0 {
                return Err(GbdtError::data_loading(
                    i + 1,
                    format!("invalid sample weight {}", sample.weight),
                ));
            }
        }

        let feature_names = (1..=n_feature)
            .map(|i| format!("Feat. [{i}]"))
            .collect();

        Ok(Self { samples, feature_names, n_feature, })
    }


    /// Replace the feature (column) names.
    pub fn with_feature_names<S>(mut self, names: Vec<S>) -> Result<Self>
        where S: Into<String>,
    {
        if names.len() != self.n_feature {
            return Err(GbdtError::DimensionMismatch {
                expected: self.n_feature,
                actual: names.len(),
            });
        }
        self.feature_names = names.into_iter().map(Into::into).collect();
        Ok(self)
    }


    /// Read a CSV format file to `Dataset` type.
    /// The column named `target` is used as the label,
    /// the optional column named `weight` as the sample weight.
    /// If the file has no header row, the columns are named
    /// `Feat. [1]`, `Feat. [2]`, ...
    pub fn from_csv<P>(
        file: P,
        has_header: bool,
        target: &str,
        weight: Option<&str>,
    ) -> Result<Self>
        where P: AsRef<Path>,
    {
        let file = File::open(file)?;
        let mut lines = BufReader::new(file).lines().enumerate().peekable();

        let names = if has_header {
            match lines.next() {
                Some((_, line)) => line?.split(',')
                    .map(|name| name.trim().to_string())
                    .collect::<Vec<_>>(),
                None => {
                    return Err(GbdtError::data_loading(1, "empty CSV file"));
                },
            }
        } else {
            let n_column = match lines.peek() {
                Some((_, Ok(line))) => line.split(',').count(),
                _ => 0,
            };
            (1..=n_column).map(|i| format!("Feat. [{i}]"))
                .collect::<Vec<_>>()
        };

        let position = |name: &str| {
            names.iter()
                .position(|column| column == name)
                .ok_or_else(|| GbdtError::data_loading(
                    1, format!("the column `{name}` does not exist"),
                ))
        };
        let target_pos = position(target)?;
        let weight_pos = weight.map(position).transpose()?;

        let feature_names = names.iter()
            .enumerate()
            .filter(|(i, _)| *i != target_pos && Some(*i) != weight_pos)
            .map(|(_, name)| name.clone())
            .collect::<Vec<_>>();

        let mut samples = Vec::new();
        for (k, line) in lines {
            let line = line?;
            let line_no = k + 1;
            if line.trim().is_empty() { continue; }

            let values = line.split(',')
                .map(|x| parse_value(x, line_no))
                .collect::<Result<Vec<_>>>()?;
            if values.len() != names.len() {
                return Err(GbdtError::data_loading(
                    line_no,
                    format!(
                        "expected {} columns, got {}",
                        names.len(), values.len()
                    ),
                ));
            }

            let mut features = Vec::with_capacity(feature_names.len());
            let mut label = 0.0;
            let mut sample_weight = 1.0;
            for (i, x) in values.into_iter().enumerate() {
                if i == target_pos {
                    label = x;
                } else if Some(i) == weight_pos {
                    sample_weight = x;
                } else {
                    features.push(x);
                }
            }
            samples.push(Sample::new(features, label).with_weight(sample_weight));
        }

        Self::new(samples)?.with_feature_names(feature_names)
    }


    /// Read a SVMLight format file to `Dataset` type.
    ///
    /// Each line of SVMLight format file has the following form:
    /// ```txt
    /// y index:value index:value
    /// ```
    /// where `y` is the target label of type `f64`,
    /// `index` is the 1-indexed feature index, and `value` is the value
    /// at the feature. Absent features are `0.0` and every weight is `1.0`.
    pub fn from_svmlight<P: AsRef<Path>>(file: P) -> Result<Self> {
        let file = File::open(file)?;
        let lines = BufReader::new(file).lines();

        let mut rows = Vec::new();
        let mut n_feature = 0_usize;
        for (k, line) in lines.enumerate() {
            let line = line?;
            let line_no = k + 1;
            let mut words = line.split_whitespace();

            // The first word corresponds to the target value.
            let y = match words.next() {
                Some(word) => parse_value(word, line_no)?,
                None => { continue; },
            };

            let entries = words
                .map(|word| index_and_feature(word, line_no))
                .collect::<Result<Vec<_>>>()?;
            if let Some(max) = entries.iter().map(|(i, _)| *i).max() {
                n_feature = n_feature.max(max);
            }
            rows.push((y, entries));
        }

        let samples = rows.into_iter()
            .map(|(y, entries)| {
                let mut features = vec![0.0; n_feature];
                for (i, x) in entries {
                    features[i - 1] = x;
                }
                Sample::new(features, y)
            })
            .collect::<Vec<_>>();

        Self::new(samples)
    }


    /// Convert `polars::DataFrame` and `polars::Series` into `Dataset`.
    /// Every column is cast to `f64`; missing values are rejected.
    pub fn from_dataframe(
        data: &DataFrame,
        target: &Series,
        weight: Option<&Series>,
    ) -> Result<Self>
    {
        let n_sample = data.shape().0;

        let columns = data.get_columns()
            .iter()
            .map(series_to_vec)
            .collect::<Result<Vec<_>>>()?;
        let feature_names = data.get_columns()
            .iter()
            .map(|series| series.name().to_string())
            .collect::<Vec<_>>();

        let labels = series_to_vec(target)?;
        let weights = match weight {
            Some(series) => series_to_vec(series)?,
            None => vec![1.0; n_sample],
        };

        for len in [labels.len(), weights.len()] {
            if len != n_sample {
                return Err(GbdtError::DimensionMismatch {
                    expected: n_sample, actual: len,
                });
            }
        }

        let samples = (0..n_sample)
            .map(|row| {
                let features = columns.iter()
                    .map(|column| column[row])
                    .collect::<Vec<_>>();
                Sample::new(features, labels[row]).with_weight(weights[row])
            })
            .collect::<Vec<_>>();

        Self::new(samples)?.with_feature_names(feature_names)
    }


    /// Returns the pair of the number of examples and
    /// the number of features
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.samples.len(), self.n_feature)
    }


    /// Returns the number of examples.
    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }


    /// Returns `true` if `self` holds no example.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }


    /// Returns the samples in their current order.
    #[inline]
    pub fn samples(&self) -> &[Sample] {
        &self.samples[..]
    }


    /// Returns a mutable slice of the samples.
    /// The caller may reorder them but cannot change the membership.
    #[inline]
    pub fn samples_mut(&mut self) -> &mut [Sample] {
        &mut self.samples[..]
    }


    /// Returns an iterator over the samples.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }


    /// Returns the feature names.
    #[inline]
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names[..]
    }


    /// Returns the labels in the current order.
    pub fn labels(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.label).collect()
    }


    /// Returns the weights in the current order.
    pub fn weights(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.weight).collect()
    }


    /// Check whether `self` looks like a training set for
    /// binary classification with `{-1, +1}` labels.
    /// Returns the distinct labels that are neither `-1` nor `+1`.
    pub fn non_binary_labels(&self) -> Vec<f64> {
        let mut seen = HashSet::new();
        self.samples.iter()
            .map(|s| s.label)
            .filter(|&y| y != 1.0 && y != -1.0)
            .filter(|y| seen.insert(y.to_bits()))
            .collect()
    }
}


impl Index<usize> for Dataset {
    type Output = Sample;


    #[inline]
    fn index(&self, idx: usize) -> &Self::Output {
        &self.samples[idx]
    }
}


impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;


    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}


fn parse_value(word: &str, line: usize) -> Result<f64> {
    let word = word.trim();
    word.parse::<f64>()
        .map_err(|e| GbdtError::data_loading(
            line, format!("cannot parse `{word}` as a number ({e})"),
        ))
}


/// Parse the following type of `str` to the pair of `(usize, f64)`.
/// `index:value`, where `index: usize` (1-indexed) and `value: f64`.
fn index_and_feature(word: &str, line: usize) -> Result<(usize, f64)> {
    let (i, x) = word.split_once(':')
        .ok_or_else(|| GbdtError::data_loading(
            line, format!("expected `index:value`, got `{word}`"),
        ))?;
    let i = i.trim().parse::<usize>()
        .ok()
        .filter(|&i| i > 0)
        .ok_or_else(|| GbdtError::data_loading(
            line, format!("invalid feature index `{i}`"),
        ))?;
    let x = parse_value(x, line)?;

    Ok((i, x))
}


fn series_to_vec(series: &Series) -> Result<Vec<f64>> {
    let name = series.name().to_string();
    let series = series.cast(&DataType::Float64)?;
    let values = series.f64()?
        .into_iter()
        .enumerate()
        .map(|(row, value)| {
            value.ok_or_else(|| GbdtError::data_loading(
                row + 1, format!("missing value in column `{name}`"),
            ))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(values)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ragged_samples_are_rejected() {
        let samples = vec![
            Sample::new(vec![1.0, 2.0], 1.0),
            Sample::new(vec![1.0], -1.0),
        ];
        let err = Dataset::new(samples).unwrap_err();
        assert!(matches!(
            err, GbdtError::DimensionMismatch { expected: 2, actual: 1 }
        ));
    }


    #[test]
    fn negative_weight_is_rejected() {
        let samples = vec![Sample::new(vec![1.0], 1.0).with_weight(-1.0)];
        assert!(Dataset::new(samples).is_err());
    }


    #[test]
    fn index_and_feature_parses_pairs() {
        assert_eq!(index_and_feature("3:0.5", 1).unwrap(), (3, 0.5));
        assert!(index_and_feature("0:0.5", 1).is_err());
        assert!(index_and_feature("3", 1).is_err());
    }


    #[test]
    fn non_binary_labels_are_reported_once() {
        let samples = vec![
            Sample::new(vec![0.0], 1.0),
            Sample::new(vec![0.0], 0.0),
            Sample::new(vec![0.0], 0.0),
            Sample::new(vec![0.0], -1.0),
        ];
        let dataset = Dataset::new(samples).unwrap();
        assert_eq!(dataset.non_binary_labels(), vec![0.0]);
    }
}
