//! Error type shared by every fallible operation of this crate.
use std::io;
use thiserror::Error;


/// A specialized `Result` type for this crate.
pub type Result<T> = std::result::Result<T, GbdtError>;


/// Errors raised while loading data, training, or (de)serializing a model.
#[derive(Error, Debug)]
pub enum GbdtError {
    /// The dataset cannot define a weighted mean label
    /// (no samples, zero total weight, or an empty subsample).
    #[error("Degenerate dataset: {message}")]
    DegenerateDataset {
        /// What made the dataset unusable.
        message: String,
    },


    /// The mean label lies on (or outside) the boundary
    /// of the logistic loss, so the initial bias would be infinite.
    #[error(
        "Degenerate label distribution: \
        weighted mean label {y_avg} is outside of (-1, 1)"
    )]
    DegenerateLabelDistribution {
        /// Weighted mean label.
        y_avg: f64,
    },


    /// The model text does not follow the ensemble grammar.
    #[error("Model parse error ({field}): {reason}")]
    ModelParse {
        /// The segment or header value that failed.
        field: String,
        /// Why it failed.
        reason: String,
    },


    /// A weak learner could not restore itself from its payload.
    #[error("Weak learner parse error: {message}")]
    LearnerParse {
        /// Message from the weak learner.
        message: String,
    },


    /// A weak learner produced a payload containing the segment separator,
    /// so the ensemble cannot be saved.
    #[error("Weak learner payload of stage {stage} contains the segment separator")]
    PayloadSeparator {
        /// Stage of the offending learner.
        stage: usize,
    },


    /// The ensemble has not finished training.
    #[error("The ensemble is not trained ({fitted}/{expected} stages fitted)")]
    Untrained {
        /// Number of fitted stages.
        fitted: usize,
        /// Number of stage slots.
        expected: usize,
    },


    /// Invalid configuration value.
    #[error("Invalid parameter: {parameter} = {value}, {reason}")]
    Config {
        /// Parameter name.
        parameter: String,
        /// Rejected value.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },


    /// Malformed input file.
    #[error("Data loading error (line {line}): {message}")]
    DataLoading {
        /// 1-indexed line of the input file.
        line: usize,
        /// What went wrong.
        message: String,
    },


    /// Length or shape mismatch between arguments.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected length.
        expected: usize,
        /// Actual length.
        actual: usize,
    },


    /// File I/O errors
    #[error("I/O error: {source}")]
    Io {
        /// Underlying error.
        #[from]
        source: io::Error,
    },


    /// JSON serialization errors
    #[error("JSON error: {source}")]
    Json {
        /// Underlying error.
        #[from]
        source: serde_json::Error,
    },


    /// DataFrame conversion errors
    #[error("Polars error: {source}")]
    Polars {
        /// Underlying error.
        #[from]
        source: polars::error::PolarsError,
    },
}


impl GbdtError {
    #[inline]
    pub(crate) fn degenerate_dataset<S: Into<String>>(message: S) -> Self {
        Self::DegenerateDataset { message: message.into() }
    }


    #[inline]
    pub(crate) fn model_parse<F, R>(field: F, reason: R) -> Self
        where F: Into<String>,
              R: Into<String>,
    {
        Self::ModelParse { field: field.into(), reason: reason.into() }
    }


    #[inline]
    pub(crate) fn config<P, V, R>(parameter: P, value: V, reason: R) -> Self
        where P: Into<String>,
              V: ToString,
              R: Into<String>,
    {
        Self::Config {
            parameter: parameter.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }


    #[inline]
    pub(crate) fn data_loading<S: Into<String>>(line: usize, message: S)
        -> Self
    {
        Self::DataLoading { line, message: message.into() }
    }
}
