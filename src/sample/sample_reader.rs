use std::path::Path;

use super::sample_struct::Dataset;
use crate::{GbdtError, Result};


/// A struct that returns [`Dataset`].
/// Using this struct, one can read a CSV/SVMLIGHT format file to [`Dataset`].
/// Other formats are not supported yet.
/// # Example
/// The following code is a simple example to read a CSV file.
/// ```no_run
/// use gbdt::prelude::*;
///
/// let filename = "/path/to/csv/file.csv";
/// let dataset = SampleReader::new()
///     .file(filename)
///     .has_header(true)
///     .target_feature("class")
///     .read()
///     .unwrap();
/// ```
pub struct SampleReader<P, S> {
    file: Option<P>,
    has_header: bool,
    target: Option<S>,
    weight: Option<S>,
}


impl<P, S> Default for SampleReader<P, S> {
    fn default() -> Self {
        Self::new()
    }
}


impl<P, S> SampleReader<P, S> {
    /// Construct a new instance of [`SampleReader`].
    pub fn new() -> Self {
        Self {
            file: None,
            has_header: false,
            target: None,
            weight: None,
        }
    }


    /// Set the flag whether the file has the header row or not.
    /// Default is `false.`
    pub fn has_header(mut self, flag: bool) -> Self {
        self.has_header = flag;
        self
    }
}


impl<P, S> SampleReader<P, S>
    where P: AsRef<Path>
{
    /// Set the file name.
    pub fn file(mut self, file: P) -> Self {
        self.file = Some(file);
        self
    }
}


impl<P, S> SampleReader<P, S>
    where S: AsRef<str>
{
    /// Set the column name that is used for target label.
    pub fn target_feature(mut self, column: S) -> Self {
        self.target = Some(column);
        self
    }


    /// Set the column name that is used for sample weights.
    /// Without it, every sample has weight `1.0`.
    pub fn weight_feature(mut self, column: S) -> Self {
        self.weight = Some(column);
        self
    }
}



impl<P, S> SampleReader<P, S>
    where P: AsRef<Path>,
          S: AsRef<str>
{
    /// Reads the file based on the arguments,
    /// and returns `Result<Dataset>`.
    /// This method consumes `self.`
    /// If you read a CSV file, the extension should be `.csv`;
    /// any other file is read as SVMLight.
    pub fn read(self) -> Result<Dataset> {
        let file = self.file
            .ok_or_else(|| GbdtError::config(
                "file", "None", "the file name for csv/svmlight is not set",
            ))?;
        let file = file.as_ref();

        let dataset = if file.extension().is_some_and(|ext| ext == "csv") {
            let target = self.target
                .ok_or_else(|| GbdtError::config(
                    "target_feature",
                    "None",
                    "target column is not specified. \
                    Use `SampleReader::target_feature`.",
                ))?;
            let weight = self.weight.as_ref().map(|w| w.as_ref());
            Dataset::from_csv(file, self.has_header, target.as_ref(), weight)?
        } else {
            Dataset::from_svmlight(file)?
        };

        log::info!(
            "read {} examples with {} features from {}",
            dataset.len(), dataset.shape().1, file.display(),
        );
        Ok(dataset)
    }
}
