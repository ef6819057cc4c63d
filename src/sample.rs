//! Struct `Dataset` represents a batch of weighted, labeled samples.

// Provides sample and dataset structs.
pub(crate) mod sample_struct;

// Provides a struct that reads a file.
pub(crate) mod sample_reader;


pub use sample_reader::SampleReader;
pub use sample_struct::{Sample, Dataset};
