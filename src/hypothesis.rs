//! The core library for `Hypothesis` traits.

pub(crate) mod hypothesis_traits;


pub use hypothesis_traits::Regressor;
