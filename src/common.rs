//! Defines some common functions used in this library.

/// Defines loss function trait and its instances.
pub mod loss_functions;

/// Defines some checker functions.
pub(crate) mod checker;

pub use loss_functions::{LossFunction, Loss, weighted_mean};
