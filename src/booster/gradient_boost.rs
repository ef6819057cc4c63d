//! Gradient boosting: the staged ensemble and its text encoding.

mod gbdt;
mod persistence;

pub use gbdt::{GBDT, UNKNOWN_VALUE};
pub use persistence::SEPARATOR;
