//! Provides the boosting algorithms.

mod core;

mod gradient_boost;


/// Booster trait
pub use self::core::Booster;

pub use self::gradient_boost::{
    GBDT,
    UNKNOWN_VALUE,
    SEPARATOR,
};
