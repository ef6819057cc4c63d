//! Diagnostics for boosting runs in debug mode.
//! Measure the followings per stage
//! - Training loss
//! - Ranking quality (AUC)
//! - Running time

/// Defines a colored per-stage report.
pub mod logger;

/// Defines metrics (e.g., zero-one loss, AUC).
pub mod loss_functions;

pub use logger::StageLogger;
pub use loss_functions::{
    zero_one_loss,
    roc_auc,
};
