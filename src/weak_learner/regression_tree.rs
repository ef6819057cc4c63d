/// This file defines the regression tree weak learner.
pub mod regression_tree_algorithm;

/// Regression Tree builder.
pub mod builder;

mod node;


pub use regression_tree_algorithm::RegressionTree;
pub use builder::RegressionTreeBuilder;
