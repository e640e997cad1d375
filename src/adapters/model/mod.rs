//! Price model adapters.
//!
//! - `RandomForestModel` - fitted forest read from a JSON artifact
//! - `mock` - fixed and failing models for tests

pub mod mock;
mod random_forest;

pub use random_forest::{ForestArtifact, RandomForestModel, RegressionTree, TreeNode};
