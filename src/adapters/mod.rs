//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `artifacts` - Loading the model and dataset from disk
//! - `model` - Price model implementations (random forest, mocks)
//! - `reference` - Reference sources (CSV dataset, built-in defaults)

pub mod artifacts;
pub mod model;
pub mod reference;

pub use artifacts::FsArtifactLoader;
pub use model::RandomForestModel;
pub use reference::{DefaultReferenceSource, ReferenceDataset};
