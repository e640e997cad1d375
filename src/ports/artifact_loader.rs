//! Artifact Loader Port - Startup loading of the model and reference dataset.
//!
//! Both artifacts are read once, before the first conversation, and shared
//! read-only afterwards. A missing model is fatal; a missing dataset is not
//! and is reported as `Ok(None)` so the caller can fall back to constants.

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

use super::{PriceModel, ReferenceSource};

/// Port for loading startup artifacts.
#[async_trait]
pub trait ArtifactLoader: Send + Sync {
    /// Loads the fitted model.
    async fn load_model(&self) -> Result<Arc<dyn PriceModel>, StartupError>;

    /// Loads the reference dataset, `Ok(None)` when the file does not exist.
    async fn load_reference(&self) -> Result<Option<Arc<dyn ReferenceSource>>, StartupError>;
}

/// Errors that prevent a conversation from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("model artifact not found at {}", path.display())]
    ModelMissing { path: PathBuf },

    #[error("model artifact at {} is corrupt: {reason}", path.display())]
    ModelCorrupt { path: PathBuf, reason: String },

    #[error("reference dataset at {} is corrupt: {reason}", path.display())]
    DatasetCorrupt { path: PathBuf, reason: String },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}
