//! Startup wiring: load artifacts once, hand out conversation engines.

use std::sync::Arc;

use tracing::info;

use crate::adapters::{DefaultReferenceSource, FsArtifactLoader};
use crate::config::{AppConfig, ConfigError};
use crate::domain::conversation::ConversationEngine;
use crate::ports::{ArtifactLoader, PriceModel, ReferenceSource, StartupError};

/// Artifacts shared read-only by every conversation.
#[derive(Clone)]
pub struct LoadedArtifacts {
    model: Arc<dyn PriceModel>,
    source: Arc<dyn ReferenceSource>,
}

impl LoadedArtifacts {
    /// Validates `config` and loads both artifacts from disk.
    pub async fn from_config(config: &AppConfig) -> Result<Self, StartupError> {
        config.validate().map_err(ConfigError::from)?;
        Self::load(&FsArtifactLoader::from_config(&config.artifacts)).await
    }

    /// Loads the model, then the dataset, falling back to built-in defaults
    /// when no dataset is available.
    pub async fn load(loader: &dyn ArtifactLoader) -> Result<Self, StartupError> {
        let model = loader.load_model().await?;
        let source: Arc<dyn ReferenceSource> = match loader.load_reference().await? {
            Some(source) => source,
            None => Arc::new(DefaultReferenceSource::new()),
        };

        info!(
            model = %model.describe(),
            dataset_backed = source.is_dataset_backed(),
            "Artifacts ready"
        );
        Ok(Self { model, source })
    }

    pub fn model(&self) -> &Arc<dyn PriceModel> {
        &self.model
    }

    pub fn source(&self) -> &Arc<dyn ReferenceSource> {
        &self.source
    }

    /// A fresh conversation over the shared artifacts.
    pub fn conversation(&self) -> ConversationEngine {
        ConversationEngine::new(self.model.clone(), self.source.clone())
    }
}
