//! Filesystem loader for the model and reference dataset

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tracing::{info, warn};

use crate::adapters::model::RandomForestModel;
use crate::adapters::reference::{read_reference_rows, ReferenceDataset};
use crate::config::ArtifactConfig;
use crate::ports::{ArtifactLoader, PriceModel, ReferenceSource, StartupError};

/// Loads startup artifacts from local files
///
/// Paths are taken as given; resolve them against the project root first
/// (see [`FsArtifactLoader::from_config`]).
pub struct FsArtifactLoader {
    model_path: PathBuf,
    dataset_path: PathBuf,
}

impl FsArtifactLoader {
    pub fn new(model_path: impl AsRef<Path>, dataset_path: impl AsRef<Path>) -> Self {
        Self {
            model_path: model_path.as_ref().to_path_buf(),
            dataset_path: dataset_path.as_ref().to_path_buf(),
        }
    }

    /// Loader for the paths in `config`, resolved against its project root
    pub fn from_config(config: &ArtifactConfig) -> Self {
        Self::new(config.resolved_model_path(), config.resolved_dataset_path())
    }

    pub fn model_path(&self) -> &Path {
        &self.model_path
    }

    pub fn dataset_path(&self) -> &Path {
        &self.dataset_path
    }
}

#[async_trait]
impl ArtifactLoader for FsArtifactLoader {
    async fn load_model(&self) -> Result<Arc<dyn PriceModel>, StartupError> {
        let bytes = fs::read(&self.model_path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => StartupError::ModelMissing {
                path: self.model_path.clone(),
            },
            _ => StartupError::Io {
                path: self.model_path.clone(),
                source: e,
            },
        })?;

        let model = RandomForestModel::from_json_bytes(&bytes).map_err(|e| {
            StartupError::ModelCorrupt {
                path: self.model_path.clone(),
                reason: e.to_string(),
            }
        })?;

        info!(
            path = %self.model_path.display(),
            sha256 = model.fingerprint(),
            trees = model.tree_count(),
            features = model.expected_feature_names().len(),
            "Model loaded"
        );
        Ok(Arc::new(model))
    }

    async fn load_reference(&self) -> Result<Option<Arc<dyn ReferenceSource>>, StartupError> {
        let file = match fs::File::open(&self.dataset_path).await {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!(
                    path = %self.dataset_path.display(),
                    "Reference dataset not found, using built-in defaults"
                );
                return Ok(None);
            }
            Err(e) => {
                return Err(StartupError::Io {
                    path: self.dataset_path.clone(),
                    source: e,
                })
            }
        };

        let rows = read_reference_rows(file)
            .await
            .map_err(|e| StartupError::DatasetCorrupt {
                path: self.dataset_path.clone(),
                reason: e.to_string(),
            })?;

        if rows.is_empty() {
            warn!(
                path = %self.dataset_path.display(),
                "Reference dataset has no rows, using built-in defaults"
            );
            return Ok(None);
        }

        let dataset = ReferenceDataset::new(rows);
        info!(
            path = %self.dataset_path.display(),
            rows = dataset.len(),
            cities = dataset.valid_cities().len(),
            "Reference dataset loaded"
        );
        Ok(Some(Arc::new(dataset)))
    }
}
