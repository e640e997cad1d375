//! Artifact location configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Where the model and the reference dataset live.
///
/// Relative paths are resolved against `project_root`, never against the
/// process working directory.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ArtifactConfig {
    /// Base directory for relative artifact paths
    #[serde(default = "default_project_root")]
    pub project_root: PathBuf,

    /// Fitted model, JSON random-forest artifact
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,

    /// Reference listings CSV; optional at runtime
    #[serde(default = "default_dataset_path")]
    pub dataset_path: PathBuf,
}

impl ArtifactConfig {
    /// Absolute (or root-relative) path of the model artifact
    pub fn resolved_model_path(&self) -> PathBuf {
        self.project_root.join(&self.model_path)
    }

    /// Absolute (or root-relative) path of the reference dataset
    pub fn resolved_dataset_path(&self) -> PathBuf {
        self.project_root.join(&self.dataset_path)
    }

    /// Validate artifact configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.project_root.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("artifacts.project_root"));
        }
        if self.model_path.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("artifacts.model_path"));
        }
        if self.dataset_path.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("artifacts.dataset_path"));
        }
        Ok(())
    }
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            project_root: default_project_root(),
            model_path: default_model_path(),
            dataset_path: default_dataset_path(),
        }
    }
}

fn default_project_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

fn default_model_path() -> PathBuf {
    PathBuf::from("models/random_forest_model.json")
}

fn default_dataset_path() -> PathBuf {
    PathBuf::from("data/dataset_limpio.csv")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_config_defaults() {
        let config = ArtifactConfig::default();
        assert_eq!(config.project_root, PathBuf::from(env!("CARGO_MANIFEST_DIR")));
        assert_eq!(config.model_path, PathBuf::from("models/random_forest_model.json"));
        assert_eq!(config.dataset_path, PathBuf::from("data/dataset_limpio.csv"));
    }

    #[test]
    fn test_paths_resolve_against_project_root() {
        let config = ArtifactConfig {
            project_root: PathBuf::from("/srv/predictor"),
            ..Default::default()
        };
        assert_eq!(
            config.resolved_model_path(),
            PathBuf::from("/srv/predictor/models/random_forest_model.json")
        );
        assert_eq!(
            config.resolved_dataset_path(),
            PathBuf::from("/srv/predictor/data/dataset_limpio.csv")
        );
    }

    #[test]
    fn test_absolute_path_overrides_root() {
        let config = ArtifactConfig {
            project_root: PathBuf::from("/srv/predictor"),
            model_path: PathBuf::from("/opt/model.json"),
            ..Default::default()
        };
        assert_eq!(config.resolved_model_path(), PathBuf::from("/opt/model.json"));
    }

    #[test]
    fn test_validate_rejects_empty_model_path() {
        let config = ArtifactConfig {
            model_path: PathBuf::new(),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("artifacts.model_path"))
        );
    }
}
