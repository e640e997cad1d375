//! Price Model Port - Interface to the trained regression model.
//!
//! The model is an opaque, already-fitted artifact. It publishes the ordered
//! list of feature names it was trained on and predicts one price per
//! encoded feature vector.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::valuation::{EncodedFeatureVector, IncompleteProfileError};

/// Port for invoking the fitted model.
pub trait PriceModel: Send + Sync {
    /// Feature names in the exact order the model expects them.
    fn expected_feature_names(&self) -> &[String];

    /// Predicts a price in the dataset's currency unit.
    ///
    /// Deterministic: a failure is never retried.
    fn predict(&self, features: &EncodedFeatureVector) -> Result<f64, PredictionError>;

    /// Short human-readable description for logs.
    fn describe(&self) -> String;

    /// Hold-out metrics recorded when the model was trained, if any.
    fn quality(&self) -> Option<ModelQuality> {
        None
    }
}

/// Evaluation metrics shipped alongside a model artifact.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelQuality {
    /// Mean absolute percentage error, in percent.
    pub mape_percent: f64,
    /// Coefficient of determination.
    pub r_squared: f64,
}

/// Errors from the prediction pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictionError {
    /// Feature vector does not match the model's schema.
    #[error("feature vector does not match model schema: {reason}")]
    SchemaMismatch {
        /// What differs.
        reason: String,
    },

    /// The model artifact is internally inconsistent.
    #[error("invalid model: {reason}")]
    InvalidModel {
        /// Error details.
        reason: String,
    },

    /// The model produced NaN or infinity.
    #[error("model produced a non-finite price: {value}")]
    NonFiniteOutput {
        /// The offending output.
        value: f64,
    },

    /// The profile reached prediction with a field unset.
    #[error(transparent)]
    IncompleteProfile(#[from] IncompleteProfileError),
}

impl PredictionError {
    pub fn schema_mismatch(reason: impl Into<String>) -> Self {
        Self::SchemaMismatch {
            reason: reason.into(),
        }
    }

    pub fn invalid_model(reason: impl Into<String>) -> Self {
        Self::InvalidModel {
            reason: reason.into(),
        }
    }
}
