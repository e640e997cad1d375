//! Mock price models for testing.
//!
//! Stand-ins for the fitted model so conversations can run end to end
//! without a model artifact on disk.
//!
//! # Features
//!
//! - Fixed price for every input
//! - Error injection for failure paths
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let model = FixedPriceModel::new(vec!["area".into()], 255_000_000.0);
//! let engine = ConversationEngine::new(Arc::new(model.clone()), source);
//! // ... drive the conversation ...
//! assert_eq!(model.calls().len(), 1);
//! ```

use std::sync::{Arc, Mutex};

use crate::domain::valuation::EncodedFeatureVector;
use crate::ports::{ModelQuality, PredictionError, PriceModel};

/// Returns the same price for any well-formed feature vector.
#[derive(Debug, Clone)]
pub struct FixedPriceModel {
    feature_names: Vec<String>,
    price: f64,
    quality: Option<ModelQuality>,
    /// Every vector passed to `predict`, in order.
    calls: Arc<Mutex<Vec<EncodedFeatureVector>>>,
}

impl FixedPriceModel {
    pub fn new(feature_names: Vec<String>, price: f64) -> Self {
        Self {
            feature_names,
            price,
            quality: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_quality(mut self, quality: ModelQuality) -> Self {
        self.quality = Some(quality);
        self
    }

    /// Feature vectors received so far.
    pub fn calls(&self) -> Vec<EncodedFeatureVector> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

impl PriceModel for FixedPriceModel {
    fn expected_feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn predict(&self, features: &EncodedFeatureVector) -> Result<f64, PredictionError> {
        if features.names() != self.feature_names.as_slice() {
            return Err(PredictionError::schema_mismatch(format!(
                "expected {} features, got {}",
                self.feature_names.len(),
                features.len()
            )));
        }
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(features.clone());
        }
        Ok(self.price)
    }

    fn describe(&self) -> String {
        format!("fixed price model ({} features)", self.feature_names.len())
    }

    fn quality(&self) -> Option<ModelQuality> {
        self.quality
    }
}

/// Fails every prediction with [`PredictionError::InvalidModel`].
#[derive(Debug, Clone)]
pub struct FailingPriceModel {
    feature_names: Vec<String>,
    reason: String,
}

impl FailingPriceModel {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            feature_names: vec!["area".to_string()],
            reason: reason.into(),
        }
    }
}

impl PriceModel for FailingPriceModel {
    fn expected_feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn predict(&self, _features: &EncodedFeatureVector) -> Result<f64, PredictionError> {
        Err(PredictionError::invalid_model(self.reason.clone()))
    }

    fn describe(&self) -> String {
        "failing price model".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vector(names: &[&str]) -> EncodedFeatureVector {
        EncodedFeatureVector::new(
            names.iter().map(|n| n.to_string()).collect(),
            vec![1.0; names.len()],
        )
    }

    #[test]
    fn fixed_model_records_calls() {
        let model = FixedPriceModel::new(vec!["area".to_string()], 42.0);
        assert_eq!(model.predict(&vector(&["area"])), Ok(42.0));
        assert_eq!(model.calls(), vec![vector(&["area"])]);
    }

    #[test]
    fn fixed_model_checks_schema() {
        let model = FixedPriceModel::new(vec!["area".to_string()], 42.0);
        let err = model.predict(&vector(&["banos"])).unwrap_err();
        assert!(matches!(err, PredictionError::SchemaMismatch { .. }));
        assert!(model.calls().is_empty());
    }

    #[test]
    fn failing_model_reports_reason() {
        let err = FailingPriceModel::new("boom").predict(&vector(&["area"])).unwrap_err();
        assert_eq!(err.to_string(), "invalid model: boom");
    }
}
