//! Random-forest regressor loaded from a JSON artifact.
//!
//! The artifact is a flat description of a fitted forest:
//!
//! ```json
//! {
//!   "feature_names": ["area", "habitaciones", "..."],
//!   "trees": [
//!     { "nodes": [
//!         { "feature": 0, "threshold": 85.0, "left": 1, "right": 2 },
//!         { "value": 250000000.0 },
//!         { "value": 410000000.0 }
//!     ] }
//!   ],
//!   "metrics": { "mape_percent": 0.8, "r_squared": 0.9899 }
//! }
//! ```
//!
//! Node 0 is the root of each tree. A split sends `x[feature] <= threshold`
//! to `left` and everything else (including NaN) to `right`. The forest
//! predicts the mean of its trees.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashSet;

use crate::domain::valuation::EncodedFeatureVector;
use crate::ports::{ModelQuality, PredictionError, PriceModel};

/// One node of a regression tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

/// A single regression tree as a flat node array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    pub nodes: Vec<TreeNode>,
}

impl RegressionTree {
    /// Checks that every walk from the root ends on a leaf.
    ///
    /// Children must point forward, which rules out cycles.
    fn validate(&self, feature_count: usize) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("tree has no nodes".to_string());
        }
        for (index, node) in self.nodes.iter().enumerate() {
            match *node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if feature >= feature_count {
                        return Err(format!(
                            "node {index} splits on feature {feature}, model has {feature_count}"
                        ));
                    }
                    if !threshold.is_finite() {
                        return Err(format!("node {index} has a non-finite threshold"));
                    }
                    for child in [left, right] {
                        if child <= index || child >= self.nodes.len() {
                            return Err(format!("node {index} has invalid child {child}"));
                        }
                    }
                }
                TreeNode::Leaf { value } => {
                    if !value.is_finite() {
                        return Err(format!("leaf {index} has a non-finite value"));
                    }
                }
            }
        }
        Ok(())
    }

    fn predict(&self, values: &[f64]) -> Option<f64> {
        let mut index = 0;
        loop {
            match *self.nodes.get(index)? {
                TreeNode::Leaf { value } => return Some(value),
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if *values.get(feature)? <= threshold {
                        left
                    } else {
                        right
                    };
                }
            }
        }
    }
}

/// Serialized form of a fitted forest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestArtifact {
    pub feature_names: Vec<String>,
    pub trees: Vec<RegressionTree>,
    #[serde(default)]
    pub metrics: Option<ModelQuality>,
}

/// A fitted random-forest regressor.
#[derive(Debug, Clone)]
pub struct RandomForestModel {
    feature_names: Vec<String>,
    trees: Vec<RegressionTree>,
    quality: Option<ModelQuality>,
    fingerprint: String,
}

impl RandomForestModel {
    /// Parses and validates a JSON artifact.
    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self, PredictionError> {
        let artifact: ForestArtifact = serde_json::from_slice(bytes)
            .map_err(|e| PredictionError::invalid_model(format!("malformed artifact: {e}")))?;
        let mut model = Self::from_artifact(artifact)?;
        model.fingerprint = sha256_hex(bytes);
        Ok(model)
    }

    /// Validates an in-memory artifact.
    pub fn from_artifact(artifact: ForestArtifact) -> Result<Self, PredictionError> {
        if artifact.feature_names.is_empty() {
            return Err(PredictionError::invalid_model("no feature names"));
        }
        let mut seen = HashSet::new();
        if let Some(duplicate) = artifact
            .feature_names
            .iter()
            .find(|name| !seen.insert(name.as_str()))
        {
            return Err(PredictionError::invalid_model(format!(
                "duplicate feature name '{duplicate}'"
            )));
        }
        if artifact.trees.is_empty() {
            return Err(PredictionError::invalid_model("forest has no trees"));
        }
        for (i, tree) in artifact.trees.iter().enumerate() {
            tree.validate(artifact.feature_names.len())
                .map_err(|reason| PredictionError::invalid_model(format!("tree {i}: {reason}")))?;
        }

        let fingerprint = sha256_hex(&serde_json::to_vec(&artifact).unwrap_or_default());
        Ok(Self {
            feature_names: artifact.feature_names,
            trees: artifact.trees,
            quality: artifact.metrics,
            fingerprint,
        })
    }

    /// Hex SHA-256 of the artifact bytes.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }
}

fn sha256_hex(bytes: &[u8]) -> String {
    Sha256::digest(bytes)
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

impl PriceModel for RandomForestModel {
    fn expected_feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn predict(&self, features: &EncodedFeatureVector) -> Result<f64, PredictionError> {
        if features.names() != self.feature_names.as_slice() {
            return Err(PredictionError::schema_mismatch(format!(
                "model expects {} features in training order, got {}",
                self.feature_names.len(),
                features.len()
            )));
        }

        let mut total = 0.0;
        for (i, tree) in self.trees.iter().enumerate() {
            total += tree
                .predict(features.values())
                .ok_or_else(|| PredictionError::invalid_model(format!("tree {i} walk failed")))?;
        }
        Ok(total / self.trees.len() as f64)
    }

    fn describe(&self) -> String {
        format!(
            "random forest ({} trees, {} features)",
            self.trees.len(),
            self.feature_names.len()
        )
    }

    fn quality(&self) -> Option<ModelQuality> {
        self.quality
    }
}
