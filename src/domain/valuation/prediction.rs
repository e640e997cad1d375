//! Prediction service: encode, invoke the model, compare with the market.

use std::sync::Arc;

use tracing::{debug, info};

use super::comparison::{MarketComparison, SimilarityQuery};
use super::encoder::FeatureEncoder;
use super::profile::PropertyProfile;
use crate::ports::{PredictionError, PriceModel, ReferenceSource};

/// Result of valuing one property.
#[derive(Debug, Clone, PartialEq)]
pub struct Valuation {
    pub profile: PropertyProfile,
    pub estimated_price: f64,
    /// Absent when no similar listings exist.
    pub comparison: Option<MarketComparison>,
}

impl Valuation {
    /// Estimated price divided by area.
    pub fn estimated_price_per_area(&self) -> f64 {
        self.estimated_price / self.profile.area
    }
}

/// Invokes the fitted model on completed profiles.
#[derive(Clone)]
pub struct PredictionService {
    model: Arc<dyn PriceModel>,
    source: Arc<dyn ReferenceSource>,
    encoder: FeatureEncoder,
}

impl PredictionService {
    pub fn new(model: Arc<dyn PriceModel>, source: Arc<dyn ReferenceSource>) -> Self {
        Self {
            model,
            source,
            encoder: FeatureEncoder::new(),
        }
    }

    /// Values a completed profile. Failures are returned, never retried.
    pub fn value(&self, profile: PropertyProfile) -> Result<Valuation, PredictionError> {
        let features = self.encoder.encode(
            &profile,
            self.source.encoding_universe(),
            self.model.expected_feature_names(),
        );

        let estimated_price = self.model.predict(&features)?;
        if !estimated_price.is_finite() {
            return Err(PredictionError::NonFiniteOutput {
                value: estimated_price,
            });
        }

        let query = SimilarityQuery::for_profile(&profile);
        let prices = self.source.similar_listing_prices(&query);
        debug!(similar_listings = prices.len(), "Collected comparable listings");
        let comparison = MarketComparison::from_prices(estimated_price, &prices);

        info!(
            city = %profile.city,
            property_type = %profile.property_type,
            area = profile.area,
            estimated_price,
            "Property valued"
        );

        Ok(Valuation {
            profile,
            estimated_price,
            comparison,
        })
    }
}
