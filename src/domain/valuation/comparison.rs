//! Comparison of an estimate against similar reference listings.

use serde::{Deserialize, Serialize};

use super::profile::PropertyProfile;

/// Smallest area, relative to the profile's, of a similar listing.
pub const MIN_AREA_RATIO: f64 = 0.8;
/// Largest area, relative to the profile's, of a similar listing.
pub const MAX_AREA_RATIO: f64 = 1.2;

/// Deviation (in percent) under which an estimate is "within normal range".
pub const NORMAL_RANGE_PERCENT: f64 = 10.0;

/// Filter for listings comparable to a profile.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityQuery {
    pub city: String,
    pub property_type: String,
    /// Inclusive lower area bound.
    pub min_area: f64,
    /// Inclusive upper area bound.
    pub max_area: f64,
}

impl SimilarityQuery {
    /// Same city and type, area within ±20%.
    pub fn for_profile(profile: &PropertyProfile) -> Self {
        Self {
            city: profile.city.clone(),
            property_type: profile.property_type.clone(),
            min_area: profile.area * MIN_AREA_RATIO,
            max_area: profile.area * MAX_AREA_RATIO,
        }
    }

    pub fn matches(&self, city: &str, property_type: &str, area: f64) -> bool {
        city == self.city
            && property_type == self.property_type
            && area >= self.min_area
            && area <= self.max_area
    }
}

/// Where the estimate sits relative to the comparable mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketPosition {
    WithinRange,
    AboveAverage,
    BelowAverage,
}

impl MarketPosition {
    pub fn classify(deviation_percent: f64) -> Self {
        if deviation_percent.abs() < NORMAL_RANGE_PERCENT {
            Self::WithinRange
        } else if deviation_percent > 0.0 {
            Self::AboveAverage
        } else {
            Self::BelowAverage
        }
    }
}

/// Summary of comparable listings' actual prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketComparison {
    pub count: usize,
    pub mean_price: f64,
    pub min_price: f64,
    pub max_price: f64,
    /// `(estimate - mean) / mean × 100`.
    pub deviation_percent: f64,
    pub position: MarketPosition,
}

impl MarketComparison {
    /// Summarizes `prices` against `estimate`.
    ///
    /// `None` when there is nothing to compare with, or the mean is not a
    /// positive price.
    pub fn from_prices(estimate: f64, prices: &[f64]) -> Option<Self> {
        if prices.is_empty() {
            return None;
        }

        let count = prices.len();
        let mean_price = prices.iter().sum::<f64>() / count as f64;
        if mean_price <= 0.0 || !mean_price.is_finite() {
            return None;
        }
        let min_price = prices.iter().copied().fold(f64::INFINITY, f64::min);
        let max_price = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let deviation_percent = (estimate - mean_price) / mean_price * 100.0;

        Some(Self {
            count,
            mean_price,
            min_price,
            max_price,
            deviation_percent,
            position: MarketPosition::classify(deviation_percent),
        })
    }
}
