//! Reference Source Port - Read-only statistics over historical listings.
//!
//! The derived-feature calculator, the encoder and the market comparison
//! depend only on this interface. Two implementations exist:
//!
//! - a dataset-backed source built from the reference CSV
//! - a constant-backed source used when the dataset file is absent, which
//!   answers every query with fixed business defaults
//!
//! Every query returns `Option` so callers can apply their own last-resort
//! default when a statistic is undefined (no rows, all values missing).

use crate::domain::valuation::{NumericColumn, ReferenceRow, SimilarityQuery};

/// Per-coordinate means for a city. Each side is `None` when undefined.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MeanCoordinates {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Port for read-only queries against the reference data.
pub trait ReferenceSource: Send + Sync {
    /// True when backed by real listings rather than constants.
    fn is_dataset_backed(&self) -> bool;

    /// Valid city names, sorted.
    fn valid_cities(&self) -> Vec<String>;

    /// Valid property types, sorted.
    fn property_types(&self) -> Vec<String>;

    /// Department of a city, first one observed in the data.
    fn department_for(&self, city: &str) -> Option<String>;

    /// Linear-interpolated percentile (`p` in [0, 1]) of a column, skipping missing values.
    fn percentile(&self, column: NumericColumn, p: f64) -> Option<f64>;

    /// Median of a column over every listing.
    fn median(&self, column: NumericColumn) -> Option<f64> {
        self.percentile(column, 0.5)
    }

    /// Median of a column over listings in one city.
    fn median_for_city(&self, column: NumericColumn, city: &str) -> Option<f64>;

    /// Mean latitude and longitude over listings in one city.
    fn mean_coords_for_city(&self, city: &str) -> MeanCoordinates;

    /// Every listing, used as the one-hot encoding universe. `None` without a dataset.
    fn encoding_universe(&self) -> Option<&[ReferenceRow]>;

    /// Actual prices of listings matching the query.
    fn similar_listing_prices(&self, query: &SimilarityQuery) -> Vec<f64>;
}
