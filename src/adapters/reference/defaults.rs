//! Constant-backed reference source, used when the dataset file is absent.

use once_cell::sync::Lazy;

use crate::domain::valuation::{NumericColumn, ReferenceRow, SimilarityQuery};
use crate::ports::{MeanCoordinates, ReferenceSource};

/// Cities offered without a dataset, with their departments.
static DEFAULT_CITIES: Lazy<Vec<(String, String)>> = Lazy::new(|| {
    [
        ("Bogotá D.C", "Cundinamarca"),
        ("Medellín", "Antioquia"),
        ("Cali", "Valle del Cauca"),
        ("Barranquilla", "Atlántico"),
        ("Cartagena", "Bolívar"),
    ]
    .into_iter()
    .map(|(city, department)| (city.to_string(), department.to_string()))
    .collect()
});

static DEFAULT_PROPERTY_TYPES: Lazy<Vec<String>> = Lazy::new(|| {
    ["Apartamento", "Casa", "Lote", "Finca"]
        .into_iter()
        .map(str::to_string)
        .collect()
});

/// Answers every query from fixed business defaults.
///
/// Statistics are never defined here, so every caller falls through to its
/// own last-resort constant.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultReferenceSource;

impl DefaultReferenceSource {
    pub fn new() -> Self {
        Self
    }
}

impl ReferenceSource for DefaultReferenceSource {
    fn is_dataset_backed(&self) -> bool {
        false
    }

    fn valid_cities(&self) -> Vec<String> {
        DEFAULT_CITIES.iter().map(|(city, _)| city.clone()).collect()
    }

    fn property_types(&self) -> Vec<String> {
        DEFAULT_PROPERTY_TYPES.clone()
    }

    fn department_for(&self, city: &str) -> Option<String> {
        DEFAULT_CITIES
            .iter()
            .find(|(name, _)| name == city)
            .map(|(_, department)| department.clone())
    }

    fn percentile(&self, _column: NumericColumn, _p: f64) -> Option<f64> {
        None
    }

    fn median_for_city(&self, _column: NumericColumn, _city: &str) -> Option<f64> {
        None
    }

    fn mean_coords_for_city(&self, _city: &str) -> MeanCoordinates {
        MeanCoordinates::default()
    }

    fn encoding_universe(&self) -> Option<&[ReferenceRow]> {
        None
    }

    fn similar_listing_prices(&self, _query: &SimilarityQuery) -> Vec<f64> {
        Vec::new()
    }
}
