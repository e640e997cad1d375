//! Features the model needs that are never asked of the user.
//!
//! All statistics come through the [`ReferenceSource`] port; the constants
//! here are the last resort when even the source has no answer.

use std::sync::Arc;

use tracing::debug;

use super::categories::{PriceCategory, PriceCutPoints, SizeCategory};
use super::columns::NumericColumn;
use super::profile::{Coordinates, IncompleteProfileError, ProfileDraft, PropertyProfile};
use crate::ports::ReferenceSource;

/// Department reported for a city missing from the mapping.
pub const UNKNOWN_DEPARTMENT: &str = "Desconocido";

/// Price per m² used when no median can be computed.
pub const DEFAULT_PRICE_PER_AREA: f64 = 3_000_000.0;

const QUARTILES: [f64; 3] = [0.25, 0.5, 0.75];

/// Computes derived features from a [`ReferenceSource`].
#[derive(Clone)]
pub struct DerivedFeatureCalculator {
    source: Arc<dyn ReferenceSource>,
}

impl DerivedFeatureCalculator {
    pub fn new(source: Arc<dyn ReferenceSource>) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &Arc<dyn ReferenceSource> {
        &self.source
    }

    /// Department of a resolved city, or [`UNKNOWN_DEPARTMENT`].
    pub fn department_for(&self, city: &str) -> String {
        self.source
            .department_for(city)
            .unwrap_or_else(|| UNKNOWN_DEPARTMENT.to_string())
    }

    /// Mean coordinates of a city's listings; each side falls back to the
    /// national centroid on its own.
    pub fn coordinates_for_city(&self, city: &str) -> Coordinates {
        let mean = self.source.mean_coords_for_city(city);
        Coordinates::new(
            mean.latitude
                .unwrap_or(Coordinates::NATIONAL_CENTROID.latitude),
            mean.longitude
                .unwrap_or(Coordinates::NATIONAL_CENTROID.longitude),
        )
    }

    /// Median price per m² in the city, else overall, else [`DEFAULT_PRICE_PER_AREA`].
    pub fn price_per_area(&self, city: &str) -> f64 {
        self.source
            .median_for_city(NumericColumn::PricePerArea, city)
            .or_else(|| self.source.median(NumericColumn::PricePerArea))
            .unwrap_or(DEFAULT_PRICE_PER_AREA)
    }

    /// Price quartiles of the reference data, or the fixed fallback cut points.
    pub fn price_cut_points(&self) -> PriceCutPoints {
        let [q1, q2, q3] = QUARTILES.map(|p| self.source.percentile(NumericColumn::Price, p));
        match (q1, q2, q3) {
            (Some(lower), Some(middle), Some(upper)) => PriceCutPoints::new(lower, middle, upper),
            _ => PriceCutPoints::FALLBACK,
        }
    }

    /// Buckets the provisional price `area × price_per_area`.
    pub fn price_category(&self, area: f64, price_per_area: f64) -> PriceCategory {
        self.price_cut_points().classify(area * price_per_area)
    }

    /// Completes a fully collected draft with every derived feature.
    pub fn complete(&self, draft: &ProfileDraft) -> Result<PropertyProfile, IncompleteProfileError> {
        let collected = draft.collected()?;
        let price_per_area = self.price_per_area(&collected.city);
        let size_category = SizeCategory::classify(collected.area);
        let price_category = self.price_category(collected.area, price_per_area);

        debug!(
            city = %collected.city,
            price_per_area,
            size_category = %size_category,
            price_category = %price_category,
            "Derived profile features"
        );

        Ok(PropertyProfile {
            area: collected.area,
            rooms: collected.rooms,
            bathrooms: collected.bathrooms,
            city: collected.city,
            department: collected.department,
            latitude: collected.coordinates.latitude,
            longitude: collected.coordinates.longitude,
            property_type: collected.property_type,
            size_category,
            price_category,
            price_per_area,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::valuation::profile::fixtures::complete_draft;
    use crate::domain::valuation::{ReferenceRow, SimilarityQuery};
    use crate::ports::MeanCoordinates;

    /// Source answering from fixed tables, `None` everywhere else.
    #[derive(Default)]
    struct StubSource {
        city_median: Option<f64>,
        overall_median: Option<f64>,
        quartiles: Option<[f64; 3]>,
        coords: MeanCoordinates,
    }

    impl ReferenceSource for StubSource {
        fn is_dataset_backed(&self) -> bool {
            true
        }
        fn valid_cities(&self) -> Vec<String> {
            vec!["Medellín".to_string()]
        }
        fn property_types(&self) -> Vec<String> {
            vec!["Apartamento".to_string()]
        }
        fn department_for(&self, city: &str) -> Option<String> {
            (city == "Medellín").then(|| "Antioquia".to_string())
        }
        fn percentile(&self, column: NumericColumn, p: f64) -> Option<f64> {
            match column {
                NumericColumn::Price => {
                    let q = self.quartiles?;
                    QUARTILES.iter().position(|x| *x == p).map(|i| q[i])
                }
                NumericColumn::PricePerArea if p == 0.5 => self.overall_median,
                _ => None,
            }
        }
        fn median_for_city(&self, _column: NumericColumn, _city: &str) -> Option<f64> {
            self.city_median
        }
        fn mean_coords_for_city(&self, _city: &str) -> MeanCoordinates {
            self.coords
        }
        fn encoding_universe(&self) -> Option<&[ReferenceRow]> {
            None
        }
        fn similar_listing_prices(&self, _query: &SimilarityQuery) -> Vec<f64> {
            Vec::new()
        }
    }

    fn calculator(source: StubSource) -> DerivedFeatureCalculator {
        DerivedFeatureCalculator::new(Arc::new(source))
    }

    mod department {
        use super::*;

        #[test]
        fn maps_known_city() {
            assert_eq!(calculator(StubSource::default()).department_for("Medellín"), "Antioquia");
        }

        #[test]
        fn unknown_city_maps_to_sentinel() {
            assert_eq!(
                calculator(StubSource::default()).department_for("Atlantis"),
                UNKNOWN_DEPARTMENT
            );
        }
    }

    mod coordinates {
        use super::*;

        #[test]
        fn uses_city_mean_when_defined() {
            let calc = calculator(StubSource {
                coords: MeanCoordinates {
                    latitude: Some(6.2),
                    longitude: Some(-75.5),
                },
                ..Default::default()
            });
            assert_eq!(calc.coordinates_for_city("Medellín"), Coordinates::new(6.2, -75.5));
        }

        #[test]
        fn falls_back_to_centroid_per_coordinate() {
            let calc = calculator(StubSource {
                coords: MeanCoordinates {
                    latitude: Some(6.2),
                    longitude: None,
                },
                ..Default::default()
            });
            assert_eq!(calc.coordinates_for_city("Medellín"), Coordinates::new(6.2, -74.0));
            assert_eq!(
                calculator(StubSource::default()).coordinates_for_city("Medellín"),
                Coordinates::NATIONAL_CENTROID
            );
        }
    }

    mod price_per_area {
        use super::*;

        #[test]
        fn prefers_city_median() {
            let calc = calculator(StubSource {
                city_median: Some(5_000_000.0),
                overall_median: Some(4_000_000.0),
                ..Default::default()
            });
            assert_eq!(calc.price_per_area("Medellín"), 5_000_000.0);
        }

        #[test]
        fn falls_back_to_overall_median_then_constant() {
            let calc = calculator(StubSource {
                overall_median: Some(4_000_000.0),
                ..Default::default()
            });
            assert_eq!(calc.price_per_area("Medellín"), 4_000_000.0);
            assert_eq!(
                calculator(StubSource::default()).price_per_area("Medellín"),
                DEFAULT_PRICE_PER_AREA
            );
        }
    }

    mod price_category {
        use super::*;

        #[test]
        fn uses_dataset_quartiles() {
            let calc = calculator(StubSource {
                quartiles: Some([100.0, 200.0, 300.0]),
                ..Default::default()
            });
            assert_eq!(calc.price_category(1.0, 99.0), PriceCategory::Economic);
            assert_eq!(calc.price_category(1.0, 100.0), PriceCategory::Medium);
            assert_eq!(calc.price_category(2.0, 100.0), PriceCategory::High);
            assert_eq!(calc.price_category(3.0, 100.0), PriceCategory::Premium);
        }

        #[test]
        fn uses_fixed_cut_points_without_quartiles() {
            let calc = calculator(StubSource::default());
            assert_eq!(calc.price_cut_points(), PriceCutPoints::FALLBACK);
            // 85 m² × 3M = 255M, between 200M and 350M.
            assert_eq!(calc.price_category(85.0, DEFAULT_PRICE_PER_AREA), PriceCategory::Medium);
        }
    }

    mod complete {
        use super::*;

        #[test]
        fn fills_every_derived_feature() {
            let calc = calculator(StubSource {
                city_median: Some(4_000_000.0),
                ..Default::default()
            });
            let profile = calc.complete(&complete_draft()).unwrap();
            assert_eq!(profile.size_category, SizeCategory::Medium);
            assert_eq!(profile.price_per_area, 4_000_000.0);
            // 85 × 4M = 340M, in the fixed [200M, 350M) band.
            assert_eq!(profile.price_category, PriceCategory::Medium);
            assert_eq!(profile.city, "Medellín");
            assert_eq!(profile.latitude, 6.25);
        }

        #[test]
        fn refuses_incomplete_draft() {
            let mut draft = complete_draft();
            draft.property_type = None;
            let err = calculator(StubSource::default()).complete(&draft).unwrap_err();
            assert_eq!(err, IncompleteProfileError("property_type"));
        }
    }
}
