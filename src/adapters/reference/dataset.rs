//! Dataset-backed reference source.

use std::collections::HashMap;

use crate::domain::valuation::{NumericColumn, ReferenceRow, SimilarityQuery};
use crate::ports::{MeanCoordinates, ReferenceSource};

/// Linear-interpolated percentile of an ascending slice.
///
/// Matches the default interpolation of common dataframe libraries:
/// position `p × (n - 1)`, interpolated between its neighbours.
pub fn percentile_of_sorted(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=1.0).contains(&p) {
        return None;
    }
    let position = p * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

fn sorted_values(rows: &[&ReferenceRow], column: NumericColumn) -> Vec<f64> {
    let mut values: Vec<f64> = rows.iter().filter_map(|row| row.value(column)).collect();
    values.sort_by(f64::total_cmp);
    values
}

fn distinct_sorted<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut distinct: Vec<String> = values
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect();
    distinct.sort();
    distinct.dedup();
    distinct
}

/// Historical listings loaded from the reference CSV.
///
/// Immutable after construction; sorted columns and per-city indexes are
/// built once so per-request queries stay cheap.
#[derive(Debug, Clone)]
pub struct ReferenceDataset {
    rows: Vec<ReferenceRow>,
    cities: Vec<String>,
    property_types: Vec<String>,
    departments: HashMap<String, String>,
    rows_by_city: HashMap<String, Vec<usize>>,
    sorted_columns: HashMap<NumericColumn, Vec<f64>>,
}

impl ReferenceDataset {
    pub fn new(rows: Vec<ReferenceRow>) -> Self {
        let cities = distinct_sorted(rows.iter().map(|r| r.city.as_str()));
        let property_types = distinct_sorted(rows.iter().map(|r| r.property_type.as_str()));

        let mut departments = HashMap::new();
        let mut rows_by_city: HashMap<String, Vec<usize>> = HashMap::new();
        for (i, row) in rows.iter().enumerate() {
            rows_by_city.entry(row.city.clone()).or_default().push(i);
            if !row.department.is_empty() {
                departments
                    .entry(row.city.clone())
                    .or_insert_with(|| row.department.clone());
            }
        }

        let all: Vec<&ReferenceRow> = rows.iter().collect();
        let sorted_columns = [
            NumericColumn::Area,
            NumericColumn::Rooms,
            NumericColumn::Bathrooms,
            NumericColumn::Latitude,
            NumericColumn::Longitude,
            NumericColumn::PricePerArea,
            NumericColumn::Price,
        ]
        .into_iter()
        .map(|column| (column, sorted_values(&all, column)))
        .collect();

        Self {
            rows,
            cities,
            property_types,
            departments,
            rows_by_city,
            sorted_columns,
        }
    }

    pub fn rows(&self) -> &[ReferenceRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn city_rows(&self, city: &str) -> Vec<&ReferenceRow> {
        self.rows_by_city
            .get(city)
            .map(|indexes| indexes.iter().map(|&i| &self.rows[i]).collect())
            .unwrap_or_default()
    }
}

impl ReferenceSource for ReferenceDataset {
    fn is_dataset_backed(&self) -> bool {
        true
    }

    fn valid_cities(&self) -> Vec<String> {
        self.cities.clone()
    }

    fn property_types(&self) -> Vec<String> {
        self.property_types.clone()
    }

    fn department_for(&self, city: &str) -> Option<String> {
        self.departments.get(city).cloned()
    }

    fn percentile(&self, column: NumericColumn, p: f64) -> Option<f64> {
        self.sorted_columns
            .get(&column)
            .and_then(|sorted| percentile_of_sorted(sorted, p))
    }

    fn median_for_city(&self, column: NumericColumn, city: &str) -> Option<f64> {
        percentile_of_sorted(&sorted_values(&self.city_rows(city), column), 0.5)
    }

    fn mean_coords_for_city(&self, city: &str) -> MeanCoordinates {
        let rows = self.city_rows(city);
        MeanCoordinates {
            latitude: mean(rows.iter().filter_map(|r| r.value(NumericColumn::Latitude))),
            longitude: mean(rows.iter().filter_map(|r| r.value(NumericColumn::Longitude))),
        }
    }

    fn encoding_universe(&self) -> Option<&[ReferenceRow]> {
        Some(&self.rows)
    }

    fn similar_listing_prices(&self, query: &SimilarityQuery) -> Vec<f64> {
        self.city_rows(&query.city)
            .into_iter()
            .filter(|row| query.matches(&row.city, &row.property_type, row.area))
            .filter_map(|row| row.value(NumericColumn::Price))
            .collect()
    }
}
