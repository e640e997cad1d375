//! One-hot encoding aligned to the model's trained schema.
//!
//! Encoding a single profile on its own only yields indicator columns for
//! the categories present in that profile, a strict subset of the columns
//! the model was trained on. Encoding therefore runs in two phases:
//!
//! 1. **Encode broad.** Fit the category vocabulary over the reference
//!    listings with the profile appended as the last row, then transform
//!    that last row. This is exactly the last row of one-hot encoding the
//!    combined table, so every category ever seen in the reference data
//!    gets a column.
//! 2. **Project.** [`align_to_schema`] zero-fills every expected feature the
//!    encoded row lacks, drops the ones the model does not use, and orders
//!    the result as the model expects.
//!
//! Without reference listings the vocabulary is fit on the profile alone;
//! projection still guarantees the schema, but categories only the universe
//! would have revealed end up as zero columns.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use tracing::debug;

use super::columns::{CategoricalColumn, FeatureRecord, NumericColumn};
use super::listing::ReferenceRow;
use super::profile::PropertyProfile;

/// One encoded row: column names with values, in encoding order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EncodedRow {
    columns: Vec<(String, f64)>,
}

impl EncodedRow {
    pub fn columns(&self) -> &[(String, f64)] {
        &self.columns
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.columns
            .iter()
            .find(|(column, _)| column == name)
            .map(|(_, value)| *value)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Feature vector ready for the model, ordered as its schema.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EncodedFeatureVector {
    names: Vec<String>,
    values: Vec<f64>,
}

impl EncodedFeatureVector {
    /// Pairs names with values as given; models check the shape on use.
    pub fn new(names: Vec<String>, values: Vec<f64>) -> Self {
        Self { names, values }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| self.values[i])
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// What projection had to change to fit the schema.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AlignmentReport {
    /// Expected features absent from the encoded row, filled with 0.
    pub zero_filled: Vec<String>,
    /// Encoded columns the model does not use.
    pub dropped: Vec<String>,
}

/// Category vocabulary fitted over a table.
///
/// Values per column are kept sorted, so the indicator order is stable
/// regardless of row order. Blank values are treated as missing and get no
/// indicator.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OneHotEncoder {
    vocabulary: BTreeMap<CategoricalColumn, BTreeSet<String>>,
}

impl OneHotEncoder {
    /// Collects every category value present in `records`.
    pub fn fit<'a>(records: impl IntoIterator<Item = &'a dyn FeatureRecord>) -> Self {
        let mut vocabulary: BTreeMap<CategoricalColumn, BTreeSet<String>> = CategoricalColumn::ALL
            .iter()
            .map(|column| (*column, BTreeSet::new()))
            .collect();

        for record in records {
            for column in CategoricalColumn::ALL {
                let value = record.categorical(column);
                if !value.is_empty() {
                    if let Some(values) = vocabulary.get_mut(&column) {
                        if !values.contains(value) {
                            values.insert(value.to_string());
                        }
                    }
                }
            }
        }

        Self { vocabulary }
    }

    /// Distinct values seen for a column.
    pub fn categories(&self, column: CategoricalColumn) -> impl Iterator<Item = &str> {
        self.vocabulary
            .get(&column)
            .into_iter()
            .flat_map(|values| values.iter().map(String::as_str))
    }

    /// All output column names: numeric features, then indicators per categorical column.
    pub fn column_names(&self) -> Vec<String> {
        let mut names: Vec<String> = NumericColumn::FEATURES
            .iter()
            .map(|column| column.name().to_string())
            .collect();
        for column in CategoricalColumn::ALL {
            names.extend(self.categories(column).map(|value| column.indicator_name(value)));
        }
        names
    }

    /// Encodes one record against the fitted vocabulary.
    ///
    /// Missing numeric values become `NaN`; a category outside the
    /// vocabulary sets no indicator.
    pub fn transform(&self, record: &dyn FeatureRecord) -> EncodedRow {
        let mut columns: Vec<(String, f64)> = NumericColumn::FEATURES
            .iter()
            .map(|column| {
                (
                    column.name().to_string(),
                    record.numeric(*column).unwrap_or(f64::NAN),
                )
            })
            .collect();

        for column in CategoricalColumn::ALL {
            let present = record.categorical(column);
            for value in self.categories(column) {
                let indicator = if value == present { 1.0 } else { 0.0 };
                columns.push((column.indicator_name(value), indicator));
            }
        }

        EncodedRow { columns }
    }
}

/// One-hot encodes a whole table, every row against the same vocabulary.
pub fn encode_table(records: &[&dyn FeatureRecord]) -> Vec<EncodedRow> {
    let encoder = OneHotEncoder::fit(records.iter().copied());
    records
        .iter()
        .map(|record| encoder.transform(*record))
        .collect()
}

/// Projects an encoded row onto the model schema.
///
/// The output has exactly the `expected` columns, in that order; expected
/// columns the row lacks are 0, columns the model does not use are dropped.
pub fn align_to_schema(
    row: &EncodedRow,
    expected: &[String],
) -> (EncodedFeatureVector, AlignmentReport) {
    let available: HashMap<&str, f64> = row
        .columns
        .iter()
        .map(|(name, value)| (name.as_str(), *value))
        .collect();

    let mut report = AlignmentReport::default();
    let values = expected
        .iter()
        .map(|name| match available.get(name.as_str()) {
            Some(value) => *value,
            None => {
                report.zero_filled.push(name.clone());
                0.0
            }
        })
        .collect();

    let wanted: BTreeSet<&str> = expected.iter().map(String::as_str).collect();
    report.dropped = row
        .names()
        .filter(|name| !wanted.contains(name))
        .map(str::to_string)
        .collect();

    (
        EncodedFeatureVector {
            names: expected.to_vec(),
            values,
        },
        report,
    )
}

/// Builds model-ready feature vectors for completed profiles.
#[derive(Debug, Clone, Default)]
pub struct FeatureEncoder;

impl FeatureEncoder {
    pub fn new() -> Self {
        Self
    }

    /// Encodes `profile` against the universe (if any) and projects it onto `expected`.
    pub fn encode(
        &self,
        profile: &PropertyProfile,
        universe: Option<&[ReferenceRow]>,
        expected: &[String],
    ) -> EncodedFeatureVector {
        let encoder = match universe {
            Some(rows) if !rows.is_empty() => OneHotEncoder::fit(
                rows.iter()
                    .map(|row| row as &dyn FeatureRecord)
                    .chain(std::iter::once(profile as &dyn FeatureRecord)),
            ),
            _ => {
                debug!("No reference universe, encoding the profile alone");
                OneHotEncoder::fit(std::iter::once(profile as &dyn FeatureRecord))
            }
        };

        let encoded = encoder.transform(profile);
        let (vector, report) = align_to_schema(&encoded, expected);
        debug!(
            encoded_columns = encoded.len(),
            expected_features = expected.len(),
            zero_filled = report.zero_filled.len(),
            dropped = report.dropped.len(),
            "Aligned feature vector with model schema"
        );
        vector
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::valuation::listing::fixtures::listing;
    use crate::domain::valuation::profile::fixtures::profile;
    use proptest::prelude::*;

    fn universe() -> Vec<ReferenceRow> {
        vec![
            listing("Cali", "Valle del Cauca", "Casa", 120.0, 300_000_000.0),
            listing("Medellín", "Antioquia", "Apartamento", 80.0, 320_000_000.0),
            listing("Bogotá D.C", "Cundinamarca", "Apartamento", 60.0, 280_000_000.0),
        ]
    }

    fn schema(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    mod one_hot {
        use super::*;

        #[test]
        fn vocabulary_is_sorted_and_deduplicated() {
            let rows = universe();
            let records: Vec<&dyn FeatureRecord> =
                rows.iter().map(|r| r as &dyn FeatureRecord).collect();
            let encoder = OneHotEncoder::fit(records);
            let cities: Vec<_> = encoder.categories(CategoricalColumn::City).collect();
            assert_eq!(cities, vec!["Bogotá D.C", "Cali", "Medellín"]);
            let kinds: Vec<_> = encoder.categories(CategoricalColumn::PropertyType).collect();
            assert_eq!(kinds, vec!["Apartamento", "Casa"]);
        }

        #[test]
        fn transform_sets_exactly_one_indicator_per_column() {
            let rows = universe();
            let profile = profile();
            let encoder = OneHotEncoder::fit(
                rows.iter()
                    .map(|r| r as &dyn FeatureRecord)
                    .chain(std::iter::once(&profile as &dyn FeatureRecord)),
            );
            let encoded = encoder.transform(&profile);

            assert_eq!(encoded.get("ciudad_Medellín"), Some(1.0));
            assert_eq!(encoded.get("ciudad_Cali"), Some(0.0));
            assert_eq!(encoded.get("tipo_propiedad_Apartamento"), Some(1.0));
            assert_eq!(encoded.get("area"), Some(85.0));
            for column in CategoricalColumn::ALL {
                let prefix = format!("{}_", column.name());
                let hot: f64 = encoded
                    .columns()
                    .iter()
                    .filter(|(name, _)| name.starts_with(&prefix))
                    .map(|(_, v)| v)
                    .sum();
                assert_eq!(hot, 1.0, "column {}", column.name());
            }
        }

        #[test]
        fn encoding_last_row_matches_encoding_whole_table() {
            let rows = universe();
            let profile = profile();
            let mut table: Vec<&dyn FeatureRecord> =
                rows.iter().map(|r| r as &dyn FeatureRecord).collect();
            table.push(&profile);

            let whole = encode_table(&table);
            let last = whole.last().unwrap().clone();
            let direct = OneHotEncoder::fit(table.iter().copied()).transform(&profile);
            assert_eq!(last, direct);
            assert_eq!(whole.len(), 4);
            assert!(whole.iter().all(|row| row.len() == last.len()));
        }

        #[test]
        fn blank_categories_get_no_indicator() {
            let mut row = listing("Cali", "", "Casa", 100.0, 1.0);
            row.size_category = String::new();
            let encoder = OneHotEncoder::fit(std::iter::once(&row as &dyn FeatureRecord));
            assert_eq!(encoder.categories(CategoricalColumn::Department).count(), 0);
            assert!(!encoder.column_names().iter().any(|n| n == "departamento_"));
        }

        #[test]
        fn missing_numeric_values_encode_as_nan() {
            let mut row = listing("Cali", "Valle del Cauca", "Casa", 100.0, 1.0);
            row.latitude = None;
            let encoded =
                OneHotEncoder::fit(std::iter::once(&row as &dyn FeatureRecord)).transform(&row);
            assert!(encoded.get("latitud").unwrap().is_nan());
        }
    }

    mod alignment {
        use super::*;

        #[test]
        fn zero_fills_missing_and_drops_extra_columns() {
            let row = EncodedRow {
                columns: vec![
                    ("area".to_string(), 85.0),
                    ("ciudad_Cali".to_string(), 1.0),
                    ("unused".to_string(), 7.0),
                ],
            };
            let expected = schema(&["ciudad_Pasto", "area", "ciudad_Cali"]);
            let (vector, report) = align_to_schema(&row, &expected);

            assert_eq!(vector.names(), expected.as_slice());
            assert_eq!(vector.values(), &[0.0, 85.0, 1.0]);
            assert_eq!(report.zero_filled, vec!["ciudad_Pasto".to_string()]);
            assert_eq!(report.dropped, vec!["unused".to_string()]);
        }

        #[test]
        fn empty_schema_yields_empty_vector() {
            let (vector, _) = align_to_schema(&EncodedRow::default(), &[]);
            assert!(vector.is_empty());
        }
    }

    mod feature_encoder {
        use super::*;

        #[test]
        fn universe_reveals_categories_absent_from_the_profile() {
            let expected = schema(&["area", "ciudad_Cali", "ciudad_Medellín", "precio_m2"]);
            let vector = FeatureEncoder::new().encode(&profile(), Some(universe().as_slice()), &expected);
            assert_eq!(vector.get("ciudad_Cali"), Some(0.0));
            assert_eq!(vector.get("ciudad_Medellín"), Some(1.0));
            assert_eq!(vector.get("precio_m2"), Some(4_000_000.0));
        }

        #[test]
        fn without_universe_still_matches_schema() {
            let expected = schema(&["ciudad_Cali", "ciudad_Medellín", "habitaciones"]);
            let vector = FeatureEncoder::new().encode(&profile(), None, &expected);
            assert_eq!(vector.names(), expected.as_slice());
            assert_eq!(vector.values(), &[0.0, 1.0, 3.0]);
        }

        #[test]
        fn empty_universe_behaves_like_no_universe() {
            let expected = schema(&["ciudad_Medellín", "banos"]);
            let empty: Vec<ReferenceRow> = Vec::new();
            let with_empty =
                FeatureEncoder::new().encode(&profile(), Some(empty.as_slice()), &expected);
            let without = FeatureEncoder::new().encode(&profile(), None, &expected);
            assert_eq!(with_empty, without);
        }
    }

    proptest! {
        #[test]
        fn output_columns_always_equal_the_schema(
            city in prop::sample::select(vec!["Cali", "Medellín", "Pasto", "Bogotá D.C"]),
            kind in prop::sample::select(vec!["Casa", "Apartamento", "Finca"]),
            area in 10.0f64..2000.0,
            extra in prop::collection::vec("[a-z_]{1,12}", 0..6),
            use_universe in any::<bool>(),
        ) {
            let mut p = profile();
            p.city = city.to_string();
            p.property_type = kind.to_string();
            p.area = area;

            let mut expected = schema(&["area", "ciudad_Cali", "tipo_propiedad_Casa", "categoria_precio_Alta"]);
            for name in extra {
                if !expected.contains(&name) {
                    expected.push(name);
                }
            }

            let rows = universe();
            let universe = if use_universe { Some(rows.as_slice()) } else { None };
            let vector = FeatureEncoder::new().encode(&p, universe, &expected);
            prop_assert_eq!(vector.names(), expected.as_slice());
            prop_assert_eq!(vector.len(), expected.len());
        }
    }
}
