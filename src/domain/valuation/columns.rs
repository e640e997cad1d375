//! Column identities shared by the reference dataset, the encoder and the model schema.
//!
//! Names are the headers of the training table; one-hot columns are
//! derived from them as `{column}_{value}`.

use serde::{Deserialize, Serialize};

/// Numeric columns of the reference table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericColumn {
    Area,
    Rooms,
    Bathrooms,
    Latitude,
    Longitude,
    PricePerArea,
    /// Target column. Never part of a feature vector.
    Price,
}

impl NumericColumn {
    /// Numeric model inputs, in training-table order.
    pub const FEATURES: [NumericColumn; 6] = [
        NumericColumn::Area,
        NumericColumn::Rooms,
        NumericColumn::Bathrooms,
        NumericColumn::Latitude,
        NumericColumn::Longitude,
        NumericColumn::PricePerArea,
    ];

    /// Header name in the training table.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Area => "area",
            Self::Rooms => "habitaciones",
            Self::Bathrooms => "banos",
            Self::Latitude => "latitud",
            Self::Longitude => "longitud",
            Self::PricePerArea => "precio_m2",
            Self::Price => "precio",
        }
    }

    pub fn is_feature(&self) -> bool {
        !matches!(self, Self::Price)
    }
}

/// Categorical columns, one-hot encoded before reaching the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoricalColumn {
    City,
    Department,
    PropertyType,
    SizeCategory,
    PriceCategory,
}

impl CategoricalColumn {
    /// Encoded columns, in the order their indicators are emitted.
    pub const ALL: [CategoricalColumn; 5] = [
        CategoricalColumn::City,
        CategoricalColumn::Department,
        CategoricalColumn::PropertyType,
        CategoricalColumn::SizeCategory,
        CategoricalColumn::PriceCategory,
    ];

    /// Header name in the training table.
    pub fn name(&self) -> &'static str {
        match self {
            Self::City => "ciudad",
            Self::Department => "departamento",
            Self::PropertyType => "tipo_propiedad",
            Self::SizeCategory => "categoria_tamano",
            Self::PriceCategory => "categoria_precio",
        }
    }

    /// Name of the indicator column for `value`.
    pub fn indicator_name(&self, value: &str) -> String {
        format!("{}_{}", self.name(), value)
    }
}

/// A row that can be fed to the one-hot encoder.
///
/// Implemented by reference listings and by the profile being valued, so
/// both can sit in the same combined table.
pub trait FeatureRecord {
    /// Value of a numeric feature column, `None` when missing.
    fn numeric(&self, column: NumericColumn) -> Option<f64>;

    /// Value of a categorical column.
    fn categorical(&self, column: CategoricalColumn) -> &str;
}
