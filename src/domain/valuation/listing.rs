//! A historical transaction from the reference dataset.

use serde::{Deserialize, Serialize};

use super::columns::{CategoricalColumn, FeatureRecord, NumericColumn};

/// One row of the reference dataset.
///
/// Field names on the wire are the Spanish training-table headers.
/// Coordinates and price-per-area may be blank in the source file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRow {
    pub area: f64,
    #[serde(rename = "habitaciones")]
    pub rooms: f64,
    #[serde(rename = "banos")]
    pub bathrooms: f64,
    #[serde(rename = "latitud", default)]
    pub latitude: Option<f64>,
    #[serde(rename = "longitud", default)]
    pub longitude: Option<f64>,
    #[serde(rename = "precio_m2", default)]
    pub price_per_area: Option<f64>,
    #[serde(rename = "ciudad")]
    pub city: String,
    #[serde(rename = "departamento")]
    pub department: String,
    #[serde(rename = "tipo_propiedad")]
    pub property_type: String,
    #[serde(rename = "categoria_tamano")]
    pub size_category: String,
    #[serde(rename = "categoria_precio")]
    pub price_category: String,
    #[serde(rename = "precio")]
    pub price: f64,
}

impl ReferenceRow {
    /// Value of any numeric column, including the price target.
    pub fn value(&self, column: NumericColumn) -> Option<f64> {
        match column {
            NumericColumn::Area => Some(self.area),
            NumericColumn::Rooms => Some(self.rooms),
            NumericColumn::Bathrooms => Some(self.bathrooms),
            NumericColumn::Latitude => self.latitude,
            NumericColumn::Longitude => self.longitude,
            NumericColumn::PricePerArea => self.price_per_area,
            NumericColumn::Price => Some(self.price),
        }
        .filter(|v| v.is_finite())
    }
}

impl FeatureRecord for ReferenceRow {
    fn numeric(&self, column: NumericColumn) -> Option<f64> {
        if column.is_feature() {
            self.value(column)
        } else {
            None
        }
    }

    fn categorical(&self, column: CategoricalColumn) -> &str {
        match column {
            CategoricalColumn::City => &self.city,
            CategoricalColumn::Department => &self.department,
            CategoricalColumn::PropertyType => &self.property_type,
            CategoricalColumn::SizeCategory => &self.size_category,
            CategoricalColumn::PriceCategory => &self.price_category,
        }
    }
}
