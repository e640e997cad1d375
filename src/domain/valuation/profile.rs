//! The property being valued: the draft collected step by step and the
//! completed profile handed to the encoder.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::categories::{PriceCategory, SizeCategory};
use super::columns::{CategoricalColumn, FeatureRecord, NumericColumn};

/// Where the profile's coordinates came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordinateSource {
    /// Typed in by the user.
    UserSupplied,
    /// Averaged from reference listings in the same city, or the national centroid.
    CityAverage,
}

/// A latitude / longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Approximate centroid used when nothing better is known.
    pub const NATIONAL_CENTROID: Self = Self {
        latitude: 4.6,
        longitude: -74.0,
    };

    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// A field was read before the conversation set it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Profile is missing '{0}'")]
pub struct IncompleteProfileError(pub &'static str);

/// Attributes collected so far in the conversation.
///
/// Every field starts empty and is committed exactly once, in step order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileDraft {
    pub area: Option<f64>,
    pub rooms: Option<u32>,
    pub bathrooms: Option<u32>,
    pub city: Option<String>,
    pub department: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub coordinate_source: Option<CoordinateSource>,
    pub property_type: Option<String>,
}

impl ProfileDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when nothing has been committed yet.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Commits both coordinates at once with their origin.
    pub fn set_coordinates(&mut self, coordinates: Coordinates, source: CoordinateSource) {
        self.latitude = Some(coordinates.latitude);
        self.longitude = Some(coordinates.longitude);
        self.coordinate_source = Some(source);
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        Some(Coordinates::new(self.latitude?, self.longitude?))
    }

    /// Returns every user-facing attribute, or the first one still missing.
    pub fn collected(&self) -> Result<CollectedAttributes, IncompleteProfileError> {
        Ok(CollectedAttributes {
            area: self.area.ok_or(IncompleteProfileError("area"))?,
            rooms: self.rooms.ok_or(IncompleteProfileError("rooms"))?,
            bathrooms: self.bathrooms.ok_or(IncompleteProfileError("bathrooms"))?,
            city: self.city.clone().ok_or(IncompleteProfileError("city"))?,
            department: self
                .department
                .clone()
                .ok_or(IncompleteProfileError("department"))?,
            coordinates: self
                .coordinates()
                .ok_or(IncompleteProfileError("coordinates"))?,
            property_type: self
                .property_type
                .clone()
                .ok_or(IncompleteProfileError("property_type"))?,
        })
    }
}

/// Everything the user was asked for, all present.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectedAttributes {
    pub area: f64,
    pub rooms: u32,
    pub bathrooms: u32,
    pub city: String,
    pub department: String,
    pub coordinates: Coordinates,
    pub property_type: String,
}

/// A complete profile: collected attributes plus derived features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyProfile {
    pub area: f64,
    pub rooms: u32,
    pub bathrooms: u32,
    pub city: String,
    pub department: String,
    pub latitude: f64,
    pub longitude: f64,
    pub property_type: String,
    pub size_category: SizeCategory,
    pub price_category: PriceCategory,
    pub price_per_area: f64,
}

impl FeatureRecord for PropertyProfile {
    fn numeric(&self, column: NumericColumn) -> Option<f64> {
        match column {
            NumericColumn::Area => Some(self.area),
            NumericColumn::Rooms => Some(f64::from(self.rooms)),
            NumericColumn::Bathrooms => Some(f64::from(self.bathrooms)),
            NumericColumn::Latitude => Some(self.latitude),
            NumericColumn::Longitude => Some(self.longitude),
            NumericColumn::PricePerArea => Some(self.price_per_area),
            NumericColumn::Price => None,
        }
    }

    fn categorical(&self, column: CategoricalColumn) -> &str {
        match column {
            CategoricalColumn::City => &self.city,
            CategoricalColumn::Department => &self.department,
            CategoricalColumn::PropertyType => &self.property_type,
            CategoricalColumn::SizeCategory => self.size_category.label(),
            CategoricalColumn::PriceCategory => self.price_category.label(),
        }
    }
}
