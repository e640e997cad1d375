//! Size and price buckets derived from area and provisional price.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Area threshold below which a property is `Small` (m²).
pub const SMALL_AREA_LIMIT: f64 = 60.0;
/// Area threshold below which a property is `Medium` (m²).
pub const MEDIUM_AREA_LIMIT: f64 = 120.0;
/// Area threshold below which a property is `Large` (m²).
pub const LARGE_AREA_LIMIT: f64 = 200.0;

/// Size bucket of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SizeCategory {
    #[serde(rename = "Pequeña")]
    Small,
    #[serde(rename = "Mediana")]
    Medium,
    #[serde(rename = "Grande")]
    Large,
    #[serde(rename = "Muy Grande")]
    VeryLarge,
}

impl SizeCategory {
    /// Buckets an area using `area < threshold` comparisons.
    pub fn classify(area: f64) -> Self {
        if area < SMALL_AREA_LIMIT {
            Self::Small
        } else if area < MEDIUM_AREA_LIMIT {
            Self::Medium
        } else if area < LARGE_AREA_LIMIT {
            Self::Large
        } else {
            Self::VeryLarge
        }
    }

    /// Label used in the reference dataset and in one-hot column names.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Small => "Pequeña",
            Self::Medium => "Mediana",
            Self::Large => "Grande",
            Self::VeryLarge => "Muy Grande",
        }
    }
}

impl fmt::Display for SizeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Shorthand for [`SizeCategory::classify`].
pub fn classify_size(area: f64) -> SizeCategory {
    SizeCategory::classify(area)
}

/// Price tier of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PriceCategory {
    #[serde(rename = "Económica")]
    Economic,
    #[serde(rename = "Media")]
    Medium,
    #[serde(rename = "Alta")]
    High,
    #[serde(rename = "Premium")]
    Premium,
}

impl PriceCategory {
    /// Label used in the reference dataset and in one-hot column names.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Economic => "Económica",
            Self::Medium => "Media",
            Self::High => "Alta",
            Self::Premium => "Premium",
        }
    }
}

impl fmt::Display for PriceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Three ascending cut points splitting prices into four tiers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceCutPoints {
    pub lower: f64,
    pub middle: f64,
    pub upper: f64,
}

impl PriceCutPoints {
    /// Absolute cut points used when no reference dataset is loaded.
    pub const FALLBACK: Self = Self {
        lower: 200_000_000.0,
        middle: 350_000_000.0,
        upper: 600_000_000.0,
    };

    pub fn new(lower: f64, middle: f64, upper: f64) -> Self {
        Self {
            lower,
            middle,
            upper,
        }
    }

    /// Buckets a provisional price with strict less-than comparisons.
    pub fn classify(&self, price: f64) -> PriceCategory {
        if price < self.lower {
            PriceCategory::Economic
        } else if price < self.middle {
            PriceCategory::Medium
        } else if price < self.upper {
            PriceCategory::High
        } else {
            PriceCategory::Premium
        }
    }
}
