//! Valuation module - the pipeline from user answers to an estimated price.
//!
//! Leaves first:
//!
//! - `validator` - per-field parsing and range checks
//! - `resolver` - fuzzy or indexed lookup of cities and property types
//! - `derived` - features computed from reference statistics
//! - `encoder` - one-hot encoding aligned to the model schema
//! - `prediction` / `comparison` - model invocation and market comparison

mod categories;
mod columns;
mod comparison;
mod derived;
mod encoder;
mod listing;
mod prediction;
mod profile;
pub mod resolver;
pub mod validator;

pub use categories::{
    classify_size, PriceCategory, PriceCutPoints, SizeCategory, LARGE_AREA_LIMIT,
    MEDIUM_AREA_LIMIT, SMALL_AREA_LIMIT,
};
pub use columns::{CategoricalColumn, FeatureRecord, NumericColumn};
pub use comparison::{
    MarketComparison, MarketPosition, SimilarityQuery, MAX_AREA_RATIO, MIN_AREA_RATIO,
    NORMAL_RANGE_PERCENT,
};
pub use derived::{DerivedFeatureCalculator, DEFAULT_PRICE_PER_AREA, UNKNOWN_DEPARTMENT};
pub use encoder::{
    align_to_schema, encode_table, AlignmentReport, EncodedFeatureVector, EncodedRow,
    FeatureEncoder, OneHotEncoder,
};
pub use listing::ReferenceRow;
pub use prediction::{PredictionService, Valuation};
pub use profile::{
    CollectedAttributes, CoordinateSource, Coordinates, IncompleteProfileError, ProfileDraft,
    PropertyProfile,
};
pub use resolver::{CategoryResolver, ResolutionError};
pub use validator::Bounds;
