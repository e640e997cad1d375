//! Per-field parsing and range checks for user answers.
//!
//! Pure functions: a line of text in, a typed value or a
//! [`ValidationError`] out. Nothing here touches conversation state.

use crate::domain::foundation::ValidationError;

/// Inclusive numeric interval accepted for a field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Total area in m².
pub const AREA_BOUNDS: Bounds = Bounds::new(10.0, 2000.0);
pub const ROOMS_BOUNDS: Bounds = Bounds::new(0.0, 20.0);
pub const BATHROOMS_BOUNDS: Bounds = Bounds::new(0.0, 10.0);
/// Latitude span of Colombian territory.
pub const LATITUDE_BOUNDS: Bounds = Bounds::new(-4.3, 13.5);
/// Longitude span of Colombian territory.
pub const LONGITUDE_BOUNDS: Bounds = Bounds::new(-79.0, -66.8);

const AFFIRMATIVE: [&str; 5] = ["si", "sí", "s", "yes", "y"];
const NEGATIVE: [&str; 4] = ["no", "n", "nop", "nope"];

/// Parses a real number, accepting either `,` or `.` as decimal separator.
fn parse_real(field: &str, input: &str) -> Result<f64, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::parse(field, input, "empty answer"));
    }

    let value: f64 = trimmed
        .replace(',', ".")
        .parse()
        .map_err(|_| ValidationError::parse(field, input, "not a number"))?;

    if !value.is_finite() {
        return Err(ValidationError::parse(field, input, "not a finite number"));
    }
    Ok(value)
}

fn check(field: &str, value: f64, bounds: Bounds) -> Result<f64, ValidationError> {
    if bounds.contains(value) {
        Ok(value)
    } else {
        Err(ValidationError::range(field, bounds.min, bounds.max, value))
    }
}

/// Parses a count; a real-valued answer is truncated toward zero first.
fn parse_count(field: &str, input: &str, bounds: Bounds) -> Result<u32, ValidationError> {
    let value = parse_real(field, input)?.trunc();
    let value = check(field, value, bounds)?;
    // Bounds are non-negative and small, so the cast is exact.
    Ok(value as u32)
}

pub fn parse_area(input: &str) -> Result<f64, ValidationError> {
    check("area", parse_real("area", input)?, AREA_BOUNDS)
}

pub fn parse_rooms(input: &str) -> Result<u32, ValidationError> {
    parse_count("rooms", input, ROOMS_BOUNDS)
}

pub fn parse_bathrooms(input: &str) -> Result<u32, ValidationError> {
    parse_count("bathrooms", input, BATHROOMS_BOUNDS)
}

pub fn parse_latitude(input: &str) -> Result<f64, ValidationError> {
    check("latitude", parse_real("latitude", input)?, LATITUDE_BOUNDS)
}

pub fn parse_longitude(input: &str) -> Result<f64, ValidationError> {
    check("longitude", parse_real("longitude", input)?, LONGITUDE_BOUNDS)
}

/// Matches a yes/no answer, case-insensitively.
pub fn parse_yes_no(field: &str, input: &str) -> Result<bool, ValidationError> {
    let answer = input.trim().to_lowercase();
    if AFFIRMATIVE.contains(&answer.as_str()) {
        Ok(true)
    } else if NEGATIVE.contains(&answer.as_str()) {
        Ok(false)
    } else {
        Err(ValidationError::parse(field, input, "expected yes or no"))
    }
}
