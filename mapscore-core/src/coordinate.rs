//! Parsing and validating WGS84 positions.
//!
//! Positions use [`geo::Coord`] with `x = longitude` and `y = latitude`, in
//! decimal degrees.

use geo::Coord;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::GridError;

const LATITUDE_LIMIT: f64 = 90.0;
const LONGITUDE_LIMIT: f64 = 180.0;

/// A degree value as supplied by an external record: either text (the
/// historic storage format) or a number.
///
/// # Examples
/// ```
/// use mapscore_core::DegreeInput;
///
/// let text = DegreeInput::from("43.25");
/// assert_eq!(text.parse("lat").expect("numeric text"), 43.25);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum DegreeInput {
    /// Already numeric.
    Number(f64),
    /// Decimal text, surrounding whitespace ignored.
    Text(String),
}

impl DegreeInput {
    /// Interpret the input as a finite number of degrees.
    ///
    /// # Errors
    /// Returns [`GridError::Parse`] for non-numeric text and
    /// [`GridError::NonFinite`] for NaN or infinite values.
    pub fn parse(&self, field: &'static str) -> Result<f64, GridError> {
        let value = match self {
            Self::Number(value) => *value,
            Self::Text(raw) => {
                raw.trim()
                    .parse::<f64>()
                    .map_err(|source| GridError::Parse {
                        field,
                        raw: raw.clone(),
                        source,
                    })?
            }
        };
        if value.is_finite() {
            Ok(value)
        } else {
            Err(GridError::NonFinite { field, value })
        }
    }
}

impl From<f64> for DegreeInput {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for DegreeInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for DegreeInput {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Parse a latitude/longitude pair into a validated position.
///
/// `fields` holds the (latitude, longitude) names used in error messages.
///
/// # Errors
/// Returns [`GridError::Parse`] for non-numeric input,
/// [`GridError::NonFinite`] for NaN or infinities and
/// [`GridError::OutOfRange`] for values outside `-90..=90` latitude or
/// `-180..=180` longitude.
pub fn parse_position(
    latitude: &DegreeInput,
    longitude: &DegreeInput,
    fields: (&'static str, &'static str),
) -> Result<Coord<f64>, GridError> {
    let (lat_field, lon_field) = fields;
    let lat = latitude.parse(lat_field)?;
    let lon = longitude.parse(lon_field)?;
    validate_position(Coord { x: lon, y: lat }, fields)
}

/// Check that a position lies on the globe.
///
/// # Errors
/// Returns [`GridError::NonFinite`] or [`GridError::OutOfRange`] naming the
/// first offending axis.
pub fn validate_position(
    position: Coord<f64>,
    fields: (&'static str, &'static str),
) -> Result<Coord<f64>, GridError> {
    let (lat_field, lon_field) = fields;
    check_range(lat_field, position.y, LATITUDE_LIMIT)?;
    check_range(lon_field, position.x, LONGITUDE_LIMIT)?;
    Ok(position)
}

fn check_range(field: &'static str, value: f64, limit: f64) -> Result<(), GridError> {
    if !value.is_finite() {
        return Err(GridError::NonFinite { field, value });
    }
    if (-limit..=limit).contains(&value) {
        Ok(())
    } else {
        Err(GridError::OutOfRange {
            field,
            value,
            min: -limit,
            max: limit,
        })
    }
}
