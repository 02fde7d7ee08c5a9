//! Ratings for scored tests and model aggregates.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Decimal places kept on a single test rating.
pub const TEST_RATING_PLACES: i32 = 6;
/// Decimal places kept on a model's aggregate rating.
pub const AGGREGATE_RATING_PLACES: i32 = 5;

/// A rating in `-1.0..=1.0`, or the absence of one.
///
/// Serialises as `{"status":"unrated"}` or
/// `{"status":"rated","value":0.75}`.
///
/// # Examples
/// ```
/// use mapscore_core::Rating;
///
/// let rating = Rating::rounded(0.123_456_789, 6);
/// assert_eq!(rating.value(), Some(0.123_457));
/// assert_eq!(Rating::Unrated.to_string(), "unrated");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "status", content = "value", rename_all = "snake_case")
)]
pub enum Rating {
    /// Not yet scored, or nothing to aggregate.
    #[default]
    Unrated,
    /// A numeric rating.
    Rated(f64),
}

impl Rating {
    /// Build a rating rounded half away from zero to `places` decimals.
    #[must_use]
    pub fn rounded(value: f64, places: i32) -> Self {
        Self::Rated(round_to(value, places))
    }

    /// Return the numeric value, if rated.
    #[must_use]
    pub const fn value(self) -> Option<f64> {
        match self {
            Self::Unrated => None,
            Self::Rated(value) => Some(value),
        }
    }

    /// Report whether a numeric rating is present.
    #[must_use]
    pub const fn is_rated(self) -> bool {
        matches!(self, Self::Rated(_))
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unrated => f.write_str("unrated"),
            Self::Rated(value) => write!(f, "{value}"),
        }
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "decimal rounding scales, rounds and unscales"
)]
fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10_f64.powi(places);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.083_333_333, 5, 0.083_33)]
    #[case(-0.899_999_999_999_999, 6, -0.9)]
    #[case(0.75, 6, 0.75)]
    #[case(-1.0, 6, -1.0)]
    fn rounds_to_requested_places(#[case] raw: f64, #[case] places: i32, #[case] expected: f64) {
        assert_eq!(Rating::rounded(raw, places), Rating::Rated(expected));
    }

    #[rstest]
    fn unrated_has_no_value() {
        assert_eq!(Rating::default(), Rating::Unrated);
        assert_eq!(Rating::Unrated.value(), None);
        assert!(!Rating::Unrated.is_rated());
    }

    #[rstest]
    fn displays_numbers_plainly() {
        assert_eq!(Rating::Rated(-0.9).to_string(), "-0.9");
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn serialises_as_tagged_variant() {
        let rated = serde_json::to_string(&Rating::Rated(0.5)).expect("serialise rated");
        assert_eq!(rated, r#"{"status":"rated","value":0.5}"#);
        let unrated = serde_json::to_string(&Rating::Unrated).expect("serialise unrated");
        assert_eq!(unrated, r#"{"status":"unrated"}"#);
        let parsed: Rating = serde_json::from_str(&rated).expect("parse rated");
        assert_eq!(parsed, Rating::Rated(0.5));
    }
}
