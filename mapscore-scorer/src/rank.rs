//! Rank-based rating of a find cell against a probability field.
//!
//! A field is rated by where the find cell's value ranks among every cell.
//! With `N` cells, `n` cells strictly above the find cell's value and `m`
//! cells equal to it (the find cell included), the rank fraction is
//! `r = (n + m/2) / N` and the rating is `(0.5 - r) / 0.5`. The best possible
//! field scores close to `1`, a uniform field scores `0` and the worst
//! scores close to `-1`.
//!
//! Finds outside the grid are rated from the probability mass the field
//! leaves outside the box: `p = 1 - Σ field`, with `r = 1 - p`. A residual
//! outside `[0, 1]` is replaced by [`DEFAULT_OUTSIDE_FALLBACK`].

use log::{debug, warn};
use mapscore_core::{GridCell, Rating, SearchCase, TEST_RATING_PLACES};
use serde::{Deserialize, Serialize};

use crate::{ProbabilityField, ScoreError};

/// Residual probability assumed when an out-of-box find meets a field whose
/// mass is not a probability.
pub const DEFAULT_OUTSIDE_FALLBACK: f64 = 0.05;

/// How a find cell addresses the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellIndexing {
    /// `row = y`, `column = x`, matching image pixel order.
    #[default]
    RowMajor,
    /// `row = x`, `column = y`. Reproduces scores stored by earlier
    /// releases, which read the field transposed.
    Transposed,
}

/// Tunable knobs for [`rank_rating`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringOptions {
    /// Field addressing.
    pub indexing: CellIndexing,
    /// Residual used when `1 - Σ field` falls outside `[0, 1]`.
    pub outside_fallback: f64,
}

impl Default for ScoringOptions {
    fn default() -> Self {
        Self {
            indexing: CellIndexing::RowMajor,
            outside_fallback: DEFAULT_OUTSIDE_FALLBACK,
        }
    }
}

/// Rate `cell` against a `side × side` field.
///
/// The result is rounded to [`TEST_RATING_PLACES`] decimals.
///
/// # Errors
/// Returns [`ScoreError::Shape`] when the field is not `side × side`.
///
/// # Examples
/// ```
/// use mapscore_core::{GridCell, Rating};
/// use mapscore_scorer::{ProbabilityField, ScoringOptions, rank_rating};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let field = ProbabilityField::from_rows(vec![vec![0.1, 0.1], vec![0.1, 0.7]])?;
/// let best = GridCell { x: 1, y: 1 };
/// let rating = rank_rating(&field, best, 2, &ScoringOptions::default())?;
/// assert_eq!(rating, Rating::Rated(0.75));
/// # Ok(())
/// # }
/// ```
pub fn rank_rating(
    field: &ProbabilityField,
    cell: GridCell,
    side: u64,
    options: &ScoringOptions,
) -> Result<Rating, ScoreError> {
    let shape_error = || ScoreError::Shape {
        side,
        width: field.width(),
        height: field.height(),
    };
    let side_cells = usize::try_from(side).map_err(|_| shape_error())?;
    if !field.is_square_of(side_cells) {
        return Err(shape_error());
    }

    let rank = match cell.within(side_cells) {
        Some((x, y)) => {
            let (row, column) = match options.indexing {
                CellIndexing::RowMajor => (y, x),
                CellIndexing::Transposed => (x, y),
            };
            let value = field.get(row, column).ok_or_else(shape_error)?;
            inside_rank(field, value)
        }
        None => outside_rank(field.sum(), options.outside_fallback),
    };
    let rating = Rating::rounded(rating_from_rank(rank), TEST_RATING_PLACES);
    debug!("rated cell ({}, {}) on a {side}-cell grid: {rating}", cell.x, cell.y);
    Ok(rating)
}

/// Rate the find cell of `case` against `field`.
///
/// # Errors
/// Returns [`ScoreError::Shape`] when the field does not match the case's
/// grid.
pub fn score_case(
    field: &ProbabilityField,
    case: &SearchCase,
    options: &ScoringOptions,
) -> Result<Rating, ScoreError> {
    rank_rating(field, case.find_cell(), case.grid().side_cell_count(), options)
}

#[expect(
    clippy::float_arithmetic,
    reason = "rank fraction is a ratio of cell counts"
)]
#[expect(
    clippy::cast_precision_loss,
    reason = "cell counts stay far below 2^52"
)]
#[expect(clippy::float_cmp, reason = "ties are exact equality")]
fn inside_rank(field: &ProbabilityField, value: f64) -> f64 {
    let (above, equal) = field
        .values()
        .fold((0_u64, 0_u64), |(above, equal), other| {
            if other > value {
                (above + 1, equal)
            } else if other == value {
                (above, equal + 1)
            } else {
                (above, equal)
            }
        });
    let total = field.cell_count() as f64;
    (above as f64 + equal as f64 / 2.0) / total
}

#[expect(
    clippy::float_arithmetic,
    reason = "residual mass is one minus the field total"
)]
fn outside_rank(total: f64, fallback: f64) -> f64 {
    let residual = 1.0 - total;
    let clamped = if (0.0..=1.0).contains(&residual) {
        residual
    } else {
        warn!(
            "field total {total} leaves residual {residual} outside the box; using {fallback}"
        );
        fallback
    };
    1.0 - clamped
}

#[expect(
    clippy::float_arithmetic,
    reason = "rating rescales the rank fraction to [-1, 1]"
)]
fn rating_from_rank(rank: f64) -> f64 {
    (0.5 - rank) / 0.5
}
