//! Bounding box and cell lattice laid out around a last-known position.
//!
//! The grid is square in cell units: `side_cell_count` cells across and
//! down, with the last-known point on the centre cell. Because a degree of
//! longitude shrinks away from the equator, the box is wider in degrees of
//! longitude than it is tall in degrees of latitude.
//!
//! Cell coordinates put `(0, 0)` at the upper-left corner, with `x` growing
//! east and `y` growing south (screen order).

use geo::Coord;
use log::debug;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geodesy::{latitude_step, longitude_step};
use crate::{GridConfig, GridError};

const LAST_FIELDS: (&str, &str) = ("last_lat", "last_lon");

/// Angular size of one grid cell, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GridSteps {
    /// Degrees of latitude per cell (the vertical step).
    pub latitude: f64,
    /// Degrees of longitude per cell (the horizontal step).
    pub longitude: f64,
}

/// Outer edges of the grid in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoundingBox {
    /// Northern edge latitude.
    pub top: f64,
    /// Southern edge latitude.
    pub bottom: f64,
    /// Western edge longitude.
    pub left: f64,
    /// Eastern edge longitude.
    pub right: f64,
}

/// The four corners of a [`BoundingBox`] as (`x = lon`, `y = lat`) pairs.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Corners {
    /// North-west corner.
    pub upper_left: Coord<f64>,
    /// North-east corner.
    pub upper_right: Coord<f64>,
    /// South-west corner.
    pub lower_left: Coord<f64>,
    /// South-east corner.
    pub lower_right: Coord<f64>,
}

impl BoundingBox {
    /// Return the four corners.
    #[must_use]
    pub const fn corners(&self) -> Corners {
        Corners {
            upper_left: Coord {
                x: self.left,
                y: self.top,
            },
            upper_right: Coord {
                x: self.right,
                y: self.top,
            },
            lower_left: Coord {
                x: self.left,
                y: self.bottom,
            },
            lower_right: Coord {
                x: self.right,
                y: self.bottom,
            },
        }
    }
}

/// Integer cell coordinates, possibly outside the grid.
///
/// # Examples
/// ```
/// use mapscore_core::GridCell;
///
/// let cell = GridCell { x: 2, y: 4 };
/// assert_eq!(cell.within(5), Some((2, 4)));
/// assert_eq!(GridCell { x: -1, y: 0 }.within(5), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GridCell {
    /// Column, counted east from the western edge.
    pub x: i64,
    /// Row, counted south from the northern edge.
    pub y: i64,
}

impl GridCell {
    /// Return `(x, y)` as indices when the cell lies inside a grid with
    /// `side` cells per side.
    #[must_use]
    pub fn within(self, side: usize) -> Option<(usize, usize)> {
        let x = usize::try_from(self.x).ok()?;
        let y = usize::try_from(self.y).ok()?;
        (x < side && y < side).then_some((x, y))
    }
}

/// The grid derived for one search case.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use mapscore_core::{CaseGrid, GridCell, GridConfig};
///
/// # fn main() -> Result<(), mapscore_core::GridError> {
/// let centre = Coord { x: -110.5, y: 44.0 };
/// let grid = CaseGrid::build(centre, GridConfig::default())?;
/// assert_eq!(grid.side_cell_count(), 5001);
/// assert_eq!(grid.cell_for(centre), GridCell { x: 2500, y: 2500 });
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CaseGrid {
    centre: Coord<f64>,
    config: GridConfig,
    steps: GridSteps,
    bounds: BoundingBox,
}

impl CaseGrid {
    /// Lay out the grid centred on `centre`.
    ///
    /// # Errors
    /// Returns [`GridError::Config`] for unusable dimensions,
    /// [`GridError::OutOfRange`] for a centre off the globe, and
    /// [`GridError::DegenerateLatitude`] at the poles.
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "box edges are offsets of whole cell counts in degrees"
    )]
    pub fn build(centre: Coord<f64>, config: GridConfig) -> Result<Self, GridError> {
        let validated = config.validate()?;
        crate::coordinate::validate_position(centre, LAST_FIELDS)?;
        let steps = GridSteps {
            latitude: latitude_step(validated.cell_size_m),
            longitude: longitude_step(centre.y, validated.cell_size_m)?,
        };
        let half = validated.half_span_cells() as f64;
        let reach_x = steps.longitude / 2.0 + half * steps.longitude;
        let reach_y = steps.latitude / 2.0 + half * steps.latitude;
        let bounds = BoundingBox {
            top: centre.y + reach_y,
            bottom: centre.y - reach_y,
            left: centre.x - reach_x,
            right: centre.x + reach_x,
        };
        debug!(
            "laid out {side}x{side} grid around ({lat}, {lon}) with steps {steps:?}",
            side = validated.side_cell_count(),
            lat = centre.y,
            lon = centre.x,
        );
        Ok(Self {
            centre,
            config: validated,
            steps,
            bounds,
        })
    }

    /// Map a position onto cell coordinates using this grid's steps.
    ///
    /// Positions outside the box yield cells outside `0..side_cell_count`;
    /// callers check with [`GridCell::within`].
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_possible_truncation,
        reason = "cell indices are floored quotients of degree offsets"
    )]
    #[must_use]
    pub fn cell_for(&self, position: Coord<f64>) -> GridCell {
        let x = ((position.x - self.bounds.left) / self.steps.longitude).floor();
        let y = ((self.bounds.top - position.y) / self.steps.latitude).floor();
        GridCell {
            x: x as i64,
            y: y as i64,
        }
    }

    /// Return the centre of `cell` in degrees.
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "cell centres are fractional offsets from the box corner"
    )]
    #[must_use]
    pub fn cell_centre(&self, cell: GridCell) -> Coord<f64> {
        Coord {
            x: self.bounds.left + (cell.x as f64 + 0.5) * self.steps.longitude,
            y: self.bounds.top - (cell.y as f64 + 0.5) * self.steps.latitude,
        }
    }

    /// The last-known position the grid is centred on.
    #[must_use]
    pub const fn centre(&self) -> Coord<f64> {
        self.centre
    }

    /// Dimensions the grid was built with.
    #[must_use]
    pub const fn config(&self) -> GridConfig {
        self.config
    }

    /// Angular cell size.
    #[must_use]
    pub const fn steps(&self) -> GridSteps {
        self.steps
    }

    /// Outer edges of the grid.
    #[must_use]
    pub const fn bounds(&self) -> BoundingBox {
        self.bounds
    }

    /// Cells per side.
    #[must_use]
    pub const fn side_cell_count(&self) -> u64 {
        self.config.side_cell_count()
    }

    /// Cells in the whole grid.
    #[must_use]
    pub const fn total_cell_count(&self) -> u64 {
        self.config.total_cell_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn grid() -> CaseGrid {
        CaseGrid::build(Coord { x: -105.27, y: 40.01 }, GridConfig::default())
            .expect("default grid builds")
    }

    #[rstest]
    #[expect(clippy::float_arithmetic, reason = "tests compare float tolerances")]
    fn box_is_centred_on_last_known_point(grid: CaseGrid) {
        let bounds = grid.bounds();
        let mid_lat = f64::midpoint(bounds.top, bounds.bottom);
        let mid_lon = f64::midpoint(bounds.left, bounds.right);
        assert!((mid_lat - 40.01).abs() < grid.steps().latitude / 2.0);
        assert!((mid_lon + 105.27).abs() < grid.steps().longitude / 2.0);
    }

    #[rstest]
    #[expect(clippy::float_arithmetic, reason = "tests compare float tolerances")]
    fn box_spans_side_count_cells(grid: CaseGrid) {
        let bounds = grid.bounds();
        let cells_tall = (bounds.top - bounds.bottom) / grid.steps().latitude;
        let cells_wide = (bounds.right - bounds.left) / grid.steps().longitude;
        assert!((cells_tall - 5001.0).abs() < 1e-6, "tall {cells_tall}");
        assert!((cells_wide - 5001.0).abs() < 1e-6, "wide {cells_wide}");
    }

    #[rstest]
    fn centre_maps_to_centre_cell(grid: CaseGrid) {
        assert_eq!(
            grid.cell_for(grid.centre()),
            GridCell { x: 2500, y: 2500 }
        );
    }

    #[rstest]
    #[expect(clippy::float_cmp, reason = "corners copy the same edge values")]
    fn corners_share_edges(grid: CaseGrid) {
        let corners = grid.bounds().corners();
        assert_eq!(corners.upper_left.y, corners.upper_right.y);
        assert_eq!(corners.lower_left.y, corners.lower_right.y);
        assert_eq!(corners.upper_left.x, corners.lower_left.x);
        assert_eq!(corners.upper_right.x, corners.lower_right.x);
    }

    #[rstest]
    fn upper_left_corner_is_origin(grid: CaseGrid) {
        let corners = grid.bounds().corners();
        assert_eq!(grid.cell_for(corners.upper_left), GridCell { x: 0, y: 0 });
    }

    #[rstest]
    #[case(GridCell { x: 0, y: 0 })]
    #[case(GridCell { x: 17, y: 4999 })]
    #[case(GridCell { x: 5000, y: 5000 })]
    fn cell_centres_map_back_to_their_cell(grid: CaseGrid, #[case] cell: GridCell) {
        assert_eq!(grid.cell_for(grid.cell_centre(cell)), cell);
    }

    #[rstest]
    #[expect(clippy::float_arithmetic, reason = "tests offset positions")]
    fn positions_west_and_north_of_box_are_negative(grid: CaseGrid) {
        let bounds = grid.bounds();
        let outside = Coord {
            x: bounds.left - grid.steps().longitude / 4.0,
            y: bounds.top + grid.steps().latitude / 4.0,
        };
        let cell = grid.cell_for(outside);
        assert_eq!(cell, GridCell { x: -1, y: -1 });
        assert_eq!(cell.within(5001), None);
    }

    #[rstest]
    #[case(90.0)]
    #[case(-90.0)]
    fn polar_centres_fail(#[case] latitude: f64) {
        let err = CaseGrid::build(Coord { x: 0.0, y: latitude }, GridConfig::default())
            .expect_err("poles are degenerate");
        assert!(matches!(err, GridError::DegenerateLatitude { .. }));
    }

    #[rstest]
    fn invalid_config_is_reported() {
        let config = GridConfig {
            cell_size_m: 0,
            box_side_km: 25,
        };
        let err = CaseGrid::build(Coord { x: 0.0, y: 0.0 }, config).expect_err("zero cell");
        assert!(matches!(err, GridError::Config(_)));
    }
}
