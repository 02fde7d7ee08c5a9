//! Physical dimensions of a case grid.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::GridConfigError;

/// Default physical side length of one grid cell, in metres.
pub const DEFAULT_CELL_SIZE_M: u32 = 5;
/// Default side length of the bounding box, in kilometres.
pub const DEFAULT_BOX_SIDE_KM: u32 = 25;

/// Cell and box dimensions used to lay out a case grid.
///
/// The box spans an even number of cells so that the last-known point sits
/// exactly on a centre cell; the grid therefore has an odd number of cells
/// per side.
///
/// # Examples
/// ```
/// use mapscore_core::GridConfig;
///
/// let config = GridConfig::default();
/// assert_eq!(config.side_cell_count(), 5001);
/// assert_eq!(config.total_cell_count(), 5001 * 5001);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridConfig {
    /// Side length of one cell in metres.
    pub cell_size_m: u32,
    /// Side length of the bounding box in kilometres.
    pub box_side_km: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cell_size_m: DEFAULT_CELL_SIZE_M,
            box_side_km: DEFAULT_BOX_SIDE_KM,
        }
    }
}

impl GridConfig {
    /// Check that the dimensions describe a grid with a single centre cell.
    ///
    /// # Errors
    /// Returns [`GridConfigError`] when either dimension is zero, the box is
    /// not a whole number of cells across, or that number is odd.
    #[expect(
        clippy::integer_division_remainder_used,
        reason = "divisibility checks need the remainder"
    )]
    pub const fn validate(self) -> Result<Self, GridConfigError> {
        if self.cell_size_m == 0 {
            return Err(GridConfigError::ZeroCellSize);
        }
        if self.box_side_km == 0 {
            return Err(GridConfigError::ZeroBoxSide);
        }
        let box_side_m = self.box_side_m();
        if box_side_m % self.cell_size_m as u64 != 0 {
            return Err(GridConfigError::UnevenCells {
                box_side_m,
                cell_size_m: self.cell_size_m,
            });
        }
        let cells = self.span_cells();
        if cells % 2 != 0 {
            return Err(GridConfigError::NoCentreCell { cells });
        }
        Ok(self)
    }

    /// Side length of the bounding box in metres.
    #[must_use]
    pub const fn box_side_m(self) -> u64 {
        self.box_side_km as u64 * 1000
    }

    /// Number of cell widths spanned by the box (one less than the number of
    /// cells per side).
    #[expect(
        clippy::integer_division,
        reason = "validated configurations divide evenly"
    )]
    #[must_use]
    pub const fn span_cells(self) -> u64 {
        if self.cell_size_m == 0 {
            return 0;
        }
        self.box_side_m() / self.cell_size_m as u64
    }

    /// Number of whole cells between the centre cell and either edge.
    #[expect(
        clippy::integer_division,
        reason = "validated spans are even so halving is exact"
    )]
    #[must_use]
    pub const fn half_span_cells(self) -> u64 {
        self.span_cells() / 2
    }

    /// Number of cells along one side of the grid.
    #[must_use]
    pub const fn side_cell_count(self) -> u64 {
        self.span_cells() + 1
    }

    /// Number of cells in the whole grid.
    #[must_use]
    pub const fn total_cell_count(self) -> u64 {
        let side = self.side_cell_count();
        side * side
    }
}
