//! Search cases: a last-known position, a find position and the grid
//! derived from them.

use geo::Coord;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::coordinate::{parse_position, validate_position};
use crate::display::{MapUrls, MapView, render_map_urls};
use crate::{CaseGrid, Corners, DegreeInput, GridCell, GridConfig, GridError, GridSteps};

const LAST_FIELDS: (&str, &str) = ("last_lat", "last_lon");
const FIND_FIELDS: (&str, &str) = ("find_lat", "find_lon");

/// A case as supplied by the surrounding application, before any
/// derivation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CaseRecord {
    /// Latitude where the subject was last seen.
    pub last_lat: DegreeInput,
    /// Longitude where the subject was last seen.
    pub last_lon: DegreeInput,
    /// Latitude where the subject was found.
    pub find_lat: DegreeInput,
    /// Longitude where the subject was found.
    pub find_lon: DegreeInput,
    /// Grid dimensions; defaults to 5 m cells in a 25 km box.
    #[cfg_attr(feature = "serde", serde(default))]
    pub grid: GridConfig,
}

/// A search case with its derived grid.
///
/// The grid and find cell are computed once by [`SearchCase::new`] and are
/// read-only afterwards, so the find cell always agrees with the grid's
/// steps.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use mapscore_core::{GridConfig, SearchCase};
///
/// # fn main() -> Result<(), mapscore_core::GridError> {
/// let last = Coord { x: -78.9, y: 35.9 };
/// let case = SearchCase::new(last, last, GridConfig::default())?;
/// assert_eq!(case.find_cell_index(), Some((2500, 2500)));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SearchCase {
    find: Coord<f64>,
    grid: CaseGrid,
    find_cell: GridCell,
}

impl SearchCase {
    /// Derive the grid around `last_known` and locate `find` on it.
    ///
    /// # Errors
    /// Returns [`GridError`] when either position is off the globe, the
    /// last-known latitude is polar, or `config` is unusable.
    pub fn new(
        last_known: Coord<f64>,
        find: Coord<f64>,
        config: GridConfig,
    ) -> Result<Self, GridError> {
        validate_position(last_known, LAST_FIELDS)?;
        validate_position(find, FIND_FIELDS)?;
        let grid = CaseGrid::build(last_known, config)?;
        let find_cell = grid.cell_for(find);
        Ok(Self {
            find,
            grid,
            find_cell,
        })
    }

    /// Parse and derive a case from an external record.
    ///
    /// # Errors
    /// Returns [`GridError::Parse`] for non-numeric coordinates, plus every
    /// error [`SearchCase::new`] can raise.
    pub fn from_record(record: &CaseRecord) -> Result<Self, GridError> {
        let last_known = parse_position(&record.last_lat, &record.last_lon, LAST_FIELDS)?;
        let find = parse_position(&record.find_lat, &record.find_lon, FIND_FIELDS)?;
        Self::new(last_known, find, record.grid)
    }

    /// Position the subject was last seen.
    #[must_use]
    pub const fn last_known(&self) -> Coord<f64> {
        self.grid.centre()
    }

    /// Position the subject was found.
    #[must_use]
    pub const fn find(&self) -> Coord<f64> {
        self.find
    }

    /// The derived grid.
    #[must_use]
    pub const fn grid(&self) -> &CaseGrid {
        &self.grid
    }

    /// Cell containing the find position, possibly outside the grid.
    #[must_use]
    pub const fn find_cell(&self) -> GridCell {
        self.find_cell
    }

    /// Find cell as in-grid indices, or `None` when the subject was found
    /// outside the box.
    #[must_use]
    pub fn find_cell_index(&self) -> Option<(usize, usize)> {
        let side = usize::try_from(self.grid.side_cell_count()).ok()?;
        self.find_cell.within(side)
    }

    /// Record describing the map previews for this case.
    #[must_use]
    pub const fn map_view(&self) -> MapView {
        MapView {
            last_known: self.last_known(),
            find: self.find,
            corners: self.grid.bounds().corners(),
        }
    }

    /// Every derived value handed back to the surrounding application.
    #[must_use]
    pub fn summary(&self) -> CaseSummary {
        CaseSummary {
            corners: self.grid.bounds().corners(),
            steps: self.grid.steps(),
            side_cell_count: self.grid.side_cell_count(),
            total_cell_count: self.grid.total_cell_count(),
            find_cell: self.find_cell,
            urls: render_map_urls(&self.map_view()),
        }
    }
}

/// Derived case fields in storage-friendly form.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CaseSummary {
    /// Bounding box corners.
    pub corners: Corners,
    /// Degrees per cell.
    pub steps: GridSteps,
    /// Cells per side.
    pub side_cell_count: u64,
    /// Cells in the grid.
    pub total_cell_count: u64,
    /// Cell of the find position relative to the upper-left corner.
    pub find_cell: GridCell,
    /// Preview URLs.
    pub urls: MapUrls,
}
