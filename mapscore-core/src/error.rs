//! Errors raised while parsing case coordinates and building grids.

use std::num::ParseFloatError;

use thiserror::Error;

/// Errors returned by [`crate::GridConfig::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridConfigError {
    /// Cells must have a positive side length.
    #[error("cell size must be at least one metre")]
    ZeroCellSize,
    /// The box must have a positive side length.
    #[error("bounding box side must be at least one kilometre")]
    ZeroBoxSide,
    /// The box side is not a whole number of cells.
    #[error("box side of {box_side_m} m is not a multiple of the {cell_size_m} m cell size")]
    UnevenCells {
        /// Box side in metres.
        box_side_m: u64,
        /// Cell side in metres.
        cell_size_m: u32,
    },
    /// The grid would not have a single centre cell.
    #[error("a {cells} cell span has no centre cell; the span must be even")]
    NoCentreCell {
        /// Number of cell widths across the box.
        cells: u64,
    },
}

/// Errors raised while turning case coordinates into a grid.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    /// A coordinate was not a decimal number.
    #[error("{field} value {raw:?} is not a decimal number")]
    Parse {
        /// Name of the offending field.
        field: &'static str,
        /// Text supplied by the caller.
        raw: String,
        /// Source error from the float parser.
        #[source]
        source: ParseFloatError,
    },
    /// A coordinate parsed to NaN or an infinity.
    #[error("{field} value {value} is not a finite number")]
    NonFinite {
        /// Name of the offending field.
        field: &'static str,
        /// The non-finite value.
        value: f64,
    },
    /// A coordinate fell outside its valid range.
    #[error("{field} {value} is outside the valid range {min}..={max}")]
    OutOfRange {
        /// Name of the offending field.
        field: &'static str,
        /// Value supplied by the caller.
        value: f64,
        /// Smallest accepted value.
        min: f64,
        /// Largest accepted value.
        max: f64,
    },
    /// The longitude step is undefined at this latitude (the poles).
    #[error("longitude step is undefined at latitude {latitude}")]
    DegenerateLatitude {
        /// Latitude of the last-known point in degrees.
        latitude: f64,
    },
    /// The grid configuration was rejected.
    #[error(transparent)]
    Config(#[from] GridConfigError),
}

impl GridError {
    /// Report whether the error stems from unparsable input text.
    #[must_use]
    pub const fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }

    /// Report whether the error stems from a value outside the domain of the
    /// grid computation.
    #[must_use]
    pub const fn is_domain(&self) -> bool {
        matches!(
            self,
            Self::NonFinite { .. } | Self::OutOfRange { .. } | Self::DegenerateLatitude { .. }
        )
    }
}
