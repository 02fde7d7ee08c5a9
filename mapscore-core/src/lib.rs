//! Core domain types for the MapScore grid-scoring engine.
//!
//! A search case is laid out as a square lattice of fixed-size cells
//! centred on the subject's last-known position. This crate builds that
//! lattice, locates the find position on it and defines the [`Rating`]
//! values the scorer produces. Constructors return `Result` so invalid
//! coordinates surface before any scoring happens.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod case;
mod config;
pub mod coordinate;
mod display;
mod error;
pub mod geodesy;
mod grid;
mod hours;
mod rating;

pub use case::{CaseRecord, CaseSummary, SearchCase};
pub use config::{DEFAULT_BOX_SIDE_KM, DEFAULT_CELL_SIZE_M, GridConfig};
pub use coordinate::DegreeInput;
pub use display::{MapUrls, MapView, render_map_urls};
pub use error::{GridConfigError, GridError};
pub use grid::{BoundingBox, CaseGrid, Corners, GridCell, GridSteps};
pub use hours::ReportedHours;
pub use rating::{AGGREGATE_RATING_PLACES, Rating, TEST_RATING_PLACES};
