//! Rank-based scoring of probability fields for MapScore search cases.
//!
//! The crate rates a model's probability field by where the subject's find
//! cell ranks among every cell of the case grid, then keeps per-model
//! aggregate ratings current:
//! - **Field loading** decodes a stored grayscale image into a
//!   [`ProbabilityField`] with [`load_field`].
//! - **Rank scoring** turns a field and find cell into a [`Rating`] in
//!   `-1.0..=1.0` with [`rank_rating`].
//! - **Aggregation** averages the ratings of a model's closed tests in a
//!   [`ModelAggregate`]. A [`RatingBoard`] keeps one aggregate per model in
//!   step with the [`TestScored`] events a [`TestScoringService`] publishes.
//!
//! [`Rating`]: mapscore_core::Rating
//!
//! # Examples
//!
//! ```no_run
//! use camino::Utf8Path;
//! use mapscore_core::{GridConfig, SearchCase};
//! use mapscore_scorer::{ScoringOptions, load_field, score_case};
//!
//! let last = geo::Coord { x: -105.3, y: 40.0 };
//! let find = geo::Coord { x: -105.29, y: 40.01 };
//! let case = SearchCase::new(last, find, GridConfig::default()).expect("valid case");
//! let field = load_field(Utf8Path::new("fields/model-7.png")).expect("load field");
//! let rating = score_case(&field, &case, &ScoringOptions::default()).expect("score field");
//! println!("{rating}");
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod aggregate;
mod board;
mod error;
mod field;
mod load;
mod rank;
mod service;

pub use aggregate::{ModelAggregate, ModelId, ScoredTest, TestEntry, TestId, aggregate_rating};
pub use board::{BoardError, RatingBoard, ScoreListener, TestScored};
pub use error::{FieldError, FieldLoadError, ScoreError, ScoringError};
pub use field::ProbabilityField;
pub use load::load_field;
pub use rank::{CellIndexing, DEFAULT_OUTSIDE_FALLBACK, ScoringOptions, rank_rating, score_case};
pub use service::TestScoringService;
