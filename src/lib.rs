//! Facade crate for the MapScore engine.
//!
//! This crate re-exports the case-grid types and, behind the `scorer`
//! feature, the probability-field scorer and model aggregates.

#![forbid(unsafe_code)]

pub use mapscore_core::{
    AGGREGATE_RATING_PLACES, CaseGrid, CaseRecord, CaseSummary, DegreeInput, GridCell, GridConfig,
    GridConfigError, GridError, Rating, ReportedHours, SearchCase, TEST_RATING_PLACES,
};

#[cfg(feature = "scorer")]
pub use mapscore_scorer::{
    CellIndexing, ModelAggregate, ModelId, ProbabilityField, RatingBoard, ScoreError,
    ScoreListener, ScoredTest, ScoringError, ScoringOptions, TestId, TestScored,
    TestScoringService, load_field, score_case,
};
