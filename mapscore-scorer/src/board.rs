//! Score events and the board that keeps model aggregates in step with
//! them.
//!
//! Scoring publishes a [`TestScored`] event. A [`RatingBoard`] listens for
//! those events and folds each one into the owning model's aggregate while
//! holding that model's lock, so the rating write and the recompute see the
//! same snapshot. Different models never contend.
//!
//! The board is the only record of whether a test is open: events carry a
//! rating and nothing else, and [`RatingBoard::set_active`] keeps the
//! rating.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use log::{debug, warn};
use mapscore_core::Rating;
use thiserror::Error;

use crate::{ModelAggregate, ModelId, TestEntry, TestId};

/// Published after a test has been rated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TestScored {
    /// The rated test.
    pub test: TestId,
    /// The stored rating.
    pub rating: Rating,
}

/// Receives [`TestScored`] events.
///
/// Implementations must be thread-safe (`Send` + `Sync`) because tests
/// are scored concurrently.
pub trait ScoreListener: Send + Sync {
    /// Handle a freshly rated test.
    fn test_scored(&self, event: &TestScored);
}

impl<L: ScoreListener + ?Sized> ScoreListener for Arc<L> {
    fn test_scored(&self, event: &TestScored) {
        (**self).test_scored(event);
    }
}

/// Errors raised while changing board membership.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    /// The test is already enrolled under another model.
    #[error("{test} already belongs to {model}")]
    AlreadyEnrolled {
        /// The test being enrolled.
        test: TestId,
        /// Its current model.
        model: ModelId,
    },
    /// The test is not enrolled under any model.
    #[error("{test} is not enrolled")]
    UnknownTest {
        /// The unknown test.
        test: TestId,
    },
    /// A lock was poisoned by a panicking writer.
    #[error("rating board lock for {what} is poisoned")]
    Poisoned {
        /// Which lock failed.
        what: &'static str,
    },
}

type SharedAggregate = Arc<Mutex<ModelAggregate>>;

/// Per-model aggregates kept current from [`TestScored`] events.
///
/// # Examples
/// ```
/// use mapscore_core::Rating;
/// use mapscore_scorer::{ModelId, RatingBoard, ScoreListener, TestId, TestScored};
///
/// # fn main() -> Result<(), mapscore_scorer::BoardError> {
/// let board = RatingBoard::new();
/// board.enrol(TestId(1), ModelId(9), false)?;
/// board.test_scored(&TestScored { test: TestId(1), rating: Rating::Rated(0.4) });
/// assert_eq!(board.model_rating(ModelId(9)), Some(Rating::Rated(0.4)));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct RatingBoard {
    models: RwLock<HashMap<ModelId, SharedAggregate>>,
    membership: RwLock<HashMap<TestId, ModelId>>,
}

impl RatingBoard {
    /// Create an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `test` as an unrated member of `model`.
    ///
    /// Enrolling a test again under the same model is a no-op.
    ///
    /// # Errors
    /// Returns [`BoardError::AlreadyEnrolled`] when the test belongs to a
    /// different model, or [`BoardError::Poisoned`] when a lock is
    /// poisoned.
    pub fn enrol(&self, test: TestId, model: ModelId, active: bool) -> Result<(), BoardError> {
        // Membership is published under the models lock, after the
        // aggregate exists, so a test is never visible without its model.
        let Ok(mut models) = self.models.write() else {
            return Err(BoardError::Poisoned { what: "models" });
        };
        let Ok(mut membership) = self.membership.write() else {
            return Err(BoardError::Poisoned { what: "membership" });
        };
        match membership.get(&test) {
            Some(&existing) if existing == model => return Ok(()),
            Some(&existing) => {
                return Err(BoardError::AlreadyEnrolled {
                    test,
                    model: existing,
                });
            }
            None => {}
        }
        let aggregate = models
            .entry(model)
            .or_insert_with(|| Arc::new(Mutex::new(ModelAggregate::new(model))));
        let Ok(mut guard) = aggregate.lock() else {
            return Err(BoardError::Poisoned { what: "model" });
        };
        guard.record(TestEntry {
            test,
            rating: Rating::Unrated,
            active,
        });
        membership.insert(test, model);
        Ok(())
    }

    /// Open or close `test` and return its model's recomputed rating.
    ///
    /// # Errors
    /// Returns [`BoardError::UnknownTest`] when the test is not enrolled,
    /// or [`BoardError::Poisoned`] when a lock is poisoned.
    pub fn set_active(&self, test: TestId, active: bool) -> Result<Rating, BoardError> {
        let aggregate = self.aggregate_for_test(test)?;
        let Ok(mut guard) = aggregate.lock() else {
            return Err(BoardError::Poisoned { what: "model" });
        };
        let rating = guard
            .entry(test)
            .map_or(Rating::Unrated, |entry| entry.rating);
        Ok(guard.record(TestEntry {
            test,
            rating,
            active,
        }))
    }

    /// Current aggregate rating of `model`, if it is registered.
    #[must_use]
    pub fn model_rating(&self, model: ModelId) -> Option<Rating> {
        let aggregate = self.aggregate_handle(model)?;
        let guard = aggregate.lock().ok()?;
        Some(guard.rating())
    }

    /// A copy of `model`'s aggregate, if it is registered.
    #[must_use]
    pub fn snapshot(&self, model: ModelId) -> Option<ModelAggregate> {
        let aggregate = self.aggregate_handle(model)?;
        let guard = aggregate.lock().ok()?;
        Some(guard.clone())
    }

    /// Model that `test` belongs to, if enrolled.
    #[must_use]
    pub fn model_of(&self, test: TestId) -> Option<ModelId> {
        self.membership.read().ok()?.get(&test).copied()
    }

    fn aggregate_handle(&self, model: ModelId) -> Option<SharedAggregate> {
        self.models.read().ok()?.get(&model).cloned()
    }

    fn aggregate_for_test(&self, test: TestId) -> Result<SharedAggregate, BoardError> {
        let model = self
            .model_of(test)
            .ok_or(BoardError::UnknownTest { test })?;
        self.aggregate_handle(model)
            .ok_or(BoardError::UnknownTest { test })
    }
}

impl ScoreListener for RatingBoard {
    fn test_scored(&self, event: &TestScored) {
        let Ok(aggregate) = self.aggregate_for_test(event.test) else {
            warn!("{} belongs to no registered model; rating dropped", event.test);
            return;
        };
        let Ok(mut guard) = aggregate.lock() else {
            warn!("aggregate lock poisoned; rating for {} dropped", event.test);
            return;
        };
        let active = guard
            .entry(event.test)
            .is_some_and(|entry| entry.active);
        let rating = guard.record(TestEntry {
            test: event.test,
            rating: event.rating,
            active,
        });
        debug!(
            "{} now rated {rating} after {} scored {}",
            guard.model(),
            event.test,
            event.rating
        );
    }
}
