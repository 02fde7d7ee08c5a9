//! Scoring entry point that rates a test and publishes the result.

use camino::Utf8Path;
use mapscore_core::{Rating, SearchCase};

use crate::{
    ProbabilityField, ScoreError, ScoreListener, ScoredTest, ScoringError, ScoringOptions,
    TestScored, load_field,
};

/// Rates tests and notifies a [`ScoreListener`] after every stored rating.
///
/// The rank computation runs without holding any lock; only the listener
/// serialises per-model updates. The service is `Send + Sync` whenever its
/// listener is, so one instance can score many tests concurrently.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use geo::Coord;
/// use mapscore_core::{GridConfig, Rating, SearchCase};
/// use mapscore_scorer::{
///     ModelId, ProbabilityField, RatingBoard, ScoredTest, ScoringOptions, TestId,
///     TestScoringService,
/// };
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let board = Arc::new(RatingBoard::new());
/// let service = TestScoringService::new(Arc::clone(&board), ScoringOptions::default());
///
/// let here = Coord { x: 151.2, y: -33.9 };
/// let case = SearchCase::new(here, here, GridConfig { cell_size_m: 500, box_side_km: 1 })?;
/// let field = ProbabilityField::new(3, 3, vec![0.1; 9])?;
///
/// let mut test = ScoredTest::new(TestId(1), ModelId(1));
/// board.enrol(test.id(), test.model(), false)?;
/// assert_eq!(service.score(&mut test, &case, &field)?, Rating::Rated(0.0));
/// assert_eq!(board.model_rating(ModelId(1)), Some(Rating::Rated(0.0)));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct TestScoringService<L> {
    listener: L,
    options: ScoringOptions,
}

impl<L: ScoreListener> TestScoringService<L> {
    /// Create a service that reports to `listener`.
    #[must_use]
    pub const fn new(listener: L, options: ScoringOptions) -> Self {
        Self { listener, options }
    }

    /// Rate `test` against an in-memory field and publish the new rating.
    ///
    /// # Errors
    /// Returns [`ScoreError`] when the field does not match the case's
    /// grid. Nothing is stored or published in that case.
    pub fn score(
        &self,
        test: &mut ScoredTest,
        case: &SearchCase,
        field: &ProbabilityField,
    ) -> Result<Rating, ScoreError> {
        let rating = test.rate(field, case, &self.options)?;
        self.listener.test_scored(&TestScored {
            test: test.id(),
            rating,
        });
        Ok(rating)
    }

    /// Load the field stored at `path`, then behave as
    /// [`TestScoringService::score`].
    ///
    /// # Errors
    /// Returns [`ScoringError::Load`] when the field cannot be loaded and
    /// [`ScoringError::Score`] when it cannot be scored.
    pub fn score_file(
        &self,
        test: &mut ScoredTest,
        case: &SearchCase,
        path: &Utf8Path,
    ) -> Result<Rating, ScoringError> {
        let field = load_field(path)?;
        Ok(self.score(test, case, &field)?)
    }

    /// Listener receiving score events.
    #[must_use]
    pub const fn listener(&self) -> &L {
        &self.listener
    }
}
