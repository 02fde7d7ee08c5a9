//! Test submissions and the per-model aggregate built from them.

use std::collections::BTreeMap;
use std::fmt;

use mapscore_core::{AGGREGATE_RATING_PLACES, Rating, SearchCase};
use serde::{Deserialize, Serialize};

use crate::{ProbabilityField, ScoreError, ScoringOptions, score_case};

/// Identifier of a scored test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TestId(pub u64);

/// Identifier of a model whose tests are aggregated together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelId(pub u64);

impl fmt::Display for TestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "test {}", self.0)
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "model {}", self.0)
    }
}

/// One model's field submission for one case.
///
/// A test starts [`Rating::Unrated`]. Each successful
/// [`TestScoringService::score`] replaces the rating; a failed call leaves
/// it untouched. Whether the test is still open is tracked by the
/// [`RatingBoard`] the test is enrolled on, not here.
///
/// [`TestScoringService::score`]: crate::TestScoringService::score
/// [`RatingBoard`]: crate::RatingBoard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredTest {
    id: TestId,
    model: ModelId,
    rating: Rating,
}

impl ScoredTest {
    /// Create an unrated test.
    #[must_use]
    pub const fn new(id: TestId, model: ModelId) -> Self {
        Self {
            id,
            model,
            rating: Rating::Unrated,
        }
    }

    /// Score `field` against the case's find cell and store the result.
    ///
    /// Only the scoring service calls this, so every stored rating is
    /// published to its listener.
    pub(crate) fn rate(
        &mut self,
        field: &ProbabilityField,
        case: &SearchCase,
        options: &ScoringOptions,
    ) -> Result<Rating, ScoreError> {
        let rating = score_case(field, case, options)?;
        self.rating = rating;
        Ok(rating)
    }

    /// Test identifier.
    #[must_use]
    pub const fn id(&self) -> TestId {
        self.id
    }

    /// Owning model.
    #[must_use]
    pub const fn model(&self) -> ModelId {
        self.model
    }

    /// Latest stored rating.
    #[must_use]
    pub const fn rating(&self) -> Rating {
        self.rating
    }
}

/// A model's view of one of its tests.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TestEntry {
    /// Test identifier.
    pub test: TestId,
    /// Latest rating.
    #[serde(default)]
    pub rating: Rating,
    /// Active tests are excluded from the aggregate.
    #[serde(default)]
    pub active: bool,
}

/// The tests belonging to one model and their aggregate rating.
///
/// The aggregate is recomputed whenever an entry changes, so
/// [`ModelAggregate::rating`] never lags behind the entries.
///
/// # Examples
/// ```
/// use mapscore_core::Rating;
/// use mapscore_scorer::{ModelAggregate, ModelId, TestEntry, TestId};
///
/// let mut model = ModelAggregate::new(ModelId(1));
/// model.record(TestEntry { test: TestId(1), rating: Rating::Rated(0.5), active: false });
/// model.record(TestEntry { test: TestId(2), rating: Rating::Rated(-0.5), active: false });
/// model.record(TestEntry { test: TestId(3), rating: Rating::Rated(0.25), active: false });
/// assert_eq!(model.rating(), Rating::Rated(0.08333));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelAggregate {
    model: ModelId,
    entries: BTreeMap<TestId, TestEntry>,
    rating: Rating,
}

impl ModelAggregate {
    /// Create an aggregate with no tests.
    #[must_use]
    pub const fn new(model: ModelId) -> Self {
        Self {
            model,
            entries: BTreeMap::new(),
            rating: Rating::Unrated,
        }
    }

    /// Create an aggregate from existing entries; later duplicates win.
    #[must_use]
    pub fn from_entries(model: ModelId, entries: impl IntoIterator<Item = TestEntry>) -> Self {
        let mut aggregate = Self::new(model);
        aggregate
            .entries
            .extend(entries.into_iter().map(|entry| (entry.test, entry)));
        aggregate.recompute();
        aggregate
    }

    /// Insert or replace an entry and return the recomputed rating.
    pub fn record(&mut self, entry: TestEntry) -> Rating {
        self.entries.insert(entry.test, entry);
        self.recompute()
    }

    /// Drop a test and return the recomputed rating.
    pub fn remove(&mut self, test: TestId) -> Rating {
        self.entries.remove(&test);
        self.recompute()
    }

    /// Owning model.
    #[must_use]
    pub const fn model(&self) -> ModelId {
        self.model
    }

    /// Current aggregate rating.
    #[must_use]
    pub const fn rating(&self) -> Rating {
        self.rating
    }

    /// Entry for `test`, if the test belongs to this model.
    #[must_use]
    pub fn entry(&self, test: TestId) -> Option<&TestEntry> {
        self.entries.get(&test)
    }

    /// Entries ordered by test identifier.
    pub fn entries(&self) -> impl Iterator<Item = &TestEntry> {
        self.entries.values()
    }

    /// Number of tests.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Report whether the model has no tests.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn recompute(&mut self) -> Rating {
        self.rating = aggregate_rating(self.entries.values());
        self.rating
    }
}

/// Mean rating of the inactive, rated entries, rounded to
/// [`AGGREGATE_RATING_PLACES`] decimals.
///
/// Active entries and unrated entries are skipped. When nothing remains
/// the result is [`Rating::Unrated`].
#[must_use]
#[expect(clippy::float_arithmetic, reason = "aggregate is an arithmetic mean")]
pub fn aggregate_rating<'a>(entries: impl IntoIterator<Item = &'a TestEntry>) -> Rating {
    let (sum, count) = entries
        .into_iter()
        .filter(|entry| !entry.active)
        .filter_map(|entry| entry.rating.value())
        .fold((0.0_f64, 0_u32), |(sum, count), value| {
            (sum + value, count.saturating_add(1))
        });
    if count == 0 {
        return Rating::Unrated;
    }
    Rating::rounded(sum / f64::from(count), AGGREGATE_RATING_PLACES)
}
