#![expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]

//! Behavioural coverage for rating probability fields and aggregating
//! model ratings.

use std::cell::RefCell;

use mapscore_core::{GridCell, Rating};
use mapscore_scorer::{
    ModelAggregate, ModelId, ProbabilityField, ScoreError, ScoringOptions, TestEntry, TestId,
    rank_rating,
};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

/// World state for scoring scenarios.
#[derive(Debug, Default)]
struct ScoringWorld {
    field: RefCell<Option<ProbabilityField>>,
    find: RefCell<Option<GridCell>>,
    outcome: RefCell<Option<Result<Rating, ScoreError>>>,
    entries: RefCell<Vec<TestEntry>>,
    aggregate: RefCell<Option<Rating>>,
}

impl ScoringWorld {
    fn add_entry(&self, value: f64, active: bool) {
        let mut entries = self.entries.borrow_mut();
        let next = TestId(u64::try_from(entries.len()).expect("entry count fits in u64"));
        entries.push(TestEntry {
            test: next,
            rating: Rating::Rated(value),
            active,
        });
    }

    fn rating(&self) -> Rating {
        let outcome = self.outcome.borrow();
        match outcome.as_ref().expect("field should have been rated") {
            Ok(rating) => *rating,
            Err(err) => panic!("rating should succeed, got {err}"),
        }
    }
}

#[fixture]
fn world() -> ScoringWorld {
    ScoringWorld::default()
}

fn square_field(side: usize, values: Vec<f64>) -> ProbabilityField {
    ProbabilityField::new(side, side, values).expect("square field")
}

#[given("a uniform field of {side:usize} cells per side")]
fn given_uniform_field(world: &ScoringWorld, side: usize) {
    let cells = side.checked_mul(side).expect("cell count");
    world.field.replace(Some(square_field(side, vec![0.01; cells])));
}

#[given("a field of {side:usize} cells per side peaking at cell {x:usize}, {y:usize}")]
fn given_peaked_field(world: &ScoringWorld, side: usize, x: usize, y: usize) {
    let cells = side.checked_mul(side).expect("cell count");
    let mut values = vec![0.1; cells];
    let peak = y
        .checked_mul(side)
        .and_then(|row| row.checked_add(x))
        .and_then(|offset| values.get_mut(offset))
        .expect("peak inside field");
    *peak = 0.7;
    world.field.replace(Some(square_field(side, values)));
}

#[given("a field of {side:usize} cells per side summing to {total:f64}")]
#[expect(clippy::float_arithmetic, reason = "spread the total evenly")]
#[expect(
    clippy::cast_precision_loss,
    reason = "scenario fields have a handful of cells"
)]
fn given_field_with_total(world: &ScoringWorld, side: usize, total: f64) {
    let cells = side.checked_mul(side).expect("cell count");
    let values = vec![total / cells as f64; cells];
    world.field.replace(Some(square_field(side, values)));
}

#[given("the subject was found in cell {x:i64}, {y:i64}")]
fn given_find_cell(world: &ScoringWorld, x: i64, y: i64) {
    world.find.replace(Some(GridCell { x, y }));
}

#[given("a closed test rated {value:f64}")]
fn given_closed_test(world: &ScoringWorld, value: f64) {
    world.add_entry(value, false);
}

#[given("an open test rated {value:f64}")]
fn given_open_test(world: &ScoringWorld, value: f64) {
    world.add_entry(value, true);
}

#[when("the field is rated on a grid of {side:u64} cells per side")]
fn when_field_rated(world: &ScoringWorld, side: u64) {
    let borrowed = world.field.borrow();
    let field = borrowed.as_ref().expect("field should be set");
    let cell = world.find.borrow().expect("find cell should be set");
    let result = rank_rating(field, cell, side, &ScoringOptions::default());
    world.outcome.replace(Some(result));
}

#[when("the model aggregate is computed")]
fn when_aggregate_computed(world: &ScoringWorld) {
    let entries = world.entries.borrow().clone();
    let model = ModelAggregate::from_entries(ModelId(1), entries);
    world.aggregate.replace(Some(model.rating()));
}

#[then("the rating is {expected:f64}")]
fn then_rating(world: &ScoringWorld, expected: f64) {
    assert_eq!(world.rating(), Rating::Rated(expected));
}

#[then("rating fails because the field shape is wrong")]
fn then_shape_error(world: &ScoringWorld) {
    let outcome = world.outcome.borrow();
    let result = outcome.as_ref().expect("field should have been rated");
    assert!(
        matches!(result, Err(ScoreError::Shape { .. })),
        "expected a shape error, got {result:?}"
    );
}

#[then("the aggregate rating is {expected:f64}")]
fn then_aggregate(world: &ScoringWorld, expected: f64) {
    let aggregate = world.aggregate.borrow().expect("aggregate should be computed");
    assert_eq!(aggregate, Rating::Rated(expected));
}

#[then("the aggregate is unrated")]
fn then_aggregate_unrated(world: &ScoringWorld) {
    let aggregate = world.aggregate.borrow().expect("aggregate should be computed");
    assert_eq!(aggregate, Rating::Unrated);
}

#[scenario(path = "tests/features/scoring.feature", index = 0)]
fn uniform_field(world: ScoringWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/scoring.feature", index = 1)]
fn unique_maximum(world: ScoringWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/scoring.feature", index = 2)]
fn outside_find(world: ScoringWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/scoring.feature", index = 3)]
fn wrong_shape(world: ScoringWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/scoring.feature", index = 4)]
fn closed_tests_averaged(world: ScoringWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/scoring.feature", index = 5)]
fn open_tests_only(world: ScoringWorld) {
    let _ = world;
}
