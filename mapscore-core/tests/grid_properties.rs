//! Property-based tests for grid construction.
//!
//! # Invariants tested
//!
//! - **Constant latitude step:** the vertical step ignores latitude.
//! - **Monotone longitude step:** the horizontal step never shrinks as the
//!   centre moves away from the equator.
//! - **Centred box:** the box midpoint lies within half a cell of the
//!   last-known point.
//! - **Centre cell:** the last-known point maps to `(side - 1) / 2`.
//! - **Corner round-trip:** every corner maps to an extreme edge cell.

use geo::Coord;
use mapscore_core::geodesy::{latitude_step, longitude_step};
use mapscore_core::{CaseGrid, GridCell, GridConfig};
use proptest::prelude::*;

const SIDE: i64 = 5001;
const CENTRE: i64 = 2500;

fn centre_strategy() -> impl Strategy<Value = Coord<f64>> {
    (-89.0_f64..89.0, -179.0_f64..179.0).prop_map(|(lat, lon)| Coord { x: lon, y: lat })
}

fn is_far_edge(index: i64) -> bool {
    index == SIDE - 1 || index == SIDE
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn latitude_step_ignores_latitude(centre in centre_strategy()) {
        let grid = CaseGrid::build(centre, GridConfig::default()).expect("grid builds");
        prop_assert_eq!(grid.steps().latitude.to_bits(), latitude_step(5).to_bits());
    }

    #[test]
    #[expect(clippy::float_arithmetic, reason = "tolerance for libm rounding")]
    fn longitude_step_grows_away_from_equator(a in 0.0_f64..89.0, b in 0.0_f64..89.0) {
        let (near, far) = if a <= b { (a, b) } else { (b, a) };
        let near_step = longitude_step(near, 5).expect("near step");
        let far_step = longitude_step(far, 5).expect("far step");
        prop_assert!(
            far_step >= near_step * (1.0 - 1e-12),
            "step at {} ({}) is below step at {} ({})",
            far, far_step, near, near_step
        );
        let south_step = longitude_step(-far, 5).expect("southern step");
        prop_assert!((south_step - far_step).abs() <= far_step * 1e-12);
    }

    #[test]
    #[expect(clippy::float_arithmetic, reason = "midpoint tolerance checks")]
    fn box_is_centred_rectangle(centre in centre_strategy()) {
        let grid = CaseGrid::build(centre, GridConfig::default()).expect("grid builds");
        let corners = grid.bounds().corners();
        prop_assert_eq!(corners.upper_left.y, corners.upper_right.y);
        prop_assert_eq!(corners.lower_left.x, corners.upper_left.x);
        prop_assert_eq!(corners.lower_right.x, corners.upper_right.x);
        prop_assert_eq!(corners.lower_right.y, corners.lower_left.y);

        let mid = Coord {
            x: f64::midpoint(corners.upper_left.x, corners.upper_right.x),
            y: f64::midpoint(corners.upper_left.y, corners.lower_left.y),
        };
        prop_assert!((mid.x - centre.x).abs() < grid.steps().longitude / 2.0);
        prop_assert!((mid.y - centre.y).abs() < grid.steps().latitude / 2.0);
    }

    #[test]
    fn last_known_point_is_centre_cell(centre in centre_strategy()) {
        let grid = CaseGrid::build(centre, GridConfig::default()).expect("grid builds");
        prop_assert_eq!(grid.cell_for(centre), GridCell { x: CENTRE, y: CENTRE });
    }

    #[test]
    fn corners_map_to_extreme_cells(centre in centre_strategy()) {
        let grid = CaseGrid::build(centre, GridConfig::default()).expect("grid builds");
        let corners = grid.bounds().corners();

        prop_assert_eq!(grid.cell_for(corners.upper_left), GridCell { x: 0, y: 0 });

        let upper_right = grid.cell_for(corners.upper_right);
        prop_assert!(is_far_edge(upper_right.x) && upper_right.y == 0, "{:?}", upper_right);

        let lower_left = grid.cell_for(corners.lower_left);
        prop_assert!(lower_left.x == 0 && is_far_edge(lower_left.y), "{:?}", lower_left);

        let lower_right = grid.cell_for(corners.lower_right);
        prop_assert!(
            is_far_edge(lower_right.x) && is_far_edge(lower_right.y),
            "{:?}",
            lower_right
        );
    }
}
