//! Angular cell sizes on a spherical Earth.
//!
//! A cell of fixed physical size spans a constant number of degrees of
//! latitude, but the number of degrees of longitude grows towards the poles
//! as meridians converge.

use crate::GridError;

/// Metres spanned by one degree of latitude.
pub const METRES_PER_DEGREE_LATITUDE: f64 = 111_122.197_699_037_77;

/// Mean Earth radius used by the great-sphere approximation, in metres.
pub const EARTH_RADIUS_M: f64 = 6_372_800.0;

/// Degrees of latitude spanned by a cell `cell_size_m` metres tall.
///
/// # Examples
/// ```
/// use mapscore_core::geodesy::latitude_step;
///
/// let step = latitude_step(5);
/// assert!((step - 4.499_6e-5).abs() < 1e-8);
/// ```
#[expect(
    clippy::float_arithmetic,
    reason = "converting metres to degrees is a division"
)]
#[must_use]
pub fn latitude_step(cell_size_m: u32) -> f64 {
    f64::from(cell_size_m) / METRES_PER_DEGREE_LATITUDE
}

/// Degrees of longitude spanned by a cell `cell_size_m` metres wide at
/// `latitude` degrees.
///
/// Walking `cell_size_m` metres east along a parallel subtends the central
/// angle `d = cell / R`. The longitude difference `Δλ` between the two ends
/// satisfies `cos d = sin²φ + cos²φ cos Δλ`, which rearranges to
/// `Δλ = acos(1 - (1 - cos d) / cos²φ)`.
///
/// # Errors
/// Returns [`GridError::DegenerateLatitude`] when `cos²φ` vanishes (the
/// poles) or the result is otherwise not finite.
#[expect(
    clippy::float_arithmetic,
    reason = "great-sphere trigonometry is floating-point by nature"
)]
pub fn longitude_step(latitude: f64, cell_size_m: u32) -> Result<f64, GridError> {
    let phi = latitude.to_radians();
    let numerator = 1.0 - (f64::from(cell_size_m) / EARTH_RADIUS_M).cos();
    let denominator = phi.cos().powi(2);
    // cos(±π/2) is ~6e-17 rather than zero, so compare against a tolerance.
    if denominator <= f64::EPSILON {
        return Err(GridError::DegenerateLatitude { latitude });
    }
    let step = (1.0 - numerator / denominator).acos().to_degrees();
    if step.is_finite() {
        Ok(step)
    } else {
        Err(GridError::DegenerateLatitude { latitude })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[expect(clippy::float_arithmetic, reason = "tests compare float tolerances")]
    fn equator_steps_are_nearly_square() {
        let lon = longitude_step(0.0, 5).expect("equator is valid");
        let lat = latitude_step(5);
        // A 6372.8 km sphere gives ~111_220 m per degree at the equator.
        assert!((lon - lat).abs() / lat < 0.002, "lon {lon} lat {lat}");
    }

    #[rstest]
    #[expect(clippy::float_arithmetic, reason = "tests compare float tolerances")]
    fn sixty_degrees_doubles_longitude_step() {
        let equator = longitude_step(0.0, 5).expect("equator");
        let sixty = longitude_step(60.0, 5).expect("sixty");
        assert!((sixty / equator - 2.0).abs() < 1e-6, "ratio {}", sixty / equator);
    }

    #[rstest]
    #[case(90.0)]
    #[case(-90.0)]
    fn poles_are_degenerate(#[case] latitude: f64) {
        let err = longitude_step(latitude, 5).expect_err("poles have no longitude step");
        assert!(err.is_domain());
    }

    #[rstest]
    #[case(-45.0, 45.0)]
    #[case(-10.5, 10.5)]
    #[expect(clippy::float_arithmetic, reason = "tests compare float tolerances")]
    fn step_is_symmetric_about_equator(#[case] south: f64, #[case] north: f64) {
        let a = longitude_step(south, 5).expect("south");
        let b = longitude_step(north, 5).expect("north");
        assert!((a - b).abs() < 1e-15, "south {a} north {b}");
    }
}
