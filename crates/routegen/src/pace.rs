//! Pace and cadence estimation for a synthesized route.
//!
//! Both factors come from triangular distributions whose parameters match
//! plausible recreational-run telemetry. Draws are independent per call; the
//! caller owns the random source.

use rand::Rng;
use rand_distr::{Distribution, Triangular};

use crate::error::RouteError;

/// Pace draw bounds in meters per second-equivalent.
pub const PACE_LOW_MPS: f64 = 1.44;
pub const PACE_HIGH_MPS: f64 = 3.0;
pub const PACE_MODE_MPS: f64 = 2.22;

/// Cadence draw bounds in steps per second-equivalent.
pub const CADENCE_LOW_SPS: f64 = 2.5;
pub const CADENCE_HIGH_SPS: f64 = 3.5;
pub const CADENCE_MODE_SPS: f64 = 3.0;

/// Timing statistics derived once per route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaceEstimate {
    pub duration_secs: f64,
    pub step_count: f64,
}

/// Derives a run duration and step count from total distance in meters.
///
/// Zero distance yields a zero estimate without consuming randomness.
pub fn compute_pace(
    total_distance_m: f64,
    rng: &mut impl Rng,
) -> Result<PaceEstimate, RouteError> {
    if !total_distance_m.is_finite() || total_distance_m < 0.0 {
        return Err(RouteError::InvalidScalar {
            what: "total distance",
            value: total_distance_m,
        });
    }
    if total_distance_m == 0.0 {
        return Ok(PaceEstimate {
            duration_secs: 0.0,
            step_count: 0.0,
        });
    }

    let pace = Triangular::new(PACE_LOW_MPS, PACE_HIGH_MPS, PACE_MODE_MPS)
        .unwrap()
        .sample(rng);
    let cadence = Triangular::new(CADENCE_LOW_SPS, CADENCE_HIGH_SPS, CADENCE_MODE_SPS)
        .unwrap()
        .sample(rng);

    let duration_secs = total_distance_m / pace;
    Ok(PaceEstimate {
        duration_secs,
        step_count: duration_secs * cadence,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_distance() {
        let mut rng = rand::thread_rng();
        let estimate = compute_pace(0.0, &mut rng).unwrap();

        assert_eq!(estimate.duration_secs, 0.0);
        assert_eq!(estimate.step_count, 0.0);
    }

    #[test]
    fn test_rejects_bad_distance() {
        let mut rng = rand::thread_rng();

        assert!(compute_pace(-1.0, &mut rng).is_err());
        assert!(compute_pace(f64::NAN, &mut rng).is_err());
        assert!(compute_pace(f64::INFINITY, &mut rng).is_err());
    }

    #[test]
    fn test_estimate_bounds() {
        let mut rng = rand::thread_rng();
        let distance = 2250.0;

        for _ in 0..1000 {
            let estimate = compute_pace(distance, &mut rng).unwrap();

            assert!(estimate.duration_secs >= distance / PACE_HIGH_MPS);
            assert!(estimate.duration_secs <= distance / PACE_LOW_MPS);
            assert!(estimate.step_count >= CADENCE_LOW_SPS * estimate.duration_secs);
            assert!(estimate.step_count <= CADENCE_HIGH_SPS * estimate.duration_secs);
        }
    }

    #[test]
    fn test_duration_centers_near_mode() {
        // Triangular(1.44, 3, 2.22) has mean 2.22, so mean duration for a
        // fixed distance should land near distance / 2.22 within a loose band.
        let mut rng = rand::thread_rng();
        let distance = 2250.0;

        let samples = 5000;
        let mut total = 0.0;
        for _ in 0..samples {
            total += compute_pace(distance, &mut rng).unwrap().duration_secs;
        }
        let mean = total / samples as f64;

        let expected = distance / PACE_MODE_MPS;
        assert!((mean - expected).abs() < expected * 0.15, "mean {mean}");
    }
}
