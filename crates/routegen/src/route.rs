//! Route assembly across an ordered waypoint list.

use rand::Rng;

use crate::error::RouteError;
use crate::geo::GeoPoint;
use crate::walk::PathSynthesizer;

/// Jitter radius used when padding the tail of a short route, in degrees.
/// Larger than the walk jitter so padding covers ground quickly.
pub const EXTENSION_JITTER_DEG: f64 = 1e-3;

/// Builds complete routes by chaining synthesized segments and padding the
/// tail up to a minimum distance.
pub struct RouteAssembler {
    synthesizer: PathSynthesizer,
    extension_jitter_deg: f64,
}

impl Default for RouteAssembler {
    fn default() -> Self {
        Self {
            synthesizer: PathSynthesizer::new(),
            extension_jitter_deg: EXTENSION_JITTER_DEG,
        }
    }
}

impl RouteAssembler {
    /// Creates an assembler with default tuning.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the segment synthesizer.
    pub fn with_synthesizer(mut self, synthesizer: PathSynthesizer) -> Self {
        self.synthesizer = synthesizer;
        self
    }

    /// Sets the tail-padding jitter radius.
    pub fn with_extension_jitter(mut self, degrees: f64) -> Self {
        self.extension_jitter_deg = degrees;
        self
    }

    /// Synthesizes one segment per consecutive waypoint pair and concatenates
    /// them, then pads the tail with jittered points until the cumulative
    /// distance reaches `min_distance_m`.
    ///
    /// Boundary waypoints appear once per adjacent segment: each segment
    /// jitters its own copy of the shared endpoint, and the duplication is
    /// part of the expected trace shape.
    pub fn assemble(
        &self,
        waypoints: &[GeoPoint],
        min_distance_m: f64,
        rng: &mut impl Rng,
    ) -> Result<Vec<GeoPoint>, RouteError> {
        if waypoints.len() < 2 {
            return Err(RouteError::TooFewWaypoints(waypoints.len()));
        }
        if !min_distance_m.is_finite() || min_distance_m < 0.0 {
            return Err(RouteError::InvalidScalar {
                what: "minimum distance",
                value: min_distance_m,
            });
        }
        for point in waypoints {
            if !point.lat.is_finite() || !point.lng.is_finite() {
                return Err(RouteError::InvalidScalar {
                    what: "waypoint coordinate",
                    value: if point.lat.is_finite() { point.lng } else { point.lat },
                });
            }
        }

        let mut route = Vec::new();
        for pair in waypoints.windows(2) {
            route.extend(self.synthesizer.synthesize(pair[0], pair[1], rng));
        }

        let mut mileage = total_distance(&route);
        while mileage < min_distance_m {
            let last = route[route.len() - 1];
            let next = last.jitter(self.extension_jitter_deg, rng);
            mileage += last.distance(&next);
            route.push(next);
        }

        Ok(route)
    }
}

/// Cumulative distance over a point sequence, in meters.
pub fn total_distance(path: &[GeoPoint]) -> f64 {
    path.windows(2).map(|pair| pair[0].distance(&pair[1])).sum()
}

/// Assembles a route with default tuning.
pub fn assemble_route(
    waypoints: &[GeoPoint],
    min_distance_m: f64,
    rng: &mut impl Rng,
) -> Result<Vec<GeoPoint>, RouteError> {
    RouteAssembler::new().assemble(waypoints, min_distance_m, rng)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_short_waypoint_list() {
        let mut rng = rand::thread_rng();
        let single = [GeoPoint::new(30.0, 121.0)];

        assert_eq!(
            assemble_route(&[], 100.0, &mut rng),
            Err(RouteError::TooFewWaypoints(0))
        );
        assert_eq!(
            assemble_route(&single, 100.0, &mut rng),
            Err(RouteError::TooFewWaypoints(1))
        );
    }

    #[test]
    fn test_rejects_bad_min_distance() {
        let mut rng = rand::thread_rng();
        let waypoints = [GeoPoint::new(30.0, 121.0), GeoPoint::new(30.004, 121.004)];

        assert!(assemble_route(&waypoints, -1.0, &mut rng).is_err());
        assert!(assemble_route(&waypoints, f64::NAN, &mut rng).is_err());
        assert!(assemble_route(&waypoints, f64::INFINITY, &mut rng).is_err());
    }

    #[test]
    fn test_rejects_non_finite_waypoint() {
        let mut rng = rand::thread_rng();
        let waypoints = [GeoPoint::new(30.0, 121.0), GeoPoint::new(f64::NAN, 121.004)];

        assert!(assemble_route(&waypoints, 100.0, &mut rng).is_err());
    }

    #[test]
    fn test_meets_minimum_distance() {
        let mut rng = rand::thread_rng();
        let waypoints = [GeoPoint::new(30.0, 121.0), GeoPoint::new(30.001, 121.001)];

        // Waypoint geometry alone covers ~150 m; padding must bring the
        // total to the target.
        let route = assemble_route(&waypoints, 500.0, &mut rng).unwrap();
        assert!(total_distance(&route) >= 500.0);
        assert!(route.len() >= 3);
        assert!(route.len() <= 2000);
    }

    #[test]
    fn test_segments_concatenated_with_duplicate_boundary() {
        let mut rng = rand::thread_rng();
        let a = GeoPoint::new(30.0, 121.0);
        let b = GeoPoint::new(30.004, 121.0);
        let c = GeoPoint::new(30.004, 121.004);

        let route = assemble_route(&[a, b, c], 0.0, &mut rng).unwrap();

        // Each segment carries at least its two endpoints, and the shared
        // waypoint is not de-duplicated across the seam.
        assert!(route.len() >= 4);
        assert!((route[0].lat - a.lat).abs() < 2.0 * crate::geo::DEFAULT_JITTER_DEG);
    }

    #[test]
    fn test_zero_minimum_adds_no_padding() {
        let mut rng = rand::thread_rng();
        let a = GeoPoint::new(30.0, 121.0);
        let b = GeoPoint::new(30.002, 121.002);

        let padded = assemble_route(&[a, b], 0.0, &mut rng).unwrap();
        let unpadded_len = padded.len();

        // Re-running can differ in point count, but a zero minimum can never
        // trigger the padding loop, so the tail stays near the last waypoint.
        let last = padded[unpadded_len - 1];
        assert!(last.distance(&b) < 50.0);
    }
}
