//! Flat-earth coordinate primitives.
//!
//! Distances use fixed empirical meters-per-degree constants measured for the
//! campus region rather than a latitude-aware formula. The approximation is
//! only valid inside a small bounding area, which is the whole operating
//! domain here.

use std::ops::Add;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Meters per degree of latitude in the reference region.
pub const METERS_PER_DEGREE_LAT: f64 = 87_622.794_444_444_44;

/// Meters per degree of longitude in the reference region.
pub const METERS_PER_DEGREE_LNG: f64 = 111_194.925;

/// Scale applied to the longitudinal component of a jitter offset so the
/// displacement comes out near-isotropic in meters despite being drawn in
/// degree space.
pub const LNG_JITTER_SCALE: f64 = 8.0 / 11.0;

/// Default jitter radius in degrees, sized to look like consumer GPS noise.
pub const DEFAULT_JITTER_DEG: f64 = 1e-4;

/// Coordinate axis selector for single-axis distances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Lat,
    Lng,
}

/// A coordinate pair in decimal degrees. Immutable: every transformation
/// returns a new point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Euclidean distance to `other` in meters.
    pub fn distance(&self, other: &GeoPoint) -> f64 {
        let x = (self.lat - other.lat) * METERS_PER_DEGREE_LAT;
        let y = (self.lng - other.lng) * METERS_PER_DEGREE_LNG;
        x.hypot(y)
    }

    /// Absolute distance to `other` along a single axis, in meters.
    pub fn axis_distance(&self, other: &GeoPoint, axis: Axis) -> f64 {
        match axis {
            Axis::Lat => ((self.lat - other.lat) * METERS_PER_DEGREE_LAT).abs(),
            Axis::Lng => ((self.lng - other.lng) * METERS_PER_DEGREE_LNG).abs(),
        }
    }

    /// Returns a copy of this point displaced by a random offset.
    ///
    /// The angle is uniform over [0, 2π). The magnitude is the larger of two
    /// independent uniform draws scaled by `radius_deg`, which concentrates
    /// offsets toward the outer rim instead of sampling the disk uniformly.
    /// The degree-space displacement never exceeds `radius_deg`.
    pub fn jitter(&self, radius_deg: f64, rng: &mut impl Rng) -> GeoPoint {
        let angle = rng.gen_range(0.0..std::f64::consts::TAU);
        let r = f64::max(rng.r#gen(), rng.r#gen()) * radius_deg;
        GeoPoint::new(
            self.lat + r * angle.cos(),
            self.lng + r * angle.sin() * LNG_JITTER_SCALE,
        )
    }
}

impl Add for GeoPoint {
    type Output = GeoPoint;

    fn add(self, other: GeoPoint) -> GeoPoint {
        GeoPoint::new(self.lat + other.lat, self.lng + other.lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_symmetric() {
        let a = GeoPoint::new(30.833, 121.505);
        let b = GeoPoint::new(30.837, 121.509);

        assert_eq!(a.distance(&b), b.distance(&a));
        assert_eq!(a.axis_distance(&b, Axis::Lat), b.axis_distance(&a, Axis::Lat));
        assert_eq!(a.axis_distance(&b, Axis::Lng), b.axis_distance(&a, Axis::Lng));
    }

    #[test]
    fn test_distance_zero_iff_identical() {
        let a = GeoPoint::new(30.833, 121.505);
        assert_eq!(a.distance(&a), 0.0);

        let b = GeoPoint::new(30.833, 121.505001);
        assert!(a.distance(&b) > 0.0);
    }

    #[test]
    fn test_distance_one_degree() {
        let a = GeoPoint::new(30.0, 121.0);
        let lat = GeoPoint::new(31.0, 121.0);
        let lng = GeoPoint::new(30.0, 122.0);

        assert!((a.distance(&lat) - METERS_PER_DEGREE_LAT).abs() < 1e-6);
        assert!((a.distance(&lng) - METERS_PER_DEGREE_LNG).abs() < 1e-6);
    }

    #[test]
    fn test_add_componentwise() {
        let sum = GeoPoint::new(30.0, 121.0) + GeoPoint::new(0.001, -0.002);
        assert!((sum.lat - 30.001).abs() < 1e-12);
        assert!((sum.lng - 120.998).abs() < 1e-12);
    }

    #[test]
    fn test_jitter_within_radius() {
        let origin = GeoPoint::new(30.833, 121.505);
        let radius = DEFAULT_JITTER_DEG;
        let mut rng = rand::thread_rng();

        for _ in 0..10_000 {
            let shifted = origin.jitter(radius, &mut rng);
            let dlat = shifted.lat - origin.lat;
            let dlng = shifted.lng - origin.lng;
            assert!(dlat.hypot(dlng) <= radius);
        }
    }

    #[test]
    fn test_jitter_skewed_outward() {
        // max of two uniforms has mean 2/3, so the average offset magnitude
        // should sit well above the 1/2 a single uniform draw would give.
        let origin = GeoPoint::new(30.833, 121.505);
        let radius = 1e-3;
        let mut rng = rand::thread_rng();

        let mut total = 0.0;
        let samples = 20_000;
        for _ in 0..samples {
            let shifted = origin.jitter(radius, &mut rng);
            let dlat = shifted.lat - origin.lat;
            // Undo the anisotropy scale to recover the drawn magnitude.
            let dlng = (shifted.lng - origin.lng) / LNG_JITTER_SCALE;
            total += dlat.hypot(dlng);
        }

        let mean = total / samples as f64;
        assert!(mean > 0.6 * radius, "mean magnitude {mean} not skewed outward");
    }

    #[test]
    fn test_jitter_zero_radius() {
        let origin = GeoPoint::new(30.833, 121.505);
        let mut rng = rand::thread_rng();

        let shifted = origin.jitter(0.0, &mut rng);
        assert_eq!(shifted, origin);
    }
}
