//! Biased random-walk path synthesis.
//!
//! Produces the point sequence between two endpoints. The walk keeps a
//! directional heading with persistence, so routes come out as runs of steps
//! in the same direction instead of a memoryless zig-zag, which is what
//! recorded pedestrian traces look like.

use rand::Rng;

use crate::geo::{Axis, DEFAULT_JITTER_DEG, GeoPoint};

/// Per-axis convergence threshold in meters.
pub const DEFAULT_TOLERANCE_M: f64 = 25.0;

/// Minimum step magnitude in degrees.
pub const STEP_BASE_DEG: f64 = 5e-5;

/// Uniform span added on top of the minimum step, in degrees.
pub const STEP_SPAN_DEG: f64 = 1e-4;

/// Scale on longitudinal steps that offsets the axis distance-constant
/// asymmetry, keeping lat and lng steps comparable in meters.
pub const LNG_STEP_SCALE: f64 = 1.27;

/// Probability of keeping the current heading when it still points toward
/// the target quadrant.
pub const PERSISTENCE: f64 = 0.75;

/// Directional bias of the walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading {
    LatInc,
    LatDec,
    LngInc,
    LngDec,
}

impl Heading {
    /// The other member of a natural-heading pair.
    fn other(self, pair: (Heading, Heading)) -> Heading {
        if self == pair.0 { pair.1 } else { pair.0 }
    }

    /// Step displacement for this heading, in degrees.
    fn step_vector(self, magnitude_deg: f64) -> GeoPoint {
        match self {
            Heading::LatInc => GeoPoint::new(magnitude_deg, 0.0),
            Heading::LatDec => GeoPoint::new(-magnitude_deg, 0.0),
            Heading::LngInc => GeoPoint::new(0.0, magnitude_deg * LNG_STEP_SCALE),
            Heading::LngDec => GeoPoint::new(0.0, -magnitude_deg * LNG_STEP_SCALE),
        }
    }
}

/// The two headings that move `current` toward the quadrant containing
/// `target`.
pub fn natural_headings(current: &GeoPoint, target: &GeoPoint) -> (Heading, Heading) {
    let lat = if current.lat < target.lat {
        Heading::LatInc
    } else {
        Heading::LatDec
    };
    let lng = if current.lng < target.lng {
        Heading::LngInc
    } else {
        Heading::LngDec
    };
    (lat, lng)
}

/// Directional state of the walk. Once locked the heading is final and the
/// walk converges straight onto the remaining axis.
#[derive(Debug, Clone, Copy)]
enum WalkState {
    Free(Option<Heading>),
    Locked(Heading),
}

/// Generates organic-looking paths between two endpoints.
pub struct PathSynthesizer {
    tolerance_m: f64,
    step_base_deg: f64,
    step_span_deg: f64,
    persistence: f64,
    jitter_radius_deg: f64,
}

impl Default for PathSynthesizer {
    fn default() -> Self {
        Self {
            tolerance_m: DEFAULT_TOLERANCE_M,
            step_base_deg: STEP_BASE_DEG,
            step_span_deg: STEP_SPAN_DEG,
            persistence: PERSISTENCE,
            jitter_radius_deg: DEFAULT_JITTER_DEG,
        }
    }
}

impl PathSynthesizer {
    /// Creates a synthesizer with default tuning.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the per-axis convergence tolerance.
    pub fn with_tolerance(mut self, meters: f64) -> Self {
        self.tolerance_m = meters;
        self
    }

    /// Sets the jitter radius applied to walk points.
    pub fn with_jitter_radius(mut self, degrees: f64) -> Self {
        self.jitter_radius_deg = degrees;
        self
    }

    /// Sets the heading persistence probability.
    pub fn with_persistence(mut self, probability: f64) -> Self {
        self.persistence = probability;
        self
    }

    /// Walks from `start` to `end`, returning the full point sequence
    /// including both endpoints.
    ///
    /// Interior points are jittered twice: once retroactively as the walk
    /// passes them, and once more in the final pass over the whole path.
    /// The doubled noise is how app-recorded traces read; keep it.
    pub fn synthesize(&self, start: GeoPoint, end: GeoPoint, rng: &mut impl Rng) -> Vec<GeoPoint> {
        let mut path = vec![start];
        let mut state = WalkState::Free(None);

        loop {
            let current = path[path.len() - 1];
            let lat_gap = current.axis_distance(&end, Axis::Lat);
            let lng_gap = current.axis_distance(&end, Axis::Lng);
            if lat_gap < self.tolerance_m && lng_gap < self.tolerance_m {
                break;
            }

            let heading = match state {
                WalkState::Locked(h) => h,
                WalkState::Free(prev) => {
                    let (next, locked) = self.choose_heading(prev, &current, &end, lat_gap, lng_gap, rng);
                    state = if locked {
                        WalkState::Locked(next)
                    } else {
                        WalkState::Free(Some(next))
                    };
                    next
                }
            };

            let magnitude = self.step_base_deg + self.step_span_deg * rng.r#gen::<f64>();
            path.push(current + heading.step_vector(magnitude));

            // Noise the point we just walked away from; the fresh point stays
            // clean so the next iteration measures the true remaining gap.
            let prev = path.len() - 2;
            path[prev] = path[prev].jitter(self.jitter_radius_deg, rng);
        }

        path.push(end.jitter(self.jitter_radius_deg, rng));
        path.iter()
            .map(|p| p.jitter(self.jitter_radius_deg, rng))
            .collect()
    }

    /// Picks the next heading. Returns `(heading, locked)`; the heading locks
    /// when exactly one axis is already within tolerance.
    fn choose_heading(
        &self,
        prev: Option<Heading>,
        current: &GeoPoint,
        target: &GeoPoint,
        lat_gap: f64,
        lng_gap: f64,
        rng: &mut impl Rng,
    ) -> (Heading, bool) {
        if lat_gap < self.tolerance_m {
            let h = if current.lng < target.lng {
                Heading::LngInc
            } else {
                Heading::LngDec
            };
            return (h, true);
        }
        if lng_gap < self.tolerance_m {
            let h = if current.lat < target.lat {
                Heading::LatInc
            } else {
                Heading::LatDec
            };
            return (h, true);
        }

        let pair = natural_headings(current, target);
        let next = match prev {
            Some(h) if h == pair.0 || h == pair.1 => {
                if rng.r#gen::<f64>() < self.persistence {
                    h
                } else {
                    h.other(pair)
                }
            }
            _ => {
                if rng.r#gen::<f64>() < 0.5 {
                    pair.0
                } else {
                    pair.1
                }
            }
        };
        (next, false)
    }
}

/// Synthesizes a path with default tuning.
pub fn synthesize_path(start: GeoPoint, end: GeoPoint, rng: &mut impl Rng) -> Vec<GeoPoint> {
    PathSynthesizer::new().synthesize(start, end, rng)
}
