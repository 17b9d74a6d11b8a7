//! Synthetic jogging-route generation.
//!
//! This crate turns an ordered list of waypoints into a point sequence that
//! resembles a hand-carried GPS trace, plus the timing statistics a real run
//! would produce. It is pure and synchronous: no I/O, no clocks, and every
//! entry point takes the random source from the caller.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use routegen::prelude::*;
//!
//! let mut rng = rand::thread_rng();
//! let gate = GeoPoint::new(30.833, 121.505);
//! let field = GeoPoint::new(30.837, 121.509);
//!
//! let route = assemble_route(&[gate, field, gate], 2250.0, &mut rng)?;
//! let pace = compute_pace(total_distance(&route), &mut rng)?;
//! let records = format_route(&route, "Fengxian Campus");
//! ```

pub mod error;
pub mod format;
pub mod geo;
pub mod pace;
pub mod route;
pub mod walk;

pub use error::RouteError;
pub use format::{PathPoint, format_route};
pub use geo::{Axis, GeoPoint};
pub use pace::{PaceEstimate, compute_pace};
pub use route::{RouteAssembler, assemble_route, total_distance};
pub use walk::{Heading, PathSynthesizer, synthesize_path};

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::error::RouteError;
    pub use crate::format::{PathPoint, format_route};
    pub use crate::geo::{Axis, GeoPoint};
    pub use crate::pace::{PaceEstimate, compute_pace};
    pub use crate::route::{RouteAssembler, assemble_route, total_distance};
    pub use crate::walk::{Heading, PathSynthesizer, synthesize_path};
}
