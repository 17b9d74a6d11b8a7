//! Error types for route synthesis.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum RouteError {
    #[error("waypoint list needs at least 2 entries, got {0}")]
    TooFewWaypoints(usize),

    #[error("{what} must be finite and non-negative, got {value}")]
    InvalidScalar { what: &'static str, value: f64 },
}
