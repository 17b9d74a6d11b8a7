//! Reporting client around the route-synthesis core.
//!
//! Handles everything the core deliberately does not: configuration loading,
//! session acquisition, HTTP transport with retry, console progress while the
//! run "happens", wake-lock handling, and the upload of the finished record.

pub mod api;
pub mod config;
pub mod progress;
pub mod types;
pub mod wake;
pub mod workflow;

pub use api::{ApiClient, ApiError};
pub use config::{ClientConfig, ConfigError, Credentials};
pub use wake::{NoopWakeLock, WakeLock};
