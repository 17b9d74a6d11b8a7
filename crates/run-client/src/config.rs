//! Client configuration.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Either a known student id, or login credentials used to look it up.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Credentials {
    StudentId { student_id: i64 },
    Login { phone_number: String, password: String },
}

/// Full client configuration, loaded from a JSON file.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the run service.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Who is running.
    #[serde(flatten)]
    pub credentials: Credentials,

    /// Label stamped on every uploaded path point.
    #[serde(default = "default_point_label")]
    pub point_label: String,

    /// Minimum mileage the assembled route must reach, in meters.
    #[serde(default = "default_min_distance_m")]
    pub min_distance_m: f64,

    /// Image URL attached to the path upload.
    #[serde(default = "default_path_image")]
    pub path_image: String,

    /// Reported device position when requesting an assignment (lat, lng).
    /// Jittered before use so repeated runs don't start from the exact same
    /// coordinate.
    #[serde(default = "default_start")]
    pub start: (f64, f64),
}

fn default_base_url() -> String {
    "https://run.example-campus.edu.cn".to_string()
}

fn default_point_label() -> String {
    "East China University of Science and Technology Fengxian Campus".to_string()
}

fn default_min_distance_m() -> f64 {
    2250.0
}

fn default_path_image() -> String {
    "https://run.example-campus.edu.cn/static/images/red-logo.png".to_string()
}

fn default_start() -> (f64, f64) {
    (30.833179, 121.505558)
}

impl ClientConfig {
    /// Loads configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}
