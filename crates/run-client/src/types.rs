//! Wire types for the campus run API.
//!
//! The server is loose with scalar types: coordinates and ids come back as
//! numbers or strings depending on the endpoint. Deserializers here accept
//! both.

use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::Value;

/// Accepts a float encoded as a JSON number or string.
pub fn f64_lenient<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumOrStr {
        Num(f64),
        Str(String),
    }

    match NumOrStr::deserialize(deserializer)? {
        NumOrStr::Num(n) => Ok(n),
        NumOrStr::Str(s) => s.trim().parse().map_err(de::Error::custom),
    }
}

/// Extracts an i64 from a JSON value that may hold a number or a numeric
/// string.
pub fn i64_from_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// One assigned pass point. Unknown fields are retained so the point can be
/// echoed back verbatim when the line is created.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PassPoint {
    #[serde(deserialize_with = "f64_lenient")]
    pub lat: f64,
    #[serde(deserialize_with = "f64_lenient")]
    pub lng: f64,
    pub point_name: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Assignment returned when entering the running interface: the start
/// coordinate plus the pass points the route must visit, in order.
#[derive(Debug, Clone, Deserialize)]
pub struct RunAssignment {
    #[serde(deserialize_with = "f64_lenient")]
    pub lat: f64,
    #[serde(deserialize_with = "f64_lenient")]
    pub lng: f64,
    #[serde(rename = "data")]
    pub pass_points: Vec<PassPoint>,
}

/// Login request body.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub iphone: &'a str,
    pub password: &'a str,
}

/// Line-creation request body. Pass points are echoed exactly as assigned.
#[derive(Debug, Serialize)]
pub struct CreateLineRequest<'a> {
    pub student_id: String,
    pub pass_point: &'a [PassPoint],
}

/// Finished-run summary posted when the run "stops".
///
/// Field types mirror what the app sends: ids as strings, times and mileage
/// truncated to whole numbers, `pace` as whole seconds per meter (which
/// truncates to zero for any plausible run; the server expects exactly that).
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub id: String,
    pub student_id: String,
    pub running_time: i64,
    pub record_id: String,
    pub mileage: i64,
    pub pass_point: usize,
    pub start_time: String,
    pub step_count: f64,
    pub end_time: String,
    pub lat: f64,
    pub lng: f64,
    pub pace: i64,
}

/// Path-upload request body.
#[derive(Debug, Serialize)]
pub struct UploadPathRequest<'a> {
    pub path_image: &'a str,
    pub record_id: String,
    pub path_point: &'a [routegen::PathPoint],
}
