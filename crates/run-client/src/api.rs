//! HTTP transport and session handling for the run service.
//!
//! Every request funnels through a retry wrapper: three attempts with a
//! lengthening pause between them, matching how the app behaves on a flaky
//! campus network. Bodies are serialized compactly up front so the
//! `Content-Length` the server checks covers the exact bytes sent.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use routegen::PathPoint;

use crate::types::{
    CreateLineRequest, LoginRequest, PassPoint, RunAssignment, RunSummary, UploadPathRequest,
    i64_from_value,
};

/// User agent string the server expects from the mobile app.
const USER_AGENT: &str = "chunTianChuangFu/1.1.9 (iPhone; iOS 16.3.1; Scale/3.00)";

const MAX_ATTEMPTS: u32 = 3;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0} failed after {MAX_ATTEMPTS} attempts")]
    RetriesExhausted(String),
    #[error("login rejected: {0}")]
    LoginRejected(String),
    #[error("unexpected response shape from {endpoint}: {body}")]
    UnexpectedResponse { endpoint: String, body: String },
}

/// Client for the campus run API.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a client for the given base URL with the app's header set.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert("Lan", HeaderValue::from_static("CH"));
        headers.insert("Accept", HeaderValue::from_static("*/*"));
        headers.insert(
            "Accept-Language",
            HeaderValue::from_static("en-US;q=1, zh-Hans-US;q=0.9, zh-Hant-TW;q=0.8, ja-US;q=0.7"),
        );

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// Logs in and returns the student id.
    pub async fn login(&self, phone: &str, password: &str) -> Result<i64, ApiError> {
        let body = self
            .post_json("/api/userLogin/", &LoginRequest { iphone: phone, password })
            .await?;

        body.get("data")
            .and_then(|data| data.get("id"))
            .and_then(i64_from_value)
            .ok_or_else(|| ApiError::LoginRejected(body.to_string()))
    }

    /// Fetches the user profile. The app requests this when the running
    /// interface opens; the response is not needed beyond session warm-up.
    pub async fn user_info(&self, student_id: i64) -> Result<Value, ApiError> {
        self.get_json(&format!("/api/getUserInfo/?id={student_id}"))
            .await
    }

    /// Fetches the run assignment: start coordinate plus ordered pass points.
    pub async fn assignment(
        &self,
        lat: f64,
        lng: f64,
        student_id: i64,
    ) -> Result<RunAssignment, ApiError> {
        let path =
            format!("/tapi/activity/randrunInfo?lat={lat:.6}&lng={lng:.6}&student_id={student_id}");
        let body = self.get_json(&path).await?;
        Ok(serde_json::from_value(body)?)
    }

    /// Registers the assigned line and returns the record id for this run.
    pub async fn create_line(
        &self,
        student_id: i64,
        pass_points: &[PassPoint],
    ) -> Result<i64, ApiError> {
        let request = CreateLineRequest {
            student_id: student_id.to_string(),
            pass_point: pass_points,
        };
        let body = self.post_json("/api/createLine/", &request).await?;

        body.get("data")
            .and_then(|data| data.get("record_id"))
            .and_then(i64_from_value)
            .ok_or_else(|| ApiError::UnexpectedResponse {
                endpoint: "/api/createLine/".to_string(),
                body: body.to_string(),
            })
    }

    /// Uploads the finished-run summary.
    pub async fn update_record(&self, summary: &RunSummary) -> Result<(), ApiError> {
        self.post_json("/api/updateRecord/", summary).await?;
        Ok(())
    }

    /// Uploads the full path-point trace for a record.
    pub async fn upload_path(
        &self,
        record_id: i64,
        path_image: &str,
        points: &[PathPoint],
    ) -> Result<(), ApiError> {
        let request = UploadPathRequest {
            path_image,
            record_id: record_id.to_string(),
            path_point: points,
        };
        self.post_json("/api/uploadPathPoint", &request).await?;
        Ok(())
    }

    /// Fetches the server-side view of a finished record.
    pub async fn record_info(&self, record_id: i64) -> Result<Value, ApiError> {
        self.get_json(&format!("/api/recordInfo/?id={record_id}"))
            .await
    }

    async fn get_json(&self, path: &str) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .send_with_retry(self.http.get(&url), path)
            .await?;
        Ok(response.json().await?)
    }

    async fn post_json<T: Serialize>(&self, path: &str, body: &T) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.base_url, path);

        // Compact serialization, done once: the byte count reqwest reports in
        // Content-Length must match what the server recomputes.
        let payload = serde_json::to_string(body)?;

        let builder = self
            .http
            .post(&url)
            .header("Content-Type", "application/json")
            .body(payload);

        let response = self.send_with_retry(builder, path).await?;
        Ok(response.json().await?)
    }

    /// Sends a request up to [`MAX_ATTEMPTS`] times, pausing 1.5 + 2i seconds
    /// after the i-th failure. Non-200 statuses and transport errors both
    /// count as failures.
    async fn send_with_retry(
        &self,
        builder: reqwest::RequestBuilder,
        what: &str,
    ) -> Result<reqwest::Response, ApiError> {
        info!("Request: {what}");

        for attempt in 1..=MAX_ATTEMPTS {
            let request = builder
                .try_clone()
                .ok_or_else(|| ApiError::RetriesExhausted(what.to_string()))?;

            match request.send().await {
                Ok(response) if response.status() == StatusCode::OK => {
                    debug!("{what} succeeded on attempt {attempt}");
                    return Ok(response);
                }
                Ok(response) => {
                    warn!("{what} returned status {} on attempt {attempt}", response.status());
                }
                Err(e) => {
                    warn!("{what} failed on attempt {attempt}: {e}");
                }
            }

            tokio::time::sleep(Duration::from_secs_f64(1.5 + 2.0 * attempt as f64)).await;
        }

        Err(ApiError::RetriesExhausted(what.to_string()))
    }
}
