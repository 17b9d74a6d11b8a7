//! End-to-end run workflow: session, synthesis, paced wait, upload.

use std::time::{Duration, Instant};

use rand::Rng;
use time::OffsetDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use tracing::info;

use routegen::prelude::*;

use crate::api::ApiClient;
use crate::config::{ClientConfig, Credentials};
use crate::progress::wait_with_progress;
use crate::types::{RunAssignment, RunSummary};
use crate::wake::{self, WakeLock};

/// Jitter applied to the configured device position before requesting an
/// assignment, in degrees.
const START_JITTER_DEG: f64 = 1e-3;

/// The server formats timestamps without zero padding.
const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
    "[year]-[month padding:none]-[day padding:none] \
     [hour padding:none]:[minute padding:none]:[second padding:none]"
);

/// Formats a timestamp the way the record endpoints expect it.
pub fn format_timestamp(ts: OffsetDateTime) -> String {
    ts.format(&TIMESTAMP_FORMAT).unwrap_or_default()
}

/// Builds the waypoint loop for an assignment: start, each pass point in
/// order, then back to the start.
pub fn waypoint_loop(assignment: &RunAssignment) -> Vec<GeoPoint> {
    let start = GeoPoint::new(assignment.lat, assignment.lng);
    let mut waypoints = Vec::with_capacity(assignment.pass_points.len() + 2);
    waypoints.push(start);
    waypoints.extend(
        assignment
            .pass_points
            .iter()
            .map(|p| GeoPoint::new(p.lat, p.lng)),
    );
    waypoints.push(start);
    waypoints
}

fn now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

/// Runs the full workflow once: acquire a session, fetch the assignment,
/// synthesize and pace the route, wait out the run, and upload the record.
pub async fn run(
    config: &ClientConfig,
    wake_lock: &dyn WakeLock,
    rng: &mut impl Rng,
) -> anyhow::Result<()> {
    let _wake = wake::hold(wake_lock);

    let api = ApiClient::new(config.base_url.clone())?;

    let device_position =
        GeoPoint::new(config.start.0, config.start.1).jitter(START_JITTER_DEG, rng);

    let student_id = match &config.credentials {
        Credentials::StudentId { student_id } => *student_id,
        Credentials::Login {
            phone_number,
            password,
        } => api.login(phone_number, password).await?,
    };
    info!("Student ID: {student_id}");

    // The app fetches the profile when the running screen opens.
    api.user_info(student_id).await?;

    let assignment = api
        .assignment(device_position.lat, device_position.lng, student_id)
        .await?;
    let names: Vec<&str> = assignment
        .pass_points
        .iter()
        .map(|p| p.point_name.as_str())
        .collect();
    info!("Pass points: {}", names.join(", "));

    let record_id = api.create_line(student_id, &assignment.pass_points).await?;
    info!("Record ID: {record_id}");

    let start_time = now();
    let started = Instant::now();
    info!("Start time: {}", format_timestamp(start_time));

    let route = assemble_route(&waypoint_loop(&assignment), config.min_distance_m, rng)?;
    let mileage = total_distance(&route);
    info!("Mileage: {mileage:.1} m over {} points", route.len());

    let estimate = compute_pace(mileage, rng)?;
    info!("Running time: {:.1} s", estimate.duration_secs);
    info!("Step count: {:.0}", estimate.step_count);

    // Deliver in real time: the record is only plausible if the upload lands
    // a run's worth of wall clock after the line was created.
    let remaining =
        Duration::from_secs_f64(estimate.duration_secs).saturating_sub(started.elapsed());
    wait_with_progress(remaining).await;

    let end_time = now();
    let last = route[route.len() - 1];
    let summary = RunSummary {
        id: student_id.to_string(),
        student_id: student_id.to_string(),
        running_time: estimate.duration_secs as i64,
        record_id: record_id.to_string(),
        mileage: mileage as i64,
        pass_point: assignment.pass_points.len(),
        start_time: format_timestamp(start_time),
        step_count: estimate.step_count,
        end_time: format_timestamp(end_time),
        lat: last.lat,
        lng: last.lng,
        pace: if mileage > 0.0 {
            (estimate.duration_secs / mileage) as i64
        } else {
            0
        },
    };
    api.update_record(&summary).await?;

    let points = format_route(&route, &config.point_label);
    api.upload_path(record_id, &config.path_image, &points).await?;

    tokio::time::sleep(Duration::from_secs_f64(1.5)).await;
    let record = api.record_info(record_id).await?;
    info!("Record info:\n{}", serde_json::to_string_pretty(&record)?);

    Ok(())
}
