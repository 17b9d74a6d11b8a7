//! Console progress display for the paced wait between start and upload.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use time::OffsetDateTime;

const BAR_WIDTH: usize = 64;
const REFRESH: Duration = Duration::from_millis(100);

/// Renders a progress bar of `width` columns with a centered percentage and
/// the elapsed fraction highlighted in inverse video.
pub fn render_bar(progress: f64, width: usize) -> String {
    let progress = progress.clamp(0.0, 1.0);
    let filled = (progress * width as f64) as usize;

    let pct = format!("{}%", (progress * 100.0) as u32);
    let lead = (width - pct.len()) / 2;
    let mut bar: String = " ".repeat(lead);
    bar.push_str(&pct);
    bar.push_str(&" ".repeat(width - lead - pct.len()));

    let split: usize = bar
        .char_indices()
        .nth(filled)
        .map_or(bar.len(), |(i, _)| i);
    format!("\x1b[1;30;47m{}\x1b[0m{}", &bar[..split], &bar[split..])
}

fn clock_label(ts: OffsetDateTime) -> String {
    format!("{:02}:{:02}", ts.hour(), ts.minute())
}

/// Blocks for `total`, redrawing a progress line every 100 ms.
///
/// A zero or negative remaining time returns immediately; callers compute the
/// wait as (start + duration - now), which can already have elapsed.
pub async fn wait_with_progress(total: Duration) {
    if total.is_zero() {
        return;
    }

    let started = Instant::now();
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    let span = format!("{} -> {}", clock_label(now), clock_label(now + total));
    let total_secs = total.as_secs_f64();

    while started.elapsed() < total {
        let progress = started.elapsed().as_secs_f64() / total_secs;
        let line = format!(
            "{} |{}| {} / {}",
            span,
            render_bar(progress, BAR_WIDTH),
            started.elapsed().as_secs(),
            total.as_secs()
        );
        print!("\r{line}");
        let _ = io::stdout().flush();

        tokio::time::sleep(REFRESH).await;
    }

    println!(
        "\r{} |{}| {} / {}",
        span,
        render_bar(1.0, BAR_WIDTH),
        total.as_secs(),
        total.as_secs()
    );
}
