use std::time::Duration;

use log::{info, warn};

use crate::ports::{ColorSensor, StatusDisplay, Transport};
use crate::sample::ColorReport;

/// Fixed reporting cadence.
pub const REPORT_INTERVAL: Duration = Duration::from_millis(5_000);

/// Result of one reporting check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutcome {
    /// The interval has not elapsed yet; nothing was done.
    Skipped,
    /// Upload accepted with the given 2xx status (the backend replies 201).
    Sent(u16),
    /// Sensor, transport or server refused; the sample is discarded and the
    /// next interval tries again with a fresh one.
    SendFailed(String),
}

/// Runs the acquire/render/upload cycle at a fixed cadence.
///
/// Owns the cadence state: `last_sent` only ever moves forward, and is
/// advanced exactly once per fired cycle, before any I/O, so a slow or
/// failing upload can never cause a burst of repeated attempts.
pub struct SampleReporter {
    server_url: String,
    interval: Duration,
    last_sent: Duration,
}

impl SampleReporter {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
            interval: REPORT_INTERVAL,
            last_sent: Duration::ZERO,
        }
    }

    pub fn last_sent(&self) -> Duration {
        self.last_sent
    }

    /// No-op unless `now - last_sent >= interval`. When the cycle fires it
    /// acquires one sample, renders it (always, regardless of the upload
    /// outcome), and performs exactly one POST. No retry within the cycle.
    pub fn maybe_run_cycle(
        &mut self,
        now: Duration,
        sensor: &mut impl ColorSensor,
        display: &mut impl StatusDisplay,
        transport: &mut impl Transport,
    ) -> ReportOutcome {
        if now.saturating_sub(self.last_sent) < self.interval {
            return ReportOutcome::Skipped;
        }
        self.last_sent = now;

        let sample = match sensor.read_sample() {
            Ok(sample) => sample,
            Err(e) => {
                warn!("sensor read failed: {e:#}");
                return ReportOutcome::SendFailed(format!("sensor: {e:#}"));
            }
        };

        display.render(&sample.display_lines());

        let report = ColorReport::from(&sample);
        let body = match serde_json::to_vec(&report) {
            Ok(body) => body,
            Err(e) => return ReportOutcome::SendFailed(format!("encode: {e}")),
        };

        let outcome = match transport.post_json(&self.server_url, &body) {
            Ok(status) if (200..300).contains(&status) => ReportOutcome::Sent(status),
            Ok(status) => ReportOutcome::SendFailed(format!("status {status}")),
            Err(e) => ReportOutcome::SendFailed(format!("{e:#}")),
        };

        match &outcome {
            ReportOutcome::Sent(status) => info!("POST status: {status}"),
            ReportOutcome::SendFailed(reason) => warn!("upload failed: {reason}"),
            ReportOutcome::Skipped => {}
        }
        outcome
    }
}
