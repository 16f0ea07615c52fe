use crate::config::RunConfig;
use crate::probe::types::{RequestOutcome, TestCase};
use crate::probe::TabTarget;
use crate::report;
use chrono::{DateTime, Utc};
use std::io::{self, Write};
use std::time::Duration;

/// Tally of one run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub succeeded: usize,
    pub http_errors: usize,
    pub connection_failures: usize,
    pub other_errors: usize,
    pub pauses: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl RunSummary {
    pub fn start() -> Self {
        Self {
            succeeded: 0,
            http_errors: 0,
            connection_failures: 0,
            other_errors: 0,
            pauses: 0,
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    pub fn record(&mut self, outcome: &RequestOutcome) {
        match outcome {
            RequestOutcome::Success(_) => self.succeeded += 1,
            RequestOutcome::HttpError { .. } => self.http_errors += 1,
            RequestOutcome::ConnectionFailure => self.connection_failures += 1,
            RequestOutcome::OtherError(_) => self.other_errors += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.succeeded + self.http_errors + self.connection_failures + self.other_errors
    }

    pub fn failed(&self) -> usize {
        self.total() - self.succeeded
    }
}

/// Sends each case in turn and reports as it goes. Requests are strictly
/// sequential; a success is followed by a fixed pause.
pub struct Runner<T: TabTarget> {
    target: T,
    pause: Duration,
    pause_after_last: bool,
}

impl<T: TabTarget> Runner<T> {
    pub fn new(target: T, run: &RunConfig) -> Self {
        Self {
            target,
            pause: run.pause(),
            pause_after_last: run.pause_after_last,
        }
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    /// Run every case, writing the console report to `out`. Only a failed
    /// write can make this return early; request failures are part of the summary.
    pub async fn run(&self, cases: &[TestCase], out: &mut impl Write) -> io::Result<RunSummary> {
        let mut summary = RunSummary::start();
        report::write_banner(out)?;

        for (i, case) in cases.iter().enumerate() {
            let index = i + 1;
            report::write_case_header(out, index, case)?;
            out.flush()?;

            let outcome = self.target.send_url(&case.url).await;
            summary.record(&outcome);
            log_outcome(index, case, &outcome);
            report::write_outcome(out, case, &outcome)?;

            let is_last = index == cases.len();
            if outcome.is_success() && (self.pause_after_last || !is_last) {
                report::write_pause(out, self.pause)?;
                out.flush()?;
                tracing::debug!(index, pause_ms = self.pause.as_millis() as u64, "pausing after success");
                tokio::time::sleep(self.pause).await;
                summary.pauses += 1;
            }

            writeln!(out)?;
        }

        summary.finished_at = Some(Utc::now());
        report::write_footer(out, &summary)?;
        out.flush()?;

        tracing::info!(
            total = summary.total(),
            succeeded = summary.succeeded,
            failed = summary.failed(),
            pauses = summary.pauses,
            started_at = %summary.started_at,
            "run finished"
        );
        Ok(summary)
    }
}

fn log_outcome(index: usize, case: &TestCase, outcome: &RequestOutcome) {
    let label = case.label.as_str();
    let kind = outcome.kind();
    match outcome {
        RequestOutcome::Success(body) => {
            tracing::info!(index, label, kind, body = %body, "tab URL accepted");
        }
        RequestOutcome::HttpError { status, body } => {
            tracing::warn!(index, label, kind, status, body = body.as_str(), "tab URL rejected");
        }
        RequestOutcome::ConnectionFailure => {
            tracing::warn!(index, label, kind, "receiver not reachable");
        }
        RequestOutcome::OtherError(msg) => {
            tracing::warn!(index, label, kind, error = msg.as_str(), "tab URL send failed");
        }
    }
}
