// Console output for a probe run. Everything here is plain text for a human
// watching the terminal; structured events go to the log file instead.

use crate::probe::types::{RequestOutcome, TestCase};
use crate::runner::RunSummary;
use std::io::{self, Write};
use std::time::Duration;

pub const BANNER: &str = "=== Input Source Manager URL receiver test ===";

const NOTES: [&str; 3] = [
    "- If you see 'Connection failed', start Input Source Manager first",
    "- After a successful send, the manager switches input source according to the site rules",
    "- Rules can be viewed and managed on the 'Rules' page of the main window",
];

pub fn write_banner(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{}", BANNER)?;
    writeln!(out)?;
    writeln!(out, "Starting tests...")?;
    writeln!(out)
}

/// `index` is 1-based.
pub fn write_case_header(out: &mut impl Write, index: usize, case: &TestCase) -> io::Result<()> {
    writeln!(out, "Test {}: {}", index, case.label)
}

pub fn write_outcome(out: &mut impl Write, case: &TestCase, outcome: &RequestOutcome) -> io::Result<()> {
    match outcome {
        RequestOutcome::Success(body) => {
            writeln!(out, "✅ Sent URL: {}", case.label)?;
            writeln!(out, "   Response: {}", body)
        }
        RequestOutcome::HttpError { status, body } => {
            writeln!(out, "❌ Send failed: HTTP {}", status)?;
            writeln!(out, "   Response: {}", body)
        }
        RequestOutcome::ConnectionFailure => {
            writeln!(out, "❌ Connection failed: make sure Input Source Manager is running")
        }
        RequestOutcome::OtherError(msg) => writeln!(out, "❌ Send error: {}", msg),
    }
}

pub fn write_pause(out: &mut impl Write, pause: Duration) -> io::Result<()> {
    writeln!(out, "   Waiting {}...", describe_pause(pause))
}

pub fn write_footer(out: &mut impl Write, summary: &RunSummary) -> io::Result<()> {
    writeln!(out, "Tests complete!")?;
    writeln!(
        out,
        "Results: {} succeeded, {} HTTP errors, {} connection failures, {} other errors",
        summary.succeeded, summary.http_errors, summary.connection_failures, summary.other_errors
    )?;
    writeln!(out)?;
    writeln!(out, "Notes:")?;
    for note in NOTES {
        writeln!(out, "{}", note)?;
    }
    Ok(())
}

/// "2 seconds" for whole seconds, "250 ms" otherwise.
pub fn describe_pause(pause: Duration) -> String {
    if pause.subsec_millis() == 0 {
        match pause.as_secs() {
            1 => "1 second".to_string(),
            n => format!("{} seconds", n),
        }
    } else {
        format!("{} ms", pause.as_millis())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_success_lines() {
        let case = TestCase::new("https://zhihu.com/question/123", "zhihu.com");
        let outcome = RequestOutcome::Success(json!({"success": true, "domain": "zhihu.com"}));
        let text = render(|out| write_outcome(out, &case, &outcome));
        assert_eq!(
            text,
            "✅ Sent URL: zhihu.com\n   Response: {\"domain\":\"zhihu.com\",\"success\":true}\n"
        );
    }

    #[test]
    fn test_failure_lines() {
        let case = TestCase::new("https://www.google.com", "google.com");

        let http = RequestOutcome::HttpError { status: 404, body: "Not found".into() };
        assert_eq!(
            render(|out| write_outcome(out, &case, &http)),
            "❌ Send failed: HTTP 404\n   Response: Not found\n"
        );

        let refused = render(|out| write_outcome(out, &case, &RequestOutcome::ConnectionFailure));
        assert!(refused.starts_with("❌ Connection failed"));

        let other = RequestOutcome::OtherError("operation timed out".into());
        assert_eq!(
            render(|out| write_outcome(out, &case, &other)),
            "❌ Send error: operation timed out\n"
        );
    }

    #[test]
    fn test_case_header_is_one_based_label() {
        let case = TestCase::new("https://www.baidu.com", "baidu.com");
        assert_eq!(render(|out| write_case_header(out, 4, &case)), "Test 4: baidu.com\n");
    }

    #[test]
    fn test_describe_pause() {
        assert_eq!(describe_pause(Duration::from_secs(2)), "2 seconds");
        assert_eq!(describe_pause(Duration::from_secs(1)), "1 second");
        assert_eq!(describe_pause(Duration::from_millis(250)), "250 ms");
        assert_eq!(describe_pause(Duration::from_millis(1500)), "1500 ms");
    }

    #[test]
    fn test_footer_tallies_and_notes() {
        let summary = RunSummary {
            succeeded: 4,
            http_errors: 1,
            ..RunSummary::start()
        };
        let text = render(|out| write_footer(out, &summary));
        assert!(text.starts_with("Tests complete!\n"));
        assert!(text.contains(
            "Results: 4 succeeded, 1 HTTP errors, 0 connection failures, 0 other errors"
        ));
        assert!(text.trim_end().ends_with("'Rules' page of the main window"));
    }
}
