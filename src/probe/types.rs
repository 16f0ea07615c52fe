use serde::Serialize;
use serde_json::Value;

/// One URL to report to the receiving service, with the label shown in the console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    pub url: String,
    pub label: String,
}

impl TestCase {
    pub fn new(url: &str, label: &str) -> Self {
        Self {
            url: url.to_string(),
            label: label.to_string(),
        }
    }

    pub fn defaults() -> Vec<TestCase> {
        [
            ("https://zhihu.com/question/123", "zhihu.com"),
            ("https://stackoverflow.com/questions/456", "stackoverflow.com"),
            ("https://github.com/runjuu/InputSourcePro", "github.com"),
            ("https://www.baidu.com", "baidu.com"),
            ("https://www.google.com", "google.com"),
        ]
        .iter()
        .map(|(url, label)| TestCase::new(url, label))
        .collect()
    }
}

/// Body of `POST /tab`.
#[derive(Debug, Clone, Serialize)]
pub struct TabPayload<'a> {
    pub url: &'a str,
}

/// Classification of a single send attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestOutcome {
    Success(Value),
    HttpError { status: u16, body: String },
    ConnectionFailure,
    OtherError(String),
}

impl RequestOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RequestOutcome::Success(_))
    }

    /// Short tag used in log events.
    pub fn kind(&self) -> &'static str {
        match self {
            RequestOutcome::Success(_) => "success",
            RequestOutcome::HttpError { .. } => "http_error",
            RequestOutcome::ConnectionFailure => "connection_failure",
            RequestOutcome::OtherError(_) => "other_error",
        }
    }

    /// Connect failures are reported separately; everything else the transport
    /// raises (timeouts, broken bodies, bad JSON) lands in `OtherError`.
    pub fn from_transport_error(err: reqwest::Error) -> Self {
        if err.is_connect() {
            return RequestOutcome::ConnectionFailure;
        }
        RequestOutcome::OtherError(format!("{:#}", anyhow::Error::new(err)))
    }
}
