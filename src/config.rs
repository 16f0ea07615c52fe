use crate::probe::types::TestCase;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILE: &str = "tab-probe.toml";
pub const CONFIG_ENV: &str = "TAB_PROBE_CONFIG";
pub const ENDPOINT_ENV: &str = "TAB_PROBE_ENDPOINT";

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:43219/tab";
const DEFAULT_TIMEOUT_MS: u64 = 5000;
const DEFAULT_PAUSE_MS: u64 = 2000;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub target: TargetConfig,
    #[serde(default)]
    pub run: RunConfig,
    #[serde(default)]
    pub cases: Vec<CaseConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TargetConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}
fn default_timeout_ms() -> u64 { DEFAULT_TIMEOUT_MS }

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl TargetConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct RunConfig {
    #[serde(default = "default_pause_ms")]
    pub pause_after_success_ms: u64,
    /// Pause after a success on the final case too.
    #[serde(default = "default_true")]
    pub pause_after_last: bool,
}

fn default_pause_ms() -> u64 { DEFAULT_PAUSE_MS }
fn default_true() -> bool { true }

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            pause_after_success_ms: DEFAULT_PAUSE_MS,
            pause_after_last: true,
        }
    }
}

impl RunConfig {
    pub fn pause(&self) -> Duration {
        Duration::from_millis(self.pause_after_success_ms)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct CaseConfig {
    pub url: String,
    pub label: String,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        // Strip BOM if present (common on Windows-created files)
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        toml::from_str(content).with_context(|| "Failed to parse config TOML")
    }

    /// Like `load`, but a missing file yields the built-in defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// `TAB_PROBE_CONFIG` if set and non-empty, otherwise `tab-probe.toml` in the working directory.
    pub fn resolve_path() -> PathBuf {
        match std::env::var(CONFIG_ENV) {
            Ok(p) if !p.trim().is_empty() => PathBuf::from(p.trim()),
            _ => PathBuf::from(CONFIG_FILE),
        }
    }

    /// `TAB_PROBE_ENDPOINT` wins over both the file and the default.
    pub fn endpoint_override() -> Option<String> {
        std::env::var(ENDPOINT_ENV)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    pub fn apply_endpoint_override(&mut self, endpoint: Option<String>) {
        if let Some(endpoint) = endpoint {
            self.target.endpoint = endpoint;
        }
    }

    /// Configured cases, or the built-in list when none are given.
    pub fn test_cases(&self) -> Vec<TestCase> {
        if self.cases.is_empty() {
            return TestCase::defaults();
        }
        self.cases
            .iter()
            .map(|c| TestCase::new(&c.url, &c.label))
            .collect()
    }
}
