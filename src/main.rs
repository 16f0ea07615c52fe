use anyhow::Result;
use std::io;
use tab_probe::config::Config;
use tab_probe::probe::client::TabClient;
use tab_probe::runner::Runner;
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "tab-probe.log";

/// Log to a file so the console only shows the report. Without a writable
/// working directory the run just goes unlogged.
fn init_logging() {
    let Ok(log_file) = std::fs::File::create(LOG_FILE) else {
        return;
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tab_probe=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(log_file)
        .with_ansi(false)
        .init();
}

fn load_config() -> Config {
    let path = Config::resolve_path();
    match Config::load_or_default(&path) {
        Ok(config) => {
            tracing::info!(path = %path.display(), exists = path.exists(), "config resolved");
            config
        }
        Err(e) => {
            let error = format!("{:#}", e);
            eprintln!("  Ignoring config {}: {}", path.display(), error);
            tracing::warn!(path = %path.display(), error = error.as_str(), "bad config, using defaults");
            Config::default()
        }
    }
}

async fn run() -> Result<()> {
    let mut config = load_config();
    config.apply_endpoint_override(Config::endpoint_override());
    let cases = config.test_cases();

    let client = TabClient::new(&config.target)?;
    tracing::info!(
        endpoint = client.endpoint(),
        timeout_ms = config.target.timeout_ms,
        cases = cases.len(),
        "starting probe run"
    );

    let runner = Runner::new(client, &config.run);
    let mut stdout = io::stdout().lock();
    runner.run(&cases, &mut stdout).await?;
    Ok(())
}

/// Always exits 0: failures are reported, never signalled.
#[tokio::main]
async fn main() {
    init_logging();
    if let Err(e) = run().await {
        eprintln!("  Probe aborted: {:#}", e);
        tracing::error!("probe aborted: {:#}", e);
    }
    tracing::debug!("shutting down");
}
