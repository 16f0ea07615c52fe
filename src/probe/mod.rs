pub mod client;
pub mod types;

use async_trait::async_trait;
use types::RequestOutcome;

#[async_trait]
pub trait TabTarget: Send + Sync {
    /// Report `url` as the active tab. Never fails: every error is folded into the outcome.
    async fn send_url(&self, url: &str) -> RequestOutcome;
}
