use super::types::{RequestOutcome, TabPayload};
use super::TabTarget;
use crate::config::TargetConfig;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};

pub struct TabClient {
    client: Client,
    endpoint: String,
}

impl TabClient {
    pub fn new(config: &TargetConfig) -> Result<Self> {
        // Bounded per phase: a connect timeout surfaces as a connect error.
        let client = Client::builder()
            .connect_timeout(config.timeout())
            .read_timeout(config.timeout())
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn post_tab(&self, url: &str) -> Result<RequestOutcome, reqwest::Error> {
        let resp = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .json(&TabPayload { url })
            .send()
            .await?;

        let status = resp.status();
        if status != StatusCode::OK {
            let body = resp.text().await?;
            return Ok(RequestOutcome::HttpError {
                status: status.as_u16(),
                body,
            });
        }

        Ok(RequestOutcome::Success(resp.json().await?))
    }
}

#[async_trait]
impl TabTarget for TabClient {
    async fn send_url(&self, url: &str) -> RequestOutcome {
        match self.post_tab(url).await {
            Ok(outcome) => outcome,
            Err(e) => RequestOutcome::from_transport_error(e),
        }
    }
}
