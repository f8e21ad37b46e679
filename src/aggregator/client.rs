// src/aggregator/client.rs
use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::Value;
use tracing::{info, warn};

use super::normalize::{self, EntryOutcome};
use crate::store::Job;

/// Client for the third-party job source. The fetch is bounded by the
/// configured timeout and never fails a search request: every error path
/// degrades to an empty external result set.
pub struct ExternalSourceClient {
    client: Client,
    source_url: String,
}

impl ExternalSourceClient {
    pub fn new(source_url: String, timeout_seconds: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, source_url })
    }

    /// Fetch and normalize the external source. Malformed entries are
    /// skipped with a warning; a failed fetch yields an empty list.
    pub async fn fetch(&self) -> Vec<Job> {
        let payload = match self.fetch_payload().await {
            Ok(payload) => payload,
            Err(e) => {
                warn!(
                    "External source fetch failed, continuing with local results only: {:#}",
                    e
                );
                return Vec::new();
            }
        };

        let mut jobs = Vec::new();
        for outcome in normalize::normalize_payload(&payload) {
            match outcome {
                EntryOutcome::Normalized(job) => jobs.push(job),
                EntryOutcome::Skipped { reason } => {
                    warn!("Skipping external job entry: {}", reason)
                }
            }
        }

        info!(
            "Normalized {} job(s) from external source {}",
            jobs.len(),
            self.source_url
        );
        jobs
    }

    async fn fetch_payload(&self) -> Result<Value> {
        let response = self
            .client
            .get(&self.source_url)
            .send()
            .await
            .context("external source request failed")?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("external source returned status {}", status);
        }

        response
            .json::<Value>()
            .await
            .context("external source returned a malformed JSON body")
    }
}
