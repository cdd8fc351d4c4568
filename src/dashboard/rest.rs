//! REST API client for the dashboard server

use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument};

use super::messages::{ClearResponse, RecentLootsResponse};
use crate::common::errors::{ClientError, Result};
use crate::common::types::{LootEvent, StatsUpdate};

/// REST API client for the dashboard server
#[derive(Debug, Clone)]
pub struct DashboardRestClient {
    /// HTTP client
    client: Client,
    /// Base URL of the dashboard API
    base_url: String,
}

impl DashboardRestClient {
    /// Create a new REST client
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, Duration::from_secs(30))
    }

    /// Create a new REST client with custom timeout
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Internal(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the most recent loot records, newest first
    #[instrument(skip(self))]
    pub async fn get_recent_loots(&self, limit: u32) -> Result<Vec<LootEvent>> {
        let url = format!("{}/recent-loots?limit={}", self.base_url, limit);
        debug!("Fetching recent loots from: {}", url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::InvalidResponse(format!(
                "Server returned status {}: {}",
                status, body
            )));
        }

        let loots_response: RecentLootsResponse = response.json().await?;
        Ok(loots_response.loots)
    }

    /// Fetch session aggregate statistics
    #[instrument(skip(self))]
    pub async fn get_stats(&self) -> Result<StatsUpdate> {
        let url = format!("{}/stats", self.base_url);
        debug!("Fetching stats from: {}", url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::InvalidResponse(format!(
                "Server returned status {}: {}",
                status, body
            )));
        }

        let stats: StatsUpdate = response.json().await?;
        Ok(stats)
    }

    /// Ask the server to clear the session; returns whether it did
    #[instrument(skip(self))]
    pub async fn clear(&self) -> Result<bool> {
        let url = format!("{}/clear", self.base_url);
        debug!("Posting clear to: {}", url);

        let response = self.client.post(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::InvalidResponse(format!(
                "Server returned status {}: {}",
                status, body
            )));
        }

        let clear_response: ClearResponse = response.json().await?;
        Ok(clear_response.success)
    }
}
