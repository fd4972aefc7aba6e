//! Job feed source. One fetch per search; no caching, no retries.
//!
//! `JobFeed` is a trait so the router can be exercised against a static feed.
//! `AppState` holds an `Arc<dyn JobFeed>`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error};

use crate::jobs::listing::JobListing;
use crate::jobs::scoring::MAX_JOBS_CONSIDERED;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Public detail page used when a listing has no apply URL.
pub const JOB_DETAIL_URL_PREFIX: &str = "https://remoteok.io/remote-jobs/";

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("feed returned status {0}")]
    Status(u16),

    #[error("feed payload is not a JSON array")]
    NotAnArray,
}

/// Result of a feed fetch. Failures are soft: callers see an empty job list,
/// but can still tell an outage apart from "nothing matched".
#[derive(Debug, Clone)]
pub enum FeedOutcome {
    Fetched(Vec<JobListing>),
    Unavailable { reason: String },
}

#[async_trait]
pub trait JobFeed: Send + Sync {
    async fn fetch(&self) -> FeedOutcome;
}

/// HTTP feed client for the RemoteOK-style `/api` endpoint.
pub struct RemoteOkFeed {
    client: Client,
    url: String,
    timeout: Duration,
}

impl RemoteOkFeed {
    pub fn new(url: String, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            url,
            timeout,
        }
    }

    async fn fetch_raw(&self) -> Result<Vec<Value>, FeedError> {
        let response = self
            .client
            .get(&self.url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(FeedError::Status(status.as_u16()));
        }

        match response.json::<Value>().await? {
            Value::Array(entries) => Ok(entries),
            _ => Err(FeedError::NotAnArray),
        }
    }
}

#[async_trait]
impl JobFeed for RemoteOkFeed {
    async fn fetch(&self) -> FeedOutcome {
        match self.fetch_raw().await {
            Ok(entries) => {
                let listings = listings_from_entries(&entries);
                debug!("Fetched {} job listings from feed", listings.len());
                FeedOutcome::Fetched(listings)
            }
            Err(e) => {
                error!("Failed to fetch jobs from feed: {e}");
                FeedOutcome::Unavailable {
                    reason: e.to_string(),
                }
            }
        }
    }
}

/// Drops the leading metadata record (an object carrying `legal`), keeps the
/// first 100 raw entries, and skips entries that are not objects.
pub fn listings_from_entries(entries: &[Value]) -> Vec<JobListing> {
    let entries = match entries.first() {
        Some(Value::Object(first)) if first.contains_key("legal") => &entries[1..],
        _ => entries,
    };
    entries
        .iter()
        .take(MAX_JOBS_CONSIDERED)
        .filter_map(JobListing::from_value)
        .collect()
}
