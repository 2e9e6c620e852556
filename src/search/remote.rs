use std::{future::Future, time::Duration};

use anyhow::{Context, Result};
use reqwest::Client;

use crate::models::SearchHit;

const ENABLE_LOGS: bool = true;

use crate::log_warn;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Multi-field search served over the network.
pub trait SearchBackend: Send + Sync + 'static {
    fn search(&self, query: &str) -> impl Future<Output = Result<Vec<SearchHit>>> + Send;
}

/// Client for `GET /api/search?q=<query>`.
#[derive(Clone)]
pub struct HttpSearchBackend {
    client: Client,
    base_url: String,
}

impl HttpSearchBackend {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("failed to build search HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

impl SearchBackend for HttpSearchBackend {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
        let url = format!("{}/api/search", self.base_url);
        let hits = self
            .client
            .get(&url)
            .query(&[("q", query)])
            .send()
            .await
            .with_context(|| format!("search request to {url} failed"))?
            .error_for_status()
            .context("search endpoint returned an error status")?
            .json::<Vec<SearchHit>>()
            .await
            .context("search response was not a result list")?;
        Ok(hits)
    }
}

/// Run `query` against `backend`, treating any failure as no results.
pub async fn search_or_empty<B: SearchBackend>(backend: &B, query: &str) -> Vec<SearchHit> {
    match backend.search(query).await {
        Ok(hits) => hits,
        Err(err) => {
            log_warn!("search for '{query}' failed, showing no results: {err:#}");
            Vec::new()
        }
    }
}
