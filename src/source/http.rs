//! HTTP implementation of [`NewsApi`].
//!
//! Both endpoints return JSON.  Status codes are not inspected: a body that
//! parses is accepted, anything else surfaces as [`FetchError::Decode`].

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::{CatalogResponse, FetchError, NewsApi, NewsItem, SourceCatalog};

/// Talks to the configuration endpoint and to the feed URLs it lists.
pub struct HttpNewsApi {
    client: reqwest::Client,
    catalog_url: String,
}

/// Body of a feed endpoint.  `data` may be missing or `null`.
///
/// Entries are kept as raw values and decoded one by one, so a malformed
/// article is skipped instead of failing the whole feed.
#[derive(Debug, Deserialize)]
struct NewsResponse {
    #[serde(default)]
    data: Option<Vec<serde_json::Value>>,
}

impl NewsResponse {
    fn into_items(self) -> Vec<NewsItem> {
        self.data
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .filter_map(|(index, raw)| match serde_json::from_value(raw) {
                Ok(item) => Some(item),
                Err(err) => {
                    tracing::warn!(index, error = %err, "skipping malformed news item");
                    None
                }
            })
            .collect()
    }
}

impl HttpNewsApi {
    /// Create a client for the given catalog endpoint.
    ///
    /// `timeout` applies to every request; `None` waits indefinitely.
    pub fn new(
        catalog_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self::with_client(builder.build()?, catalog_url))
    }

    pub fn with_client(client: reqwest::Client, catalog_url: impl Into<String>) -> Self {
        Self {
            client,
            catalog_url: catalog_url.into(),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let response = self.client.get(url).send().await?;
        tracing::debug!(url, status = %response.status(), "response received");
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl NewsApi for HttpNewsApi {
    async fn fetch_catalog(&self) -> Result<SourceCatalog, FetchError> {
        let parsed: CatalogResponse = self.get_json(&self.catalog_url).await?;
        Ok(parsed.list_api)
    }

    async fn fetch_news(&self, url: &str) -> Result<Vec<NewsItem>, FetchError> {
        let parsed: NewsResponse = self.get_json(url).await?;
        Ok(parsed.into_items())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
