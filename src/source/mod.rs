//! News source abstraction layer.
//!
//! This module defines the [`NewsApi`] trait, the catalog types
//! ([`SourceCatalog`], [`SourceDescriptor`]) and the article type
//! ([`NewsItem`]).  The concrete HTTP implementation lives in [`http`].
//!
//! ## For contributors
//!
//! Everything above this layer talks to `dyn NewsApi`, so tests (and any
//! alternative backend) only need to implement the two fetch methods.

mod catalog;
mod http;
mod news_item;

pub use catalog::{CatalogResponse, SourceCatalog, SourceDescriptor};
pub use http::HttpNewsApi;
pub use news_item::NewsItem;

use async_trait::async_trait;

/// Why a fetch failed.
///
/// Network failures and malformed bodies are kept apart for logging only;
/// callers treat both the same way.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Trait that every news backend must implement.
///
/// The loader calls these from spawned tokio tasks, so implementations must
/// be `Send + Sync`.
#[async_trait]
pub trait NewsApi: Send + Sync {
    /// Fetch the source catalog from the configuration endpoint.
    async fn fetch_catalog(&self) -> Result<SourceCatalog, FetchError>;

    /// Fetch the article list behind a fully built feed URL.
    async fn fetch_news(&self, url: &str) -> Result<Vec<NewsItem>, FetchError>;
}
