//! Background loading of the catalog and news feeds.
//!
//! Each request runs as its own tokio task and reports back to the UI loop
//! over an unbounded [`mpsc`] channel.  The loop drains the channel on every
//! tick and hands results to [`App`](crate::app::App).
//!
//! ## For contributors
//!
//! Requests are never cancelled.  A feed response carries the ticket of the
//! request that produced it, and `App::apply_news` drops any response whose
//! ticket is no longer current.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::source::{FetchError, NewsApi, NewsItem, SourceCatalog};

/// Messages sent from loader tasks to the UI loop.
#[derive(Debug)]
pub enum LoadMsg {
    /// The catalog request finished.
    Catalog(Result<SourceCatalog, FetchError>),
    /// A feed request finished.
    News {
        ticket: u64,
        result: Result<Vec<NewsItem>, FetchError>,
    },
}

/// A feed fetch the UI wants performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsRequest {
    /// Sequence number identifying this request.
    pub ticket: u64,
    pub url: String,
}

/// Spawns fetch tasks against a shared [`NewsApi`].
#[derive(Clone)]
pub struct Loader {
    api: Arc<dyn NewsApi>,
    tx: mpsc::UnboundedSender<LoadMsg>,
}

impl Loader {
    /// Create a loader and the receiver the UI loop should drain.
    pub fn new(api: Arc<dyn NewsApi>) -> (Self, mpsc::UnboundedReceiver<LoadMsg>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { api, tx }, rx)
    }

    pub fn load_catalog(&self) {
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = api.fetch_catalog().await;
            // If the receiver is gone the UI has exited; nothing to report to.
            let _ = tx.send(LoadMsg::Catalog(result));
        });
    }

    pub fn load_news(&self, request: NewsRequest) {
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            tracing::debug!(ticket = request.ticket, url = %request.url, "fetching news");
            let result = api.fetch_news(&request.url).await;
            let _ = tx.send(LoadMsg::News {
                ticket: request.ticket,
                result,
            });
        });
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
