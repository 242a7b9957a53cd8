//! Application state and the actions that mutate it.
//!
//! [`App`] is the single owner of everything the screen shows: the source
//! catalog, the current selection, the article list, loading flags and the
//! overlay state.  Input handling and the loader only touch it through the
//! named methods below.  Methods that need I/O return an [`Effect`] for the
//! event loop to carry out.

use ratatui::widgets::ListState;

use crate::loader::NewsRequest;
use crate::source::{FetchError, NewsItem, SourceCatalog, SourceDescriptor};

/// Side effects requested by an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchNews(NewsRequest),
    OpenLink(String),
}

/// Which part of the screen receives navigation keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Feed,
    /// The source drawer on the right.
    Drawer,
    /// The type dropdown.
    TypePicker,
}

pub struct App {
    pub catalog: SourceCatalog,
    pub catalog_loading: bool,
    pub selected_source: Option<String>,
    pub selected_type: Option<String>,
    /// Articles of the last accepted feed response.
    pub news: Vec<NewsItem>,
    pub news_loading: bool,
    pub focus: Focus,
    pub news_state: ListState,
    pub drawer_state: ListState,
    pub type_state: ListState,
    /// Whether the user has requested to quit.
    pub quit: bool,
    /// Last status message.
    pub status: String,
    /// Clear the type filter whenever a different source is picked.
    reset_type_on_source_change: bool,
    /// Ticket of the most recently issued feed request.
    last_ticket: u64,
}

impl Default for App {
    fn default() -> Self {
        Self::new(false)
    }
}

impl App {
    pub fn new(reset_type_on_source_change: bool) -> Self {
        Self {
            catalog: SourceCatalog::default(),
            catalog_loading: false,
            selected_source: None,
            selected_type: None,
            news: Vec::new(),
            news_loading: false,
            focus: Focus::Feed,
            news_state: ListState::default(),
            drawer_state: ListState::default(),
            type_state: ListState::default(),
            quit: false,
            status: "Starting…".into(),
            reset_type_on_source_change,
            last_ticket: 0,
        }
    }

    // -- derivation ----------------------------------------------------------

    /// Descriptor of the selected source, if the catalog knows it.
    pub fn selected_descriptor(&self) -> Option<&SourceDescriptor> {
        self.catalog.get(self.selected_source.as_deref()?)
    }

    /// Type filters offered by the selected source.
    pub fn type_options(&self) -> &[String] {
        self.selected_descriptor()
            .map(|d| d.list_type.as_slice())
            .unwrap_or_default()
    }

    pub fn selected_news(&self) -> Option<&NewsItem> {
        self.news.get(self.news_state.selected()?)
    }

    // -- loading -------------------------------------------------------------

    /// Mark the catalog request as in flight.
    pub fn begin_catalog_load(&mut self) {
        self.catalog_loading = true;
        self.status = "Loading sources…".into();
    }

    /// Store the catalog result and select its first source.
    ///
    /// A failure is logged and leaves the catalog empty.
    pub fn apply_catalog(&mut self, result: Result<SourceCatalog, FetchError>) -> Option<Effect> {
        self.catalog_loading = false;
        match result {
            Ok(catalog) => {
                tracing::info!(sources = catalog.len(), "catalog loaded");
                self.status = format!("Loaded {} sources", catalog.len());
                self.selected_source = catalog.first_name().map(String::from);
                self.catalog = catalog;
                if self.focus == Focus::Drawer {
                    self.drawer_state.select(self.drawer_index());
                }
                self.request_news()
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to load source catalog");
                self.catalog = SourceCatalog::default();
                self.drawer_state.select(None);
                self.status = "No sources available".into();
                None
            }
        }
    }

    /// Issue a feed request for the current selection, if it resolves.
    fn request_news(&mut self) -> Option<Effect> {
        let url = self
            .selected_descriptor()?
            .feed_url(self.selected_type.as_deref());
        self.last_ticket += 1;
        self.news_loading = true;
        self.status = format!("Fetching {url}");
        Some(Effect::FetchNews(NewsRequest {
            ticket: self.last_ticket,
            url,
        }))
    }

    /// Store a feed result unless a newer request has been issued since.
    pub fn apply_news(&mut self, ticket: u64, result: Result<Vec<NewsItem>, FetchError>) {
        if ticket != self.last_ticket {
            tracing::debug!(ticket, current = self.last_ticket, "discarding stale news response");
            return;
        }
        self.news_loading = false;
        match result {
            Ok(items) => {
                self.status = format!("Fetched {} articles", items.len());
                self.news = items;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to load news");
                self.status = format!("Failed to load news: {e}");
                self.news.clear();
            }
        }
        self.news_state
            .select(if self.news.is_empty() { None } else { Some(0) });
    }

    // -- selection -----------------------------------------------------------

    /// Pick a source.  Re-picking the current one does nothing.
    pub fn select_source(&mut self, name: &str) -> Option<Effect> {
        if self.selected_source.as_deref() == Some(name) {
            return None;
        }
        tracing::info!(source = name, "source selected");
        self.selected_source = Some(name.to_string());
        if self.reset_type_on_source_change {
            self.selected_type = None;
        }
        self.request_news()
    }

    /// Pick a type filter.  Re-picking the current one does nothing.
    pub fn select_type(&mut self, news_type: &str) -> Option<Effect> {
        if self.selected_type.as_deref() == Some(news_type) {
            return None;
        }
        tracing::info!(news_type, "type selected");
        self.selected_type = Some(news_type.to_string());
        self.request_news()
    }

    // -- overlays ------------------------------------------------------------

    pub fn open_drawer(&mut self) {
        self.focus = Focus::Drawer;
        self.drawer_state.select(self.drawer_index());
    }

    /// Drawer row for the selected source, or the first row.
    fn drawer_index(&self) -> Option<usize> {
        self.selected_source
            .as_deref()
            .and_then(|name| self.catalog.position(name))
            .or(if self.catalog.is_empty() { None } else { Some(0) })
    }

    /// Open the type dropdown.  Hidden while sources load or when the
    /// selected source offers no types.
    pub fn open_type_picker(&mut self) {
        if self.catalog_loading {
            return;
        }
        let options = self.type_options();
        if options.is_empty() {
            self.status = "This source has no news types".into();
            return;
        }
        let index = self
            .selected_type
            .as_deref()
            .and_then(|t| options.iter().position(|o| o == t))
            .unwrap_or(0);
        self.focus = Focus::TypePicker;
        self.type_state.select(Some(index));
    }

    pub fn close_overlay(&mut self) {
        self.focus = Focus::Feed;
    }

    /// Act on the highlighted row of whatever has focus.
    pub fn confirm(&mut self) -> Option<Effect> {
        match self.focus {
            Focus::Drawer => {
                let name = self
                    .drawer_state
                    .selected()
                    .and_then(|i| self.catalog.names().nth(i))
                    .map(String::from);
                self.close_overlay();
                self.select_source(&name?)
            }
            Focus::TypePicker => {
                let news_type = self
                    .type_state
                    .selected()
                    .and_then(|i| self.type_options().get(i))
                    .cloned();
                self.close_overlay();
                self.select_type(&news_type?)
            }
            Focus::Feed => self.open_selected_link(),
        }
    }

    fn open_selected_link(&mut self) -> Option<Effect> {
        let news = self.selected_news()?;
        let (id, link) = (news.id.clone(), news.link.clone());
        match link.filter(|l| !l.is_empty()) {
            Some(link) => {
                tracing::debug!(id = ?id, "article opened");
                self.status = format!("Opening {link}");
                Some(Effect::OpenLink(link))
            }
            None => {
                self.status = "This article has no link".into();
                None
            }
        }
    }

    // -- navigation ----------------------------------------------------------

    fn focused_list(&mut self) -> (&mut ListState, usize) {
        match self.focus {
            Focus::Feed => (&mut self.news_state, self.news.len()),
            Focus::Drawer => (&mut self.drawer_state, self.catalog.len()),
            Focus::TypePicker => {
                let len = self.type_options().len();
                (&mut self.type_state, len)
            }
        }
    }

    pub fn select_next(&mut self) {
        let (state, len) = self.focused_list();
        if len == 0 {
            return;
        }
        let i = match state.selected() {
            Some(i) => (i + 1).min(len - 1),
            None => 0,
        };
        state.select(Some(i));
    }

    pub fn select_previous(&mut self) {
        let (state, len) = self.focused_list();
        if len == 0 {
            return;
        }
        let i = match state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        state.select(Some(i));
    }

    pub fn select_first(&mut self) {
        let (state, len) = self.focused_list();
        if len > 0 {
            state.select(Some(0));
        }
    }

    pub fn select_last(&mut self) {
        let (state, len) = self.focused_list();
        if len > 0 {
            state.select(Some(len - 1));
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(all: &str, types: &[&str]) -> SourceDescriptor {
        SourceDescriptor {
            all: all.to_string(),
            list_type: types.iter().map(|t| t.to_string()).collect(),
        }
    }

    fn sample_catalog() -> SourceCatalog {
        SourceCatalog::new(vec![
            ("A".into(), descriptor("http://x/", &["sports", "tech"])),
            ("B".into(), descriptor("http://y/", &["news"])),
        ])
    }

    fn make_news(id: &str, link: Option<&str>) -> NewsItem {
        NewsItem {
            id: Some(id.to_string()),
            title: Some(format!("Title {id}")),
            link: link.map(String::from),
            ..Default::default()
        }
    }

    fn decode_error() -> FetchError {
        FetchError::Decode(serde_json::from_str::<u8>("x").unwrap_err())
    }

    fn fetched(effect: Option<Effect>) -> NewsRequest {
        match effect {
            Some(Effect::FetchNews(req)) => req,
            other => panic!("expected a news fetch, got {other:?}"),
        }
    }

    /// App with the sample catalog applied and its first fetch answered.
    fn loaded_app() -> App {
        let mut app = App::default();
        app.begin_catalog_load();
        let req = fetched(app.apply_catalog(Ok(sample_catalog())));
        app.apply_news(req.ticket, Ok(vec![make_news("1", Some("https://a/1")), make_news("2", None)]));
        app
    }

    // -- catalog -------------------------------------------------------------

    #[test]
    fn new_app_starts_empty() {
        let app = App::default();
        assert!(app.catalog.is_empty());
        assert!(app.selected_source.is_none());
        assert!(!app.news_loading);
        assert!(!app.quit);
    }

    #[test]
    fn catalog_selects_first_source_and_fetches_its_feed() {
        let mut app = App::default();
        app.begin_catalog_load();
        assert!(app.catalog_loading);

        let catalog = SourceCatalog::new(vec![("A".into(), descriptor("http://x/", &["sports"]))]);
        let req = fetched(app.apply_catalog(Ok(catalog)));

        assert!(!app.catalog_loading);
        assert_eq!(app.selected_source.as_deref(), Some("A"));
        assert_eq!(req.url, "http://x/");
        assert!(app.news_loading);
    }

    #[test]
    fn catalog_failure_degrades_to_empty() {
        let mut app = App::default();
        app.begin_catalog_load();
        let effect = app.apply_catalog(Err(decode_error()));

        assert!(effect.is_none());
        assert!(app.catalog.is_empty());
        assert!(!app.catalog_loading);
        assert!(app.selected_source.is_none());
    }

    #[test]
    fn empty_catalog_selects_nothing() {
        let mut app = App::default();
        assert!(app.apply_catalog(Ok(SourceCatalog::default())).is_none());
        assert!(app.selected_source.is_none());
        assert!(!app.news_loading);
    }

    // -- news ----------------------------------------------------------------

    #[test]
    fn selecting_type_appends_it_to_feed_url() {
        let mut app = loaded_app();
        let req = fetched(app.select_type("sports"));
        assert_eq!(req.url, "http://x/sports");
    }

    #[test]
    fn selecting_source_fetches_its_feed_once() {
        let mut app = loaded_app();
        let req = fetched(app.select_source("B"));
        assert_eq!(req.url, "http://y/");
        assert!(app.select_source("B").is_none(), "same source does not refetch");
    }

    #[test]
    fn reselecting_same_type_does_not_refetch() {
        let mut app = loaded_app();
        fetched(app.select_type("tech"));
        assert!(app.select_type("tech").is_none());
    }

    #[test]
    fn unknown_source_issues_no_fetch() {
        let mut app = loaded_app();
        assert!(app.select_source("missing").is_none());
        assert!(app.selected_descriptor().is_none());
    }

    #[test]
    fn type_carries_over_to_new_source_by_default() {
        let mut app = loaded_app();
        fetched(app.select_type("sports"));
        let req = fetched(app.select_source("B"));

        assert_eq!(app.selected_type.as_deref(), Some("sports"));
        assert_eq!(req.url, "http://y/sports");
    }

    #[test]
    fn type_resets_on_source_change_when_configured() {
        let mut app = App::new(true);
        fetched(app.apply_catalog(Ok(sample_catalog())));
        fetched(app.select_type("sports"));
        let req = fetched(app.select_source("B"));

        assert!(app.selected_type.is_none());
        assert_eq!(req.url, "http://y/");
    }

    #[test]
    fn news_success_replaces_list_and_clears_loading() {
        let app = loaded_app();
        assert!(!app.news_loading);
        assert_eq!(app.news.len(), 2);
        assert_eq!(app.news_state.selected(), Some(0));
    }

    #[test]
    fn news_failure_clears_loading_and_list() {
        let mut app = loaded_app();
        let req = fetched(app.select_source("B"));
        app.apply_news(req.ticket, Err(decode_error()));

        assert!(!app.news_loading);
        assert!(app.news.is_empty());
        assert!(app.news_state.selected().is_none());
        assert!(app.status.starts_with("Failed to load news"));
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut app = loaded_app();
        let first = fetched(app.select_type("sports"));
        let second = fetched(app.select_type("tech"));

        app.apply_news(second.ticket, Ok(vec![make_news("tech", None)]));
        app.apply_news(first.ticket, Ok(vec![make_news("sports", None)]));

        assert_eq!(app.news.len(), 1);
        assert_eq!(app.news[0].id.as_deref(), Some("tech"));
        assert!(!app.news_loading);
    }

    #[test]
    fn stale_response_does_not_clear_loading() {
        let mut app = loaded_app();
        let first = fetched(app.select_type("sports"));
        let _second = fetched(app.select_type("tech"));

        app.apply_news(first.ticket, Ok(vec![]));
        assert!(app.news_loading, "newer request is still in flight");
    }

    // -- overlays ------------------------------------------------------------

    #[test]
    fn drawer_opens_on_selected_source_and_confirms() {
        let mut app = loaded_app();
        app.open_drawer();
        assert_eq!(app.focus, Focus::Drawer);
        assert_eq!(app.drawer_state.selected(), Some(0));

        app.select_next();
        let req = fetched(app.confirm());
        assert_eq!(app.focus, Focus::Feed, "drawer closes on selection");
        assert_eq!(app.selected_source.as_deref(), Some("B"));
        assert_eq!(req.url, "http://y/");
    }

    #[test]
    fn drawer_opened_while_loading_gets_cursor_when_catalog_arrives() {
        let mut app = App::default();
        app.begin_catalog_load();
        app.open_drawer();
        assert!(app.drawer_state.selected().is_none());

        let first = fetched(app.apply_catalog(Ok(sample_catalog())));
        assert_eq!(first.url, "http://x/");
        assert_eq!(app.focus, Focus::Drawer, "drawer stays open");
        assert_eq!(app.drawer_state.selected(), Some(0));

        app.select_next();
        let req = fetched(app.confirm());
        assert_eq!(app.selected_source.as_deref(), Some("B"));
        assert_eq!(req.url, "http://y/");
    }

    #[test]
    fn drawer_on_empty_catalog_confirms_nothing() {
        let mut app = App::default();
        app.open_drawer();
        assert!(app.drawer_state.selected().is_none());
        assert!(app.confirm().is_none());
        assert_eq!(app.focus, Focus::Feed);
    }

    #[test]
    fn type_picker_lists_selected_source_types() {
        let mut app = loaded_app();
        assert_eq!(app.type_options(), ["sports", "tech"]);

        app.open_type_picker();
        assert_eq!(app.focus, Focus::TypePicker);
        app.select_last();
        let req = fetched(app.confirm());
        assert_eq!(req.url, "http://x/tech");
        assert_eq!(app.focus, Focus::Feed);
    }

    #[test]
    fn type_picker_stays_closed_while_catalog_loads() {
        let mut app = App::default();
        app.begin_catalog_load();
        app.open_type_picker();
        assert_eq!(app.focus, Focus::Feed);
    }

    #[test]
    fn confirm_on_feed_opens_link() {
        let mut app = loaded_app();
        assert_eq!(app.confirm(), Some(Effect::OpenLink("https://a/1".into())));

        app.select_next();
        assert!(app.confirm().is_none(), "second article has no link");
    }

    // -- navigation ----------------------------------------------------------

    #[test]
    fn navigation_on_empty_feed_is_noop() {
        let mut app = App::default();
        app.select_next();
        app.select_previous();
        app.select_first();
        app.select_last();
        assert!(app.news_state.selected().is_none());
    }

    #[test]
    fn navigation_clamps_to_bounds() {
        let mut app = loaded_app();
        app.select_previous();
        assert_eq!(app.news_state.selected(), Some(0));

        app.select_next();
        app.select_next();
        assert_eq!(app.news_state.selected(), Some(1));

        app.select_first();
        assert_eq!(app.news_state.selected(), Some(0));
        app.select_last();
        assert_eq!(app.news_state.selected(), Some(1));
    }

    #[test]
    fn navigation_follows_focus() {
        let mut app = loaded_app();
        app.open_drawer();
        app.select_last();
        assert_eq!(app.drawer_state.selected(), Some(1));
        assert_eq!(app.news_state.selected(), Some(0), "feed selection untouched");
    }
}
