//! portal-berita: a terminal news portal.
//!
//! ## Architecture overview
//!
//! ```text
//! ┌───────────┐  LoadMsg   ┌──────────┐  draw()  ┌──────────┐
//! │ loader.rs │ ─────────► │  app.rs  │ ───────► │  ui.rs   │
//! │  (tasks)  │  (channel) │ (state)  │          │ (render) │
//! └───────────┘            └──────────┘          └──────────┘
//!       ▲                    ▲     │
//!       │      Effect        │     │ handle_key_event()
//!       └────────────────────┼─────┘
//!                       ┌──────────┐
//!                       │ input.rs │
//!                       └──────────┘
//! ```
//!
//! * **`source/`**: the `NewsApi` trait, catalog and article types, and the
//!   HTTP implementation.
//! * **`loader`**: runs fetches as tokio tasks and reports results back.
//! * **`app`**: owns all application state; actions return `Effect`s.
//! * **`ui`**: pure rendering of `App` state into widgets.
//! * **`input`**: maps key events to `App` actions.
//! * **`main`**: wires everything together: parse args, load config, set up
//!   logging and the terminal, and run the event loop.

mod app;
mod browser;
mod cli;
mod config;
mod input;
mod loader;
mod logging;
mod source;
mod ui;

use std::io;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use app::{App, Effect};
use cli::Cli;
use config::Config;
use loader::{LoadMsg, Loader};
use source::HttpNewsApi;

// ---------------------------------------------------------------------------
// RAII terminal guard
// ---------------------------------------------------------------------------

/// Manages terminal raw-mode and alternate-screen lifetime via [`Drop`].
///
/// Constructing this struct enters raw mode + alternate screen.  When the
/// value is dropped (normally or during stack unwinding) it restores the
/// terminal.
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalGuard {
    fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Install a panic hook that restores the terminal before printing the
/// panic message.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(info);
    }));
}

fn dispatch(loader: &Loader, effect: Option<Effect>) {
    match effect {
        Some(Effect::FetchNews(request)) => loader.load_news(request),
        Some(Effect::OpenLink(url)) => {
            tracing::info!(url = %url, "opening link");
            browser::open_url(&url);
        }
        None => {}
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    // -- parse arguments and config ------------------------------------------
    let cli = Cli::parse();
    let config = Config::from_cli(&cli)?;

    let _log_guard = logging::init(&config.log_path());
    tracing::info!(catalog_url = %config.catalog_url, "portal-berita starting");

    // -- data loading ----------------------------------------------------------
    let api = HttpNewsApi::new(config.catalog_url.clone(), config.request_timeout())
        .context("failed to build HTTP client")?;
    let (loader, mut rx) = Loader::new(Arc::new(api));

    let mut app = App::new(config.reset_type_on_source_change);
    app.begin_catalog_load();
    loader.load_catalog();

    // -- terminal setup (RAII: Drop restores on exit or panic) ----------------
    install_panic_hook();
    let mut guard = TerminalGuard::new().context("failed to set up terminal")?;

    // -- main event loop -------------------------------------------------------
    // Each iteration:
    //   1. Drain finished loads.
    //   2. Render the UI.
    //   3. Poll for keyboard input (up to one tick).
    let tick_rate = config.tick_rate();

    loop {
        // 1. Process load results
        while let Ok(msg) = rx.try_recv() {
            match msg {
                LoadMsg::Catalog(result) => {
                    let effect = app.apply_catalog(result);
                    dispatch(&loader, effect);
                }
                LoadMsg::News { ticket, result } => app.apply_news(ticket, result),
            }
        }

        // 2. Render
        guard.terminal.draw(|f| ui::draw(&mut app, f))?;

        // 3. Handle input
        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                let effect = input::handle_key_event(&mut app, key);
                dispatch(&loader, effect);
            }
        }

        if app.quit {
            break;
        }
    }

    tracing::info!("portal-berita exited");
    // `guard` is dropped here, restoring the terminal.
    Ok(())
}
