//! Keyboard input handling.
//!
//! Maps terminal key events to [`App`] actions.  What a key does depends on
//! which part of the screen has focus: the feed, the source drawer, or the
//! type dropdown.
//!
//! ## For contributors
//!
//! To add a new keybinding:
//!
//! 1. Add a method on [`App`] for the action (if one doesn't exist).
//! 2. Add a `KeyCode` match arm below for the focus it applies to.
//! 3. Update the hints in [`crate::ui`]'s status bar.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::app::{App, Effect, Focus};

/// Process a single key event, updating app state accordingly.
///
/// Only reacts to key-press events (ignoring release / repeat) so that each
/// physical keypress triggers exactly one action.  Returns the side effect,
/// if any, that the event loop must perform.
pub fn handle_key_event(app: &mut App, key: KeyEvent) -> Option<Effect> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    match key.code {
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
        KeyCode::Home | KeyCode::Char('g') => app.select_first(),
        KeyCode::End | KeyCode::Char('G') => app.select_last(),
        KeyCode::Enter => return app.confirm(),
        KeyCode::Char('o') if app.focus == Focus::Feed => return app.confirm(),
        _ => match app.focus {
            Focus::Feed => handle_feed_key(app, key.code),
            Focus::Drawer | Focus::TypePicker => handle_overlay_key(app, key.code),
        },
    }
    None
}

fn handle_feed_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit = true,
        KeyCode::Char('s') => app.open_drawer(),
        KeyCode::Char('t') => app.open_type_picker(),
        _ => {}
    }
}

fn handle_overlay_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc | KeyCode::Char('q') => app.close_overlay(),
        KeyCode::Char('s') if app.focus == Focus::Drawer => app.close_overlay(),
        KeyCode::Char('t') if app.focus == Focus::TypePicker => app.close_overlay(),
        _ => {}
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
