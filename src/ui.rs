//! Terminal UI rendering.
//!
//! All drawing logic lives here, separated from application state ([`App`])
//! and input handling ([`crate::input`]).
//!
//! ## For contributors
//!
//! * The screen is a vertical stack: header bar, selected source name, type
//!   dropdown, article list and a one-line status bar.
//! * The source drawer and the type dropdown are overlays drawn last, on top
//!   of a [`Clear`] so the list underneath does not bleed through.
//! * [`ratatui`] is the TUI framework; see its docs for widget details.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

use crate::app::{App, Focus};

const ACCENT: Color = Color::Rgb(0x0d, 0x6e, 0xfd);
const DRAWER_WIDTH: u16 = 34;

/// Draw the complete UI for one frame.
///
/// Called once per tick from the main loop.  Delegates to helper functions
/// for each screen region.
pub fn draw(app: &mut App, frame: &mut Frame) {
    let area = frame.area();
    let dropdown_height = if app.catalog_loading { 0 } else { 3 };
    let [header_area, source_area, dropdown_area, list_area, status_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(dropdown_height),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(area);

    draw_header(frame, header_area);
    draw_source_title(app, frame, source_area);
    if !app.catalog_loading {
        draw_type_button(app, frame, dropdown_area);
    }
    draw_news_list(app, frame, list_area);
    draw_status_bar(app, frame, status_area);

    match app.focus {
        Focus::Feed => {}
        Focus::Drawer => draw_drawer(app, frame, area),
        Focus::TypePicker => draw_type_picker(app, frame, dropdown_area, list_area),
    }
}

fn draw_header(frame: &mut Frame, area: Rect) {
    let style = Style::default().bg(ACCENT).fg(Color::White);
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" Portal Berita", style.add_modifier(Modifier::BOLD)),
    ]))
    .style(style);
    frame.render_widget(header, area);

    let button = Paragraph::new("[s] Pilih Sumber ")
        .style(style)
        .alignment(Alignment::Right);
    frame.render_widget(button, area);
}

fn draw_source_title(app: &App, frame: &mut Frame, area: Rect) {
    let title = Paragraph::new(app.selected_source.as_deref().unwrap_or_default())
        .style(Style::default().add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, area);
}

/// The closed dropdown: shows the chosen type or a prompt.
fn draw_type_button(app: &App, frame: &mut Frame, area: Rect) {
    let text = match &app.selected_type {
        Some(t) => Span::raw(t.to_uppercase()),
        None => Span::styled("Pilih tipe berita", Style::default().fg(Color::DarkGray)),
    };
    let button = Paragraph::new(Line::from(vec![text, Span::raw("  ▾ [t]")])).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Gray)),
    );
    frame.render_widget(button, area);
}

/// Render the article list, or the loading / empty message in its place.
fn draw_news_list(app: &mut App, frame: &mut Frame, area: Rect) {
    let block = Block::default().title(" Berita ").borders(Borders::ALL);

    if app.news_loading || app.news.is_empty() {
        let message = if app.news_loading {
            "Loading..."
        } else {
            "Tidak ada berita"
        };
        let placeholder = Paragraph::new(message)
            .style(Style::default().add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(placeholder, area);
        return;
    }

    let cards: Vec<ListItem> = app
        .news
        .iter()
        .map(|news| {
            ListItem::new(vec![
                Line::from(Span::styled(
                    news.title().to_string(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    news.display_date(),
                    Style::default().fg(Color::DarkGray),
                )),
                Line::from(news.excerpt()),
                Line::from(Span::styled(
                    format!("🖼 {}", news.image_url()),
                    Style::default().fg(Color::DarkGray),
                )),
                Line::default(),
            ])
        })
        .collect();

    let list = List::new(cards)
        .block(block)
        .highlight_style(Style::default().bg(Color::Rgb(0xee, 0xee, 0xee)).fg(Color::Black))
        .highlight_symbol("▸ ");

    frame.render_stateful_widget(list, area, &mut app.news_state);
}

/// Render the source drawer along the right edge.
fn draw_drawer(app: &mut App, frame: &mut Frame, area: Rect) {
    let width = DRAWER_WIDTH.min(area.width);
    let drawer_area = Rect {
        x: area.x + area.width - width,
        width,
        ..area
    };
    frame.render_widget(Clear, drawer_area);

    let block = Block::default()
        .title(" Sumber ")
        .title_bottom(Line::from(" Esc: Tutup ").alignment(Alignment::Center))
        .borders(Borders::ALL);

    if app.catalog_loading {
        let loading = Paragraph::new("Loading...")
            .style(Style::default().add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(loading, drawer_area);
        return;
    }

    let selected = app.selected_source.as_deref();
    let rows: Vec<ListItem> = app
        .catalog
        .names()
        .map(|name| {
            let style = if Some(name) == selected {
                Style::default().bg(Color::Blue).fg(Color::White)
            } else {
                Style::default()
            };
            ListItem::new(name.to_string()).style(style)
        })
        .collect();

    let list = List::new(rows)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::BOLD))
        .highlight_symbol("▸ ");

    frame.render_stateful_widget(list, drawer_area, &mut app.drawer_state);
}

/// Render the open dropdown just below its button.
fn draw_type_picker(app: &mut App, frame: &mut Frame, button: Rect, below: Rect) {
    let options: Vec<ListItem> = app
        .type_options()
        .iter()
        .map(|option| {
            let style = if app.selected_type.as_deref() == Some(option.as_str()) {
                Style::default().bg(ACCENT).fg(Color::White)
            } else {
                Style::default()
            };
            ListItem::new(option.to_uppercase()).style(style)
        })
        .collect();

    let height = (options.len() as u16 + 2).min(below.height);
    let popup = Rect {
        x: button.x,
        y: below.y,
        width: button.width,
        height,
    };
    frame.render_widget(Clear, popup);

    let list = List::new(options)
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(Style::default().add_modifier(Modifier::BOLD))
        .highlight_symbol("▸ ");

    frame.render_stateful_widget(list, popup, &mut app.type_state);
}

/// Render the bottom status bar.
fn draw_status_bar(app: &App, frame: &mut Frame, area: Rect) {
    let hints = match app.focus {
        Focus::Feed => "  q: quit  s: sources  t: type  ↑/↓: scroll  Enter: open",
        Focus::Drawer | Focus::TypePicker => "  ↑/↓: move  Enter: choose  Esc: close",
    };
    let status = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        Span::styled(&app.status, Style::default().fg(Color::Yellow)),
        Span::raw("  "),
        Span::styled(
            format!("{} articles", app.news.len()),
            Style::default().fg(Color::Green),
        ),
        Span::raw(hints),
    ]));
    frame.render_widget(status, area);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
