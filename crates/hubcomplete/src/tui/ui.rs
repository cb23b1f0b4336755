//! UI rendering

use hubcomplete_core::view::{NO_RESULTS, hint_text};
use hubcomplete_core::{Body, ItemView, Region, SuggestionKind, Viewport};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, StatefulWidget},
};
use std::time::{Duration, Instant};

use super::app::{App, HitAreas};

const SELECTION_BG: Color = Color::Rgb(38, 38, 38);

fn region(rect: Rect) -> Region {
    Region::new(rect.x, rect.y, rect.width, rect.height)
}

/// Render the entire UI
pub fn render(frame: &mut Frame, app: &mut App) {
    let error_lines = app.widget.view().errors.len() as u16;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),           // Header
            Constraint::Length(3),           // Search input
            Constraint::Length(error_lines), // One line per failed source
            Constraint::Min(3),              // Hint / no results / suggestions
            Constraint::Length(1),           // Status bar
            Constraint::Length(1),           // Toast line
        ])
        .split(frame.area());

    let mut hit = HitAreas::default();

    render_header(frame, app, chunks[0]);
    render_search_input(frame, app, chunks[1], &mut hit);
    render_errors(frame, app, chunks[2]);
    let body_is_list = render_body(frame, app, chunks[3], &mut hit);
    render_status_bar(frame, app, chunks[4]);
    render_toast_line(frame, app, chunks[5]);

    // Hint and "no results" lines belong to the widget container, the list
    // is tracked separately
    let container = chunks[1].union(chunks[2]);
    hit.container = region(if body_is_list {
        container
    } else {
        container.union(chunks[3])
    });
    app.hit = hit;
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let line = Line::from(vec![
        Span::styled(
            "  GitHub users & repositories",
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {}", app.api_base_url),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Render the input box, with the spinner or the expand/collapse toggle at its right edge
fn render_search_input(frame: &mut Frame, app: &App, area: Rect, hit: &mut HitAreas) {
    let view = app.widget.view();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(border::ROUNDED)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Search ");
    let inner = block.inner(area);
    frame.render_widget(block, area);
    hit.input = region(area);

    // Reserve two columns on the right for the spinner / toggle
    let text_area = Rect {
        width: inner.width.saturating_sub(2),
        ..inner
    };
    let marker_area = Rect {
        x: inner.x + inner.width.saturating_sub(1),
        width: inner.width.min(1),
        ..inner
    };

    let text = Paragraph::new(Line::from(Span::styled(
        view.input,
        Style::default().fg(Color::White),
    )));
    frame.render_widget(text, text_area);

    let cursor = (app.input.cursor_column() as u16).min(text_area.width);
    frame.set_cursor_position((text_area.x + cursor, text_area.y));

    if let Some(started_at) = app.loading_since.filter(|_| view.loading) {
        let spinner = Span::styled(
            spinner_frame(started_at),
            Style::default().fg(Color::Yellow),
        );
        frame.render_widget(Paragraph::new(Line::from(spinner)), marker_area);
    } else if view.expandable {
        let symbol = if view.expanded { "▴" } else { "▾" };
        let toggle = Span::styled(symbol, Style::default().fg(Color::Magenta));
        frame.render_widget(Paragraph::new(Line::from(toggle)), marker_area);
        hit.toggle = Some(region(marker_area));
    }
}

fn render_errors(frame: &mut Frame, app: &App, area: Rect) {
    let style = Style::default().fg(Color::Red);
    let lines: Vec<Line> = app
        .widget
        .view()
        .errors
        .iter()
        .map(|e| Line::from(Span::styled(format!("  ✗ {e}"), style)))
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

/// Render the area below the input. Returns true if the suggestion list was drawn.
fn render_body(frame: &mut Frame, app: &mut App, area: Rect, hit: &mut HitAreas) -> bool {
    let dim = Style::default().fg(Color::DarkGray);
    let view = app.widget.view();

    let items = match view.body {
        Body::Hint { min_chars } => {
            let line = Line::from(Span::styled(format!("  {}", hint_text(min_chars)), dim));
            frame.render_widget(Paragraph::new(line), area);
            return false;
        }
        Body::NoResults => {
            let line = Line::from(Span::styled(format!("  {NO_RESULTS}"), dim));
            frame.render_widget(Paragraph::new(line), area);
            return false;
        }
        Body::Hidden => return false,
        Body::Suggestions(items) => items,
    };

    let focused = items.iter().position(|item| item.focused);
    let total = items.len();
    let list_items: Vec<ListItem> = items.iter().map(suggestion_item).collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(border::ROUNDED)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(format!(" {total} suggestions "));
    let rows = block.inner(area);
    hit.list = Some(region(area));
    hit.rows = Some(region(rows));

    // Keep the offset in range when the list shrinks, then scroll the focused row in
    app.viewport.height = rows.height as usize;
    app.viewport.offset = app
        .viewport
        .offset
        .min(total.saturating_sub(app.viewport.height));
    app.apply_reveal();

    *app.list_state.offset_mut() = app.viewport.offset;
    app.list_state.select(focused);

    // Reserve 1 column on the right for the scrollbar
    let list_area = Rect {
        width: rows.width.saturating_sub(1),
        ..rows
    };
    frame.render_widget(block, area);
    let list = List::new(list_items);
    StatefulWidget::render(list, list_area, frame.buffer_mut(), &mut app.list_state);
    app.viewport.offset = app.list_state.offset();

    render_scrollbar(frame, rows, total, app.viewport);
    true
}

fn suggestion_item(item: &ItemView) -> ListItem<'static> {
    let (icon, color) = match item.kind {
        SuggestionKind::Repository => ("◆ ", Color::Magenta),
        SuggestionKind::User => ("● ", Color::Cyan),
    };

    let base = if item.focused {
        Style::default().bg(SELECTION_BG)
    } else {
        Style::default()
    };

    let mut spans = vec![
        Span::styled(if item.focused { "▌" } else { " " }, base.fg(Color::LightRed)),
        Span::styled(icon, base.fg(color)),
        Span::styled(item.label.to_string(), base.fg(Color::White)),
    ];
    if item.focused {
        spans.push(Span::styled("  ↗ open", base.fg(Color::DarkGray)));
    }

    ListItem::new(Line::from(spans)).style(base)
}

/// Scrollbar with a stable thumb size
fn render_scrollbar(frame: &mut Frame, rows: Rect, total: usize, viewport: Viewport) {
    if rows.width == 0 || viewport.height == 0 {
        return;
    }
    let max_offset = total.saturating_sub(viewport.height);
    if max_offset == 0 {
        return;
    }

    let x = rows.x + rows.width - 1;
    let track = rows.height as usize;
    let thumb_len = (viewport.height * track / total).clamp(1, track);
    let max_start = track - thumb_len;
    let offset = viewport.offset.min(max_offset);
    // Round to nearest so the thumb moves evenly
    let start = (offset * max_start + max_offset / 2) / max_offset;

    let buf = frame.buffer_mut();
    for i in 0..track {
        let in_thumb = i >= start && i < start + thumb_len;
        buf[(x, rows.y + i as u16)]
            .set_symbol(if in_thumb { "┃" } else { "│" })
            .set_style(Style::default().fg(if in_thumb {
                Color::Magenta
            } else {
                Color::DarkGray
            }));
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let dim = Style::default().fg(Color::DarkGray);
    let bracket = Style::default().fg(Color::DarkGray);

    let mut spans = Vec::new();
    for shortcut in ["↑↓ select", "Enter open", "^t toggle", "Esc close", "^c quit"] {
        spans.extend([
            Span::styled(" [", bracket),
            Span::styled(shortcut, dim),
            Span::styled("]", bracket),
        ]);
    }

    if let Some(started_at) = app.loading_since {
        spans.push(Span::styled(
            format!("  {} Searching...", spinner_frame(started_at)),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::DIM),
        ));
    } else if let Some((count, duration)) = app.last_search {
        spans.push(Span::styled(format!("  {count} results "), dim));
        spans.push(Span::styled(
            format!("({})", format_duration(duration)),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::DIM),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the toast notification line (below status bar)
fn render_toast_line(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(ref toast) = app.toast {
        let bracket = Style::default().fg(Color::DarkGray);
        let toast_style = if toast.is_error {
            Style::default().fg(Color::Red).add_modifier(Modifier::DIM)
        } else {
            Style::default().fg(Color::Blue).add_modifier(Modifier::DIM)
        };

        let spans = vec![
            Span::styled("  [", bracket),
            Span::styled(&toast.message, toast_style),
            Span::styled("]", bracket),
        ];

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

fn spinner_frame(started_at: Instant) -> &'static str {
    const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
    let elapsed = started_at.elapsed().as_millis() / 80;
    FRAMES[(elapsed as usize) % FRAMES.len()]
}

fn format_duration(d: Duration) -> String {
    let millis = d.as_millis();
    if millis < 1000 {
        format!("{millis}ms")
    } else {
        format!("{:.1}s", d.as_secs_f64())
    }
}
