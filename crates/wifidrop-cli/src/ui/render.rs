//! TUI rendering functions.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, AppMode, FormField};

/// Draw the full UI.
pub fn draw(frame: &mut Frame<'_>, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Length(3), // Search box
            Constraint::Min(5),    // Network list
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    draw_header(frame, app, chunks[0]);
    draw_search(frame, app, chunks[1]);
    draw_list(frame, app, chunks[2]);
    draw_status_bar(frame, app, chunks[3]);

    match app.mode {
        AppMode::AddForm => draw_form(frame, app),
        AppMode::SubmitNotice => draw_submit_notice(frame),
        AppMode::Browse => {}
    }
}

fn draw_header(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            "WifiDrop",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" | Public WiFi Passwords"),
        Span::styled(
            format!("  {} shared", app.records.len()),
            Style::default().fg(Color::DarkGray),
        ),
    ]));

    frame.render_widget(header, area);
}

fn draw_search(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let search = Paragraph::new(app.search.as_str())
        .block(Block::default().borders(Borders::ALL).title("Search networks"));
    frame.render_widget(search, area);

    // The search box owns the cursor while browsing.
    if app.mode == AppMode::Browse {
        let col = UnicodeWidthStr::width(app.search.as_str()) as u16;
        let cursor_x = area
            .x
            .saturating_add(1)
            .saturating_add(col)
            .min(area.x.saturating_add(area.width.saturating_sub(2)));
        frame.set_cursor_position((cursor_x, area.y.saturating_add(1)));
    }
}

fn draw_list(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let filtered = app.filtered();
    let selected = app.selected.min(filtered.len().saturating_sub(1));

    let mut lines: Vec<Line<'_>> = Vec::new();
    let mut selected_line = 0usize;

    for (idx, wifi) in filtered.iter().enumerate() {
        let is_selected = idx == selected && !filtered.is_empty();
        if is_selected {
            selected_line = lines.len();
        }

        let marker = if is_selected { "> " } else { "  " };
        let title_style = if is_selected {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };

        let business = wifi.business_name.as_deref().unwrap_or("(unnamed venue)");
        let mut title = vec![
            Span::raw(marker),
            Span::styled(business.to_string(), title_style),
        ];
        if app.copied_id == Some(wifi.id) {
            title.push(Span::styled(
                "  [copied]",
                Style::default().fg(Color::Green),
            ));
        }
        lines.push(Line::from(title));
        lines.push(Line::from(format!("  network - {}", wifi.network_name)));
        lines.push(Line::from(format!("  password - {}", wifi.password)));
        if let (Some(city), Some(state)) = (&wifi.city, &wifi.state) {
            lines.push(Line::from(Span::styled(
                format!("  {city}, {state}"),
                Style::default().fg(Color::DarkGray),
            )));
        }
        lines.push(Line::from(""));
    }

    if filtered.is_empty() {
        let hint = if app.records.is_empty() {
            "No networks yet - Ctrl+N to add one"
        } else {
            "No networks match the search"
        };
        lines.push(Line::from(Span::styled(
            hint,
            Style::default().fg(Color::DarkGray),
        )));
    }

    // Scroll so the whole selected card stays visible.
    let inner_height = area.height.saturating_sub(2) as usize;
    let card_tail = 4;
    let scroll = (selected_line + card_tail).saturating_sub(inner_height) as u16;

    let title = format!("Networks ({} of {})", filtered.len(), app.records.len());
    let list = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));

    frame.render_widget(list, area);
}

fn draw_status_bar(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let status = Paragraph::new(Span::styled(
        app.status.as_str(),
        Style::default().fg(Color::DarkGray),
    ));
    frame.render_widget(status, area);
}

/// Centered overlay rect capped to the frame size.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect::new(
        area.x + (area.width.saturating_sub(w)) / 2,
        area.y + (area.height.saturating_sub(h)) / 2,
        w,
        h,
    )
}

fn draw_form(frame: &mut Frame<'_>, app: &App) {
    let area = centered_rect(60, 15, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default().borders(Borders::ALL).title("Add new network");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // One row per field plus a spacer, focused row highlighted.
    let mut lines: Vec<Line<'_>> = Vec::new();
    let mut cursor = (inner.x, inner.y);
    for field in FormField::ALL {
        let focused = field == app.focus && app.mode == AppMode::AddForm;
        let label_style = if focused {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let label = format!("{:<18}", format!("{}:", field.label()));
        let value = app.draft.field(field);
        if focused {
            let col = (UnicodeWidthStr::width(label.as_str())
                + UnicodeWidthStr::width(value)) as u16;
            cursor = (
                inner.x.saturating_add(col).min(
                    inner.x.saturating_add(inner.width.saturating_sub(1)),
                ),
                inner.y.saturating_add(lines.len() as u16),
            );
        }
        lines.push(Line::from(vec![
            Span::styled(label, label_style),
            Span::raw(value.to_string()),
        ]));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        "Enter submit | Tab next field | Esc close",
        Style::default().fg(Color::DarkGray),
    )));

    frame.render_widget(Paragraph::new(lines), inner);
    frame.set_cursor_position(cursor);
}

fn draw_submit_notice(frame: &mut Frame<'_>) {
    let area = centered_rect(46, 5, frame.area());
    frame.render_widget(Clear, area);

    let notice = Paragraph::new(vec![
        Line::from(Span::styled(
            "WiFi password added successfully",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "press any key to continue",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));

    frame.render_widget(notice, area);
}
