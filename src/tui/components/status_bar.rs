use chrono::Utc;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::AppState;

/// One-line chrome at the bottom: data freshness and anomalies on the
/// left, key hints on the right. Not a diffed section; rebuilt every draw.
pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let mut left: Vec<Span> = Vec::new();

    if state.data.stale {
        left.push(Span::styled(
            " STALE ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));
        if let Some(err) = &state.data.last_fetch_error {
            left.push(Span::styled(
                format!(" {err}"),
                Style::default().fg(Color::Yellow),
            ));
        }
    } else {
        left.push(Span::styled(
            " LIVE ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ));
    }

    if let Some(fetched) = state.data.last_fetch {
        let age = (Utc::now() - fetched).num_seconds().max(0);
        left.push(Span::styled(
            format!(" {age}s ago"),
            Style::default().fg(Color::Gray),
        ));
    }

    if state.ui.paused {
        left.push(Span::styled(
            "  PAUSED",
            Style::default().fg(Color::Yellow),
        ));
    }

    if !state.data.warnings.is_empty() {
        left.push(Span::styled(
            format!("  ⚠ {} data warning(s)", state.data.warnings.len()),
            Style::default().fg(Color::Yellow),
        ));
    }

    if let Some(err) = state.data.engine.scheduler.last_paint_error() {
        left.push(Span::styled(
            format!("  paint error: {err}"),
            Style::default().fg(Color::Red),
        ));
    }

    let right_text = "[tab] focus  [j/k] scroll  [p] pause  [r] refresh  [q] quit ";
    let left_len: usize = left.iter().map(|s| s.content.chars().count()).sum();
    let padding = (area.width as usize)
        .saturating_sub(left_len + right_text.chars().count());

    let mut spans = left;
    spans.push(Span::raw(" ".repeat(padding)));
    spans.push(Span::styled(right_text, Style::default().fg(Color::Gray)));

    let paragraph =
        Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}
