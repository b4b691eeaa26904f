use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::{AppState, FocusPanel};
use crate::models::VisibleSession;
use crate::tui::markup::{interp, parse_line, Field};
use crate::tui::theme;

/// One row per visible session: indicator, name (backend accent color if
/// it passes the allow-list), model, task. The live and recent indicators
/// come from the mutually exclusive `active`/`is_recent` booleans and use
/// different colors.
pub fn build(visible: &[VisibleSession]) -> Vec<Line<'static>> {
    if visible.is_empty() {
        return vec![parse_line("<dim>no sessions</>")];
    }
    visible
        .iter()
        .map(|v| {
            let badge = if v.is_recent {
                format!("<fg={}>✓ recent</>", theme::RECENT)
            } else if v.item.active {
                format!("<fg={}>● live</>  ", theme::LIVE)
            } else {
                "<dim>  idle</>  ".to_string()
            };
            let markup = interp(
                &format!("{badge} <fg={{}}><b>{{}}</></>  <dim>{{}}</>  {{}}"),
                &[
                    Field::color(v.item.color.as_deref(), theme::ACCENT),
                    Field::text(v.item.display_name()),
                    Field::text(v.item.model.as_str()),
                    Field::text(v.item.task.as_str()),
                ],
            );
            parse_line(&markup)
        })
        .collect()
}

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let focused = state.ui.focus == FocusPanel::Sessions;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if focused {
            theme::title_style()
        } else {
            theme::border_style()
        })
        .title(" Sessions ")
        .title_style(theme::title_style());
    let paragraph = Paragraph::new(state.renderer.sessions.clone())
        .block(block)
        .scroll((state.ui.session_scroll, 0));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SessionItem;

    fn session(id: &str) -> SessionItem {
        SessionItem {
            id: id.to_string(),
            name: format!("agent-{id}"),
            model: "opus".to_string(),
            task: "refactor".to_string(),
            active: true,
            ..Default::default()
        }
    }

    fn text_of(lines: &[Line]) -> String {
        lines
            .iter()
            .flat_map(|l| l.spans.iter())
            .map(|s| s.content.as_ref())
            .collect()
    }

    #[test]
    fn live_and_recent_badges_are_distinct() {
        let mut finished = session("b");
        finished.active = false;
        let rows = build(&[
            VisibleSession::live(session("a")),
            VisibleSession::recent(finished),
        ]);
        let text = text_of(&rows);
        assert!(text.contains("● live"));
        assert!(text.contains("✓ recent"));

        // The colors behind the indicators differ.
        let live_color = theme::hex_color(theme::LIVE);
        let recent_color = theme::hex_color(theme::RECENT);
        assert_ne!(live_color, recent_color);
        let styled: Vec<_> = rows
            .iter()
            .flat_map(|l| l.spans.iter())
            .filter(|s| s.content.contains("live") || s.content.contains("recent"))
            .collect();
        assert_eq!(styled.len(), 2);
        assert_eq!(styled[0].style.fg, live_color);
        assert_eq!(styled[1].style.fg, recent_color);
    }

    #[test]
    fn hostile_task_string_stays_literal() {
        let mut item = session("x");
        item.task = "<fg=#ff0000>injected</>".to_string();
        let text = text_of(&build(&[VisibleSession::live(item)]));
        assert!(text.contains("<fg=#ff0000>injected</>"));
    }

    #[test]
    fn unsafe_accent_color_falls_back() {
        let mut item = session("x");
        item.color = Some("url(evil)".to_string());
        let rows = build(&[VisibleSession::live(item)]);
        let name_span = rows[0]
            .spans
            .iter()
            .find(|s| s.content.contains("agent-x"))
            .unwrap();
        assert_eq!(name_span.style.fg, theme::hex_color(theme::ACCENT));
    }
}
