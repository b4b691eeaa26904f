use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::{AppState, FocusPanel};
use crate::models::Snapshot;
use crate::tui::markup::{interp, parse_line, Field};
use crate::tui::theme;

pub fn build(snapshot: &Snapshot) -> Vec<Line<'static>> {
    if snapshot.crons.is_empty() {
        return vec![parse_line("<dim>no scheduled jobs</>")];
    }
    snapshot
        .crons
        .iter()
        .map(|cron| {
            let status = cron.status.as_deref().unwrap_or("-");
            let mut markup = interp(
                "<b>{}</>  <fg=#8be9fd>{}</>  <dim>{}</>",
                &[
                    Field::text(cron.name.as_str()),
                    Field::text(cron.schedule.as_str()),
                    Field::text(status),
                ],
            );
            if !cron.schedule_is_valid() {
                markup.push_str(&format!("  <fg={}>⚠ schedule?</>", theme::WARN));
            }
            parse_line(&markup)
        })
        .collect()
}

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let focused = state.ui.focus == FocusPanel::Crons;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if focused {
            theme::title_style()
        } else {
            theme::border_style()
        })
        .title(" Schedule ")
        .title_style(theme::title_style());
    let paragraph = Paragraph::new(state.renderer.crons.clone())
        .block(block)
        .scroll((state.ui.cron_scroll, 0));
    frame.render_widget(paragraph, area);
}
