use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::AppState;
use crate::models::Snapshot;
use crate::tui::markup::{interp, parse_line, Field};
use crate::tui::theme;

pub fn build(snapshot: &Snapshot) -> Vec<Line<'static>> {
    let mut lines = vec![
        parse_line(&interp(
            "<dim>today</>      <b>{}</>",
            &[Field::money(snapshot.total_cost_today)],
        )),
        parse_line(&interp(
            "<dim>projected</>  {}",
            &[Field::money(snapshot.projected_monthly)],
        )),
    ];
    let active = snapshot.active().count();
    let reported = snapshot.active_sessions.unwrap_or(active as i64);
    lines.push(parse_line(&interp(
        "<dim>active</>     {} <dim>of {} reported</>",
        &[Field::count(active), Field::owned(reported.to_string())],
    )));
    lines
}

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::border_style())
        .title(" Cost ")
        .title_style(theme::title_style());
    let paragraph = Paragraph::new(state.renderer.cost.clone()).block(block);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_formats_money_and_counts() {
        let snapshot: Snapshot = serde_json::from_str(
            r#"{"totalCostToday": 12.345, "projectedMonthly": 300.0,
                "sessions": [{"id": 1, "active": true}, {"id": 2, "active": false}]}"#,
        )
        .unwrap();
        let lines = build(&snapshot);
        let text: String = lines
            .iter()
            .flat_map(|l| l.spans.iter())
            .map(|s| s.content.as_ref())
            .collect();
        assert!(text.contains("$12.35"));
        assert!(text.contains("$300.00"));
        assert!(text.contains("active     1"));
    }
}
