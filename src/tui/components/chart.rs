use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Sparkline};
use ratatui::Frame;

use crate::app::AppState;
use crate::models::Snapshot;
use crate::tui::render::ChartCache;
use crate::tui::theme;

/// Sparkline resolution: dollars to cents, clamped at zero.
pub fn build(snapshot: &Snapshot) -> ChartCache {
    let bars: Vec<u64> = snapshot
        .daily_chart
        .iter()
        .map(|p| (p.cost.max(0.0) * 100.0).round() as u64)
        .collect();
    let label = match (snapshot.daily_chart.first(), snapshot.daily_chart.last()) {
        (Some(first), Some(last)) => {
            let max = snapshot
                .daily_chart
                .iter()
                .fold(0.0_f64, |acc, p| acc.max(p.cost));
            format!("{} … {}  (max ${max:.2})", first.date, last.date)
        }
        _ => "no chart data".to_string(),
    };
    ChartCache { bars, label }
}

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::border_style())
        .title(" Daily spend ")
        .title_style(theme::title_style())
        .title_bottom(state.renderer.chart.label.clone());
    let sparkline = Sparkline::default()
        .block(block)
        .style(Style::default().fg(theme::hex_color(theme::ACCENT).unwrap_or_default()))
        .data(&state.renderer.chart.bars);
    frame.render_widget(sparkline, area);
}
