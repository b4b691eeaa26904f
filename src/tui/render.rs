use anyhow::Result;
use ratatui::text::Line;

use crate::engine::{DirtyFlags, PaintHost, Section};
use crate::models::{Snapshot, VisibleSession};
use crate::tui::components;

#[derive(Debug, Default)]
pub struct ChartCache {
    /// Daily costs scaled for the sparkline.
    pub bars: Vec<u64>,
    /// "2024-01-01 … 2024-01-31  (max $12.40)"
    pub label: String,
}

/// The paint host: per-section line caches the draw loop displays.
///
/// `paint` rebuilds only the sections whose dirty flag is set (first paint
/// arrives with every flag set), reading the snapshot and the merged
/// session view without mutating either. Everything interpolated here goes
/// through `tui::markup`, so backend strings are escaped exactly once.
#[derive(Debug, Default)]
pub struct Renderer {
    pub cost: Vec<Line<'static>>,
    pub crons: Vec<Line<'static>>,
    pub sessions: Vec<Line<'static>>,
    pub chart: ChartCache,
    painted_frames: u64,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_painted(&self) -> bool {
        self.painted_frames > 0
    }
}

impl PaintHost for Renderer {
    fn paint(
        &mut self,
        snapshot: &Snapshot,
        visible: &[VisibleSession],
        flags: &DirtyFlags,
    ) -> Result<()> {
        if flags.is_dirty(Section::Cost) {
            self.cost = components::cost::build(snapshot);
        }
        if flags.is_dirty(Section::Crons) {
            self.crons = components::crons::build(snapshot);
        }
        if flags.is_dirty(Section::Sessions) {
            self.sessions = components::sessions::build(visible);
        }
        if flags.is_dirty(Section::Chart) {
            self.chart = components::chart::build(snapshot);
        }
        self.painted_frames += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::DirtyFlags;
    use crate::models::SessionItem;

    fn snap(json: &str) -> Snapshot {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn first_paint_fills_every_cache() {
        let mut renderer = Renderer::new();
        let snapshot = snap(
            r#"{
                "totalCostToday": 3.5,
                "crons": [{"name": "nightly", "schedule": "At 02:00"}],
                "sessions": [{"id": "a", "name": "agent", "active": true}],
                "dailyChart": [{"date": "2024-01-01", "cost": 1.0}]
            }"#,
        );
        let visible = vec![VisibleSession::live(snapshot.sessions[0].clone())];
        renderer
            .paint(&snapshot, &visible, &DirtyFlags::all_dirty())
            .unwrap();

        assert!(!renderer.cost.is_empty());
        assert!(!renderer.crons.is_empty());
        assert!(!renderer.sessions.is_empty());
        assert!(!renderer.chart.bars.is_empty());
        assert!(renderer.has_painted());
    }

    #[test]
    fn clean_sections_keep_their_cache() {
        let mut renderer = Renderer::new();
        let a = snap(r#"{"totalCostToday": 1.0, "sessions": [{"id": "x", "active": true}]}"#);
        let live = vec![VisibleSession::live(a.sessions[0].clone())];
        renderer.paint(&a, &live, &DirtyFlags::all_dirty()).unwrap();
        let sessions_before = renderer.sessions.clone();

        // Only cost dirty: the sessions cache must not be rebuilt even
        // though the view passed in changed.
        let b = snap(r#"{"totalCostToday": 2.0, "sessions": [{"id": "x", "active": true}]}"#);
        let mut flags = DirtyFlags::clean();
        flags.set(Section::Cost, true);
        let other_view = vec![VisibleSession::recent(SessionItem {
            id: "y".into(),
            ..Default::default()
        })];
        renderer.paint(&b, &other_view, &flags).unwrap();
        assert_eq!(renderer.sessions, sessions_before);
    }
}
