use std::collections::HashMap;

use crate::models::{SessionItem, VisibleSession};

/// Grace window during which a finished session stays visible as "recent".
pub const RECENT_WINDOW_MS: i64 = 5 * 60 * 1000;

/// A finished session retained for the grace window.
#[derive(Debug, Clone, PartialEq)]
pub struct RecentEntry {
    pub item: SessionItem,
    /// Epoch ms of the active→inactive transition, as observed by us.
    pub finished_at: i64,
}

/// Time-bounded buffer of recently finished sessions.
///
/// Explicit instance state: the buffer owns its entries and the set of
/// identities that were active last cycle, so independent dashboards get
/// independent buffers and tests get a deterministic clock via `now_ms`.
#[derive(Debug, Default)]
pub struct RecentBuffer {
    entries: HashMap<String, RecentEntry>,
    last_active: HashMap<String, SessionItem>,
}

impl RecentBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Absorb a new session list.
    ///
    /// Every identity that was active last cycle and is no longer active
    /// becomes a RecentEntry stamped `now_ms`. Every identity active again
    /// loses its entry: an item cannot be simultaneously live and recent.
    pub fn update(&mut self, sessions: &[SessionItem], now_ms: i64) {
        let active_now: HashMap<&str, &SessionItem> = sessions
            .iter()
            .filter(|s| s.active)
            .map(|s| (s.identity(), s))
            .collect();

        for (identity, last_item) in &self.last_active {
            if active_now.contains_key(identity.as_str()) {
                continue;
            }
            // Prefer the current list's record for the item (it may carry a
            // backend finishedAt and fresher display fields); fall back to
            // what we saw while it was live if it vanished entirely.
            let item = sessions
                .iter()
                .find(|s| s.identity() == identity && !s.active)
                .cloned()
                .unwrap_or_else(|| last_item.clone());
            self.entries.insert(
                identity.clone(),
                RecentEntry {
                    item,
                    finished_at: now_ms,
                },
            );
        }

        for identity in active_now.keys() {
            self.entries.remove(*identity);
        }

        self.last_active = active_now
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
    }

    /// Drop entries whose grace window has elapsed. Runs once per cycle,
    /// before the visible view is built, so an expired item never renders
    /// for even one extra frame.
    pub fn prune(&mut self, now_ms: i64) {
        self.entries
            .retain(|_, entry| now_ms - entry.finished_at < RECENT_WINDOW_MS);
    }

    /// Live ∪ recent, deduplicated. Active items always win over a stale
    /// entry for the same identity; recent items come after live ones,
    /// newest finish first.
    pub fn visible_view(&self, active: &[SessionItem]) -> Vec<VisibleSession> {
        let mut out: Vec<VisibleSession> = active
            .iter()
            .filter(|s| s.active)
            .cloned()
            .map(VisibleSession::live)
            .collect();

        let mut recent: Vec<&RecentEntry> = self
            .entries
            .values()
            .filter(|e| !out.iter().any(|v| v.item.identity() == e.item.identity()))
            .collect();
        recent.sort_by(|a, b| b.finished_at.cmp(&a.finished_at));
        out.extend(recent.into_iter().map(|e| VisibleSession::recent(e.item.clone())));
        out
    }

    /// Earliest instant at which a current entry falls out of the window.
    pub fn next_expiry(&self) -> Option<i64> {
        self.entries
            .values()
            .map(|e| e.finished_at + RECENT_WINDOW_MS)
            .min()
    }

    /// True once any entry's window has elapsed at `now_ms`.
    pub fn has_expired(&self, now_ms: i64) -> bool {
        self.next_expiry().is_some_and(|deadline| now_ms >= deadline)
    }

    pub fn recent_count(&self) -> usize {
        self.entries.len()
    }

    pub fn reset(&mut self) {
        self.entries.clear();
        self.last_active.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(id: &str, active: bool) -> SessionItem {
        SessionItem {
            id: id.to_string(),
            name: format!("agent-{id}"),
            active,
            ..Default::default()
        }
    }

    #[test]
    fn finish_creates_recent_entry_visible_within_window() {
        let mut buf = RecentBuffer::new();
        let t0 = 1_000_000;

        buf.update(&[session("1", true)], t0 - 10_000);
        buf.update(&[session("1", false)], t0);

        for now in [t0, t0 + 1_000, t0 + RECENT_WINDOW_MS - 1] {
            buf.prune(now);
            let view = buf.visible_view(&[]);
            assert_eq!(view.len(), 1, "expected visible at {now}");
            assert!(view[0].is_recent);
            assert_eq!(view[0].item.identity(), "1");
        }
    }

    #[test]
    fn entry_expires_at_window_boundary() {
        let mut buf = RecentBuffer::new();
        let t0 = 500_000;
        buf.update(&[session("1", true)], t0 - 1);
        buf.update(&[], t0);

        buf.prune(t0 + RECENT_WINDOW_MS);
        assert!(buf.visible_view(&[]).is_empty());
        assert_eq!(buf.recent_count(), 0);
    }

    #[test]
    fn restart_within_window_shows_only_live() {
        let mut buf = RecentBuffer::new();
        let t0 = 100_000;
        buf.update(&[session("1", true)], t0 - 5_000);
        buf.update(&[session("1", false)], t0);
        assert_eq!(buf.recent_count(), 1);

        // Active again before expiry: stale entry removed as a side effect.
        let t1 = t0 + 60_000;
        let live = session("1", true);
        buf.update(&[live.clone()], t1);
        buf.prune(t1);
        let view = buf.visible_view(&[live]);
        assert_eq!(view.len(), 1);
        assert!(!view[0].is_recent);
        assert!(view[0].item.active);
    }

    #[test]
    fn vanished_item_keeps_last_seen_display_fields() {
        let mut buf = RecentBuffer::new();
        let mut item = session("7", true);
        item.task = "index rebuild".to_string();
        buf.update(&[item], 0);
        // Item disappears from the list entirely rather than flipping inactive.
        buf.update(&[], 1_000);

        let view = buf.visible_view(&[]);
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].item.task, "index rebuild");
        assert!(view[0].is_recent);
    }

    #[test]
    fn active_item_wins_over_its_own_stale_entry_in_view() {
        let mut buf = RecentBuffer::new();
        buf.update(&[session("1", true)], 0);
        buf.update(&[session("1", false)], 1_000);

        // The view is asked about an active duplicate without an update
        // having run; the identity must still appear exactly once, live.
        let live = session("1", true);
        let view = buf.visible_view(&[live]);
        assert_eq!(view.len(), 1);
        assert!(!view[0].is_recent);
    }

    #[test]
    fn next_expiry_tracks_earliest_entry() {
        let mut buf = RecentBuffer::new();
        assert_eq!(buf.next_expiry(), None);

        buf.update(&[session("1", true), session("2", true)], 0);
        buf.update(&[session("2", true)], 1_000);
        buf.update(&[], 5_000);

        assert_eq!(buf.next_expiry(), Some(1_000 + RECENT_WINDOW_MS));
        assert!(!buf.has_expired(1_000 + RECENT_WINDOW_MS - 1));
        assert!(buf.has_expired(1_000 + RECENT_WINDOW_MS));
    }

    #[test]
    fn reset_clears_all_state() {
        let mut buf = RecentBuffer::new();
        buf.update(&[session("1", true)], 0);
        buf.update(&[], 1);
        buf.reset();
        assert_eq!(buf.recent_count(), 0);
        assert!(buf.visible_view(&[]).is_empty());
    }
}
