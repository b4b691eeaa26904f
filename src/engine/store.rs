use crate::engine::EngineError;
use crate::models::Snapshot;

/// Owner of the two snapshots a diff cycle compares.
///
/// `prev` is the last committed (painted) snapshot, `current` the most
/// recently ingested one. They are always structurally independent: ingest
/// builds a fresh owned graph from raw JSON, and commit clones. `prev` must
/// never alias `current`, otherwise the next cycle would diff a snapshot
/// against itself and report every section clean.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    prev: Option<Snapshot>,
    current: Option<Snapshot>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a raw payload into the new `current` snapshot.
    ///
    /// Field-level leniency lives in the `Snapshot` deserializer; this only
    /// fails when the body is not a JSON object at all, in which case
    /// `current` is left untouched so stale data stays visible.
    pub fn ingest(&mut self, raw: &str) -> Result<&Snapshot, EngineError> {
        let snapshot: Snapshot = serde_json::from_str(raw)?;
        Ok(&*self.current.insert(snapshot))
    }

    pub fn current(&self) -> Option<&Snapshot> {
        self.current.as_ref()
    }

    pub fn prev(&self) -> Option<&Snapshot> {
        self.prev.as_ref()
    }

    /// True until the first commit; the renderer paints every section then.
    pub fn is_first_paint(&self) -> bool {
        self.prev.is_none()
    }

    /// Promote `current` to the comparison baseline via deep copy.
    pub fn commit_prev(&mut self) {
        self.prev = self.current.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ingest_parses_and_replaces_current() {
        let mut store = SnapshotStore::new();
        store.ingest(r#"{"totalCostToday": 12.5}"#).unwrap();
        assert_eq!(store.current().unwrap().total_cost_today, 12.5);

        store.ingest(r#"{"totalCostToday": 13.0}"#).unwrap();
        assert_eq!(store.current().unwrap().total_cost_today, 13.0);
    }

    #[test]
    fn bad_payload_keeps_previous_current() {
        let mut store = SnapshotStore::new();
        store.ingest(r#"{"totalCostToday": 1.0}"#).unwrap();
        assert!(store.ingest("<!doctype html>").is_err());
        assert_eq!(store.current().unwrap().total_cost_today, 1.0);
    }

    #[test]
    fn commit_deep_copies_instead_of_aliasing() {
        let mut store = SnapshotStore::new();
        store
            .ingest(r#"{"totalCostToday": 5.0, "sessions": [{"id": "a", "active": true}]}"#)
            .unwrap();
        store.commit_prev();

        // Structurally equal right after commit.
        assert_eq!(store.prev(), store.current());

        // A later ingest must not reach back into prev.
        store
            .ingest(r#"{"totalCostToday": 9.0, "sessions": []}"#)
            .unwrap();
        assert_eq!(store.prev().unwrap().total_cost_today, 5.0);
        assert_eq!(store.prev().unwrap().sessions.len(), 1);
        assert_ne!(store.prev(), store.current());
    }

    #[test]
    fn first_paint_until_first_commit() {
        let mut store = SnapshotStore::new();
        assert!(store.is_first_paint());
        store.ingest("{}").unwrap();
        assert!(store.is_first_paint());
        store.commit_prev();
        assert!(!store.is_first_paint());
    }
}
