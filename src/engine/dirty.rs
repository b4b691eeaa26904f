use serde_json::{json, Value};
use std::collections::HashMap;

use crate::engine::EngineError;
use crate::models::{CronJob, SessionItem, Snapshot};

/// The named UI sections the dashboard can repaint independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Cost,
    Crons,
    Sessions,
    Chart,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Cost,
        Section::Crons,
        Section::Sessions,
        Section::Chart,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Section::Cost => "cost",
            Section::Crons => "crons",
            Section::Sessions => "sessions",
            Section::Chart => "chart",
        }
    }
}

/// One declared comparison key for a section: a name for diagnostics and an
/// extractor producing a comparable value from a snapshot.
pub struct FieldKey {
    pub name: &'static str,
    pub get: fn(&Snapshot) -> Value,
}

/// Which sections need repainting this cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirtyFlags {
    dirty: HashMap<Section, bool>,
}

impl DirtyFlags {
    pub fn clean() -> Self {
        Self {
            dirty: Section::ALL.iter().map(|s| (*s, false)).collect(),
        }
    }

    /// First-paint flags: everything repaints.
    pub fn all_dirty() -> Self {
        Self {
            dirty: Section::ALL.iter().map(|s| (*s, true)).collect(),
        }
    }

    pub fn set(&mut self, section: Section, dirty: bool) {
        self.dirty.insert(section, dirty);
    }

    pub fn is_dirty(&self, section: Section) -> bool {
        self.dirty.get(&section).copied().unwrap_or(false)
    }

    pub fn any(&self) -> bool {
        self.dirty.values().any(|d| *d)
    }

    /// OR-merge, used when snapshots batch up before a frame fires.
    pub fn merge(&mut self, other: &DirtyFlags) {
        for section in Section::ALL {
            if other.is_dirty(section) {
                self.set(section, true);
            }
        }
    }
}

/// Compares two snapshots section by section using declared key lists.
pub struct DirtyChecker {
    guards: Vec<(Section, Vec<FieldKey>)>,
}

impl DirtyChecker {
    pub fn empty() -> Self {
        Self { guards: Vec::new() }
    }

    /// The production guard table. Every section of `Section::ALL` is
    /// registered here with at least one key.
    pub fn with_default_guards() -> Result<Self, EngineError> {
        let mut checker = Self::empty();
        checker.register(
            Section::Cost,
            vec![
                FieldKey {
                    name: "totalCostToday",
                    get: |s| json!(s.total_cost_today),
                },
                FieldKey {
                    name: "projectedMonthly",
                    get: |s| json!(s.projected_monthly),
                },
                FieldKey {
                    name: "activeSessions",
                    get: |s| json!(s.active_sessions),
                },
            ],
        )?;
        checker.register(
            Section::Crons,
            vec![FieldKey {
                name: "crons",
                get: cron_digest,
            }],
        )?;
        checker.register(
            Section::Sessions,
            vec![FieldKey {
                name: "sessions",
                get: session_digest,
            }],
        )?;
        checker.register(
            Section::Chart,
            vec![FieldKey {
                name: "dailyChart",
                get: chart_digest,
            }],
        )?;
        Ok(checker)
    }

    /// An empty key list would make the section permanently clean, so it is
    /// rejected here instead of silently breaking responsiveness.
    pub fn register(
        &mut self,
        section: Section,
        keys: Vec<FieldKey>,
    ) -> Result<(), EngineError> {
        if keys.is_empty() {
            return Err(EngineError::EmptyGuardKeys(section.name()));
        }
        self.guards.push((section, keys));
        Ok(())
    }

    pub fn registered_sections(&self) -> impl Iterator<Item = (Section, usize)> + '_ {
        self.guards.iter().map(|(s, keys)| (*s, keys.len()))
    }

    /// No baseline yet means first paint: everything is dirty.
    pub fn compare(&self, prev: Option<&Snapshot>, current: &Snapshot) -> DirtyFlags {
        let Some(prev) = prev else {
            return DirtyFlags::all_dirty();
        };
        let mut flags = DirtyFlags::clean();
        for (section, keys) in &self.guards {
            if section_changed(prev, current, keys) {
                flags.set(*section, true);
            }
        }
        flags
    }
}

/// True iff any declared key differs by value between the two snapshots.
pub fn section_changed(prev: &Snapshot, current: &Snapshot, keys: &[FieldKey]) -> bool {
    keys.iter().any(|key| (key.get)(prev) != (key.get)(current))
}

/// Content-normalized comparable form of a volatile list: sorted by a
/// stable key so backend-assigned iteration order can't cause spurious
/// repaints, with the normalizer dropping or quantizing timestamp noise.
pub fn stable_snapshot<T>(
    items: &[T],
    key: impl Fn(&T) -> String,
    normalize: impl Fn(&T) -> Value,
) -> Value {
    let mut pairs: Vec<(String, Value)> = items
        .iter()
        .map(|item| (key(item), normalize(item)))
        .collect();
    pairs.sort_by(|a, b| a.0.cmp(&b.0));
    Value::Array(pairs.into_iter().map(|(_, v)| v).collect())
}

fn cron_digest(snapshot: &Snapshot) -> Value {
    stable_snapshot(
        &snapshot.crons,
        |c: &CronJob| c.name.clone(),
        |c| {
            json!({
                "name": c.name,
                "schedule": c.schedule,
                "status": c.status,
                "lastRun": c.last_run.as_deref().map(quantize_to_minute),
                "nextRun": c.next_run.as_deref().map(quantize_to_minute),
            })
        },
    )
}

fn session_digest(snapshot: &Snapshot) -> Value {
    stable_snapshot(
        &snapshot.sessions,
        |s: &SessionItem| s.identity().to_string(),
        |s| {
            json!({
                "id": s.id,
                "name": s.name,
                "model": s.model,
                "task": s.task,
                "active": s.active,
                "color": s.color,
            })
        },
    )
}

fn chart_digest(snapshot: &Snapshot) -> Value {
    Value::Array(
        snapshot
            .daily_chart
            .iter()
            .map(|p| json!({"date": p.date, "cost": p.cost}))
            .collect(),
    )
}

/// "2024-06-01T09:30:17.123Z" → "2024-06-01T09:30"; sub-minute churn in
/// backend timestamps should not repaint a whole section.
fn quantize_to_minute(ts: &str) -> &str {
    ts.get(..16).unwrap_or(ts)
}
