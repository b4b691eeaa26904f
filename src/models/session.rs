use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::lenient;

/// One tracked unit of work as reported by the backend snapshot.
///
/// The backend is free to add fields; anything we don't model lands in
/// `extra` so a superset payload never fails to parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SessionItem {
    /// Backend identity. Tolerates numeric ids (`{"id": 1}`) by stringifying.
    #[serde(default, deserialize_with = "lenient::de_ident")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub task: String,
    #[serde(default)]
    pub active: bool,
    /// Epoch milliseconds, set by the backend once the item stops being active.
    #[serde(default, deserialize_with = "lenient::de_opt_i64")]
    pub finished_at: Option<i64>,
    /// Optional accent color; only used after passing the hex allow-list.
    #[serde(default)]
    pub color: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl SessionItem {
    /// Stable identity key: `id` when present, otherwise `name`.
    pub fn identity(&self) -> &str {
        if self.id.is_empty() {
            &self.name
        } else {
            &self.id
        }
    }

    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            self.identity()
        } else {
            &self.name
        }
    }
}

/// A session as it appears in the merged live ∪ recent view.
///
/// Derived per cycle, never stored. `is_recent` and `item.active` are
/// mutually exclusive: an active item is never tagged recent.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibleSession {
    pub item: SessionItem,
    pub is_recent: bool,
}

impl VisibleSession {
    pub fn live(item: SessionItem) -> Self {
        Self {
            item,
            is_recent: false,
        }
    }

    pub fn recent(item: SessionItem) -> Self {
        Self {
            item,
            is_recent: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_id_is_stringified() {
        let s: SessionItem = serde_json::from_str(r#"{"id": 1, "active": true}"#).unwrap();
        assert_eq!(s.identity(), "1");
        assert!(s.active);
    }

    #[test]
    fn identity_falls_back_to_name() {
        let s: SessionItem = serde_json::from_str(r#"{"name": "builder"}"#).unwrap();
        assert_eq!(s.identity(), "builder");
    }

    #[test]
    fn unknown_fields_are_tolerated() {
        let s: SessionItem =
            serde_json::from_str(r#"{"id": "a", "pid": 4242, "cwd": "/tmp"}"#).unwrap();
        assert_eq!(s.extra.get("pid").and_then(Value::as_i64), Some(4242));
    }
}
