use chrono::{DateTime, Utc};

use crate::engine::{Engine, EngineError};

/// Engine-owned data plus what the app knows about its freshness.
pub struct DataState {
    pub engine: Engine,
    /// Sanity warnings from the last successfully ingested snapshot.
    pub warnings: Vec<String>,
    pub last_fetch: Option<DateTime<Utc>>,
    /// Set after a fetch or parse failure; cleared by the next good poll.
    /// Stale data stays visible, it is never blanked.
    pub stale: bool,
    pub last_fetch_error: Option<String>,
}

impl DataState {
    pub fn new() -> Result<Self, EngineError> {
        Ok(Self {
            engine: Engine::new()?,
            warnings: Vec::new(),
            last_fetch: None,
            stale: false,
            last_fetch_error: None,
        })
    }
}
