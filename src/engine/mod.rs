pub mod dirty;
pub mod escape;
pub mod recent;
pub mod scheduler;
pub mod store;

pub use dirty::{DirtyChecker, DirtyFlags, Section};
pub use recent::{RecentBuffer, RECENT_WINDOW_MS};
pub use scheduler::{CyclePhase, PaintHost, RenderScheduler};
pub use store::SnapshotStore;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// An empty key list makes a section permanently clean; refuse it up
    /// front instead of silently losing responsiveness.
    #[error("section {0} registered with an empty guard-key list")]
    EmptyGuardKeys(&'static str),
    #[error("malformed snapshot payload: {0}")]
    BadPayload(#[from] serde_json::Error),
}

/// The whole update engine of one dashboard instance: snapshot store,
/// dirty checker, recent buffer, and render scheduler, wired in the fixed
/// poll → diff → buffer-update → schedule → (frame) paint → commit order.
pub struct Engine {
    pub store: SnapshotStore,
    pub checker: DirtyChecker,
    pub recent: RecentBuffer,
    pub scheduler: RenderScheduler,
}

impl Engine {
    pub fn new() -> Result<Self, EngineError> {
        Ok(Self {
            store: SnapshotStore::new(),
            checker: DirtyChecker::with_default_guards()?,
            recent: RecentBuffer::new(),
            scheduler: RenderScheduler::new(),
        })
    }

    /// One poll's synchronous half: ingest, diff against the committed
    /// baseline, absorb session transitions, and queue a paint if anything
    /// is dirty (or on first load). Returns the flags computed for this
    /// snapshot.
    pub fn ingest(&mut self, raw: &str, now_ms: i64) -> Result<DirtyFlags, EngineError> {
        self.store.ingest(raw)?;
        self.scheduler.begin_diff();
        if let Some(current) = self.store.current() {
            let flags = self.checker.compare(self.store.prev(), current);
            self.recent.update(&current.sessions, now_ms);
            if flags.any() {
                self.scheduler.schedule(flags.clone());
            } else {
                self.scheduler.diff_complete();
            }
            Ok(flags)
        } else {
            Ok(DirtyFlags::clean())
        }
    }

    /// The frame boundary; forwards to the scheduler.
    pub fn on_frame<H: PaintHost>(&mut self, host: &mut H, now_ms: i64) -> bool {
        self.scheduler
            .on_frame(&mut self.store, &mut self.recent, host, now_ms)
    }

    pub fn cancel_all(&mut self) {
        self.scheduler.cancel_all();
    }
}
