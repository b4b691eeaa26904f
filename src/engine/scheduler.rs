use anyhow::Result;

use crate::engine::dirty::{DirtyFlags, Section};
use crate::engine::recent::RecentBuffer;
use crate::engine::store::SnapshotStore;
use crate::models::{SessionItem, Snapshot, VisibleSession};

/// The paint side of a cycle. The production host is the TUI renderer;
/// tests use a recording mock so frame delivery needs no real display clock.
///
/// Inputs are read-only: a host must not mutate engine state during paint.
pub trait PaintHost {
    fn paint(
        &mut self,
        snapshot: &Snapshot,
        visible: &[VisibleSession],
        flags: &DirtyFlags,
    ) -> Result<()>;
}

/// Where a poll cycle currently is. Diffing and painting are synchronous,
/// so from the outside the machine rests in `Idle` or `Scheduled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CyclePhase {
    Idle,
    Diffing,
    Scheduled,
    Painting,
    Committed,
}

/// Coordinates poll→diff→paint on the host's frame boundary.
///
/// At most one paint runs per frame: snapshots arriving before the frame
/// fires OR-merge their flags and the latest snapshot paints once. Inside a
/// frame, render happens strictly before commit, so the renderer still sees
/// the pre-commit baseline while it executes.
#[derive(Debug)]
pub struct RenderScheduler {
    phase: CyclePhase,
    pending: Option<DirtyFlags>,
    cancelled: bool,
    last_paint_error: Option<String>,
}

impl Default for RenderScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderScheduler {
    pub fn new() -> Self {
        Self {
            phase: CyclePhase::Idle,
            pending: None,
            cancelled: false,
            last_paint_error: None,
        }
    }

    pub fn phase(&self) -> CyclePhase {
        self.phase
    }

    pub fn has_pending_paint(&self) -> bool {
        self.pending.is_some()
    }

    pub fn last_paint_error(&self) -> Option<&str> {
        self.last_paint_error.as_deref()
    }

    /// Marks the synchronous diff computation that follows an ingest.
    pub fn begin_diff(&mut self) {
        if !self.cancelled {
            self.phase = CyclePhase::Diffing;
        }
    }

    /// Marks a diff that found nothing dirty; the phase falls back to
    /// whatever the pending queue implies.
    pub fn diff_complete(&mut self) {
        if self.cancelled {
            return;
        }
        self.phase = if self.pending.is_some() {
            CyclePhase::Scheduled
        } else {
            CyclePhase::Idle
        };
    }

    /// Queue a paint for the next frame, merging with any paint already
    /// queued this frame.
    pub fn schedule(&mut self, flags: DirtyFlags) {
        if self.cancelled {
            return;
        }
        match &mut self.pending {
            Some(pending) => pending.merge(&flags),
            None => self.pending = Some(flags),
        }
        self.phase = CyclePhase::Scheduled;
    }

    /// Host teardown: any scheduled paint becomes a no-op and no partial
    /// commit can occur.
    pub fn cancel_all(&mut self) {
        self.pending = None;
        self.cancelled = true;
        self.phase = CyclePhase::Idle;
    }

    /// The frame boundary. Runs prune → view → render → commit, in that
    /// order, exactly once per call when a paint is pending. A frame with
    /// nothing pending still paints if a recent entry's window has elapsed,
    /// so an expired item never stays on screen waiting for backend churn.
    ///
    /// A paint error skips the commit (the old baseline stays valid for the
    /// next diff), is reported through tracing and `last_paint_error`, and
    /// never stops later cycles from scheduling.
    pub fn on_frame<H: PaintHost>(
        &mut self,
        store: &mut SnapshotStore,
        recent: &mut RecentBuffer,
        host: &mut H,
        now_ms: i64,
    ) -> bool {
        if self.cancelled {
            self.pending = None;
            return false;
        }
        let flags = match self.pending.take() {
            Some(flags) => flags,
            // An entry aging out is a paint of its own: the sessions
            // section must drop it this frame even though no snapshot
            // changed.
            None if recent.has_expired(now_ms) => {
                let mut flags = DirtyFlags::clean();
                flags.set(Section::Sessions, true);
                flags
            }
            None => return false,
        };
        let Some(snapshot) = store.current().cloned() else {
            self.phase = CyclePhase::Idle;
            return false;
        };

        self.phase = CyclePhase::Painting;
        recent.prune(now_ms);
        let active: Vec<SessionItem> = snapshot.active().cloned().collect();
        let visible = recent.visible_view(&active);

        match host.paint(&snapshot, &visible, &flags) {
            Ok(()) => {
                self.phase = CyclePhase::Committed;
                store.commit_prev();
                self.last_paint_error = None;
                self.phase = CyclePhase::Idle;
                true
            }
            Err(err) => {
                tracing::error!(error = %err, "paint failed; baseline left uncommitted");
                self.last_paint_error = Some(err.to_string());
                self.phase = CyclePhase::Idle;
                false
            }
        }
    }
}
