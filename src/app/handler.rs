use anyhow::Result;
use chrono::Utc;
use std::path::PathBuf;
use tokio::sync::mpsc;

use crate::app::{Action, AppState};
use crate::source;

/// What action processing needs besides the state itself.
pub struct RuntimeContext {
    pub data_path: PathBuf,
    pub action_tx: mpsc::UnboundedSender<Action>,
}

pub fn process_action(state: &mut AppState, action: Action, ctx: &RuntimeContext) -> Result<()> {
    match action {
        Action::Tick => on_frame(state),
        Action::SnapshotFetched(raw) => on_snapshot(state, &raw),
        Action::FetchFailed(err) => {
            tracing::warn!(error = %err, "snapshot fetch failed; keeping stale data");
            state.data.stale = true;
            state.data.last_fetch_error = Some(err);
        }
        Action::ForceRefresh => {
            source::fetch_once(ctx.data_path.clone(), ctx.action_tx.clone());
        }
        Action::Quit => {
            state.ui.should_quit = true;
            state.data.engine.cancel_all();
        }
        Action::TogglePause => state.ui.paused = !state.ui.paused,
        Action::NextPanel => state.ui.next_panel(),
        Action::ScrollUp => state.ui.scroll(-1),
        Action::ScrollDown => state.ui.scroll(1),
        Action::Resize(w, h) => state.ui.terminal_size = (w, h),
    }
    Ok(())
}

/// Frame boundary. Painting while paused is skipped entirely; the
/// scheduler keeps the pending flags, so unpausing repaints on the next
/// tick.
fn on_frame(state: &mut AppState) {
    if state.ui.paused {
        return;
    }
    let now_ms = Utc::now().timestamp_millis();
    let AppState { data, renderer, .. } = state;
    data.engine.on_frame(renderer, now_ms);
}

fn on_snapshot(state: &mut AppState, raw: &str) {
    let now_ms = Utc::now().timestamp_millis();
    match state.data.engine.ingest(raw, now_ms) {
        Ok(_flags) => {
            state.data.stale = false;
            state.data.last_fetch_error = None;
            state.data.last_fetch = Some(Utc::now());
            let warnings = state
                .data
                .engine
                .store
                .current()
                .map(|s| s.sanity_warnings())
                .unwrap_or_default();
            for warning in &warnings {
                tracing::warn!(%warning, "snapshot sanity check");
            }
            state.data.warnings = warnings;
        }
        Err(err) => {
            // A body that isn't JSON at all is a failed poll, not a new
            // empty snapshot; whatever is on screen stays on screen.
            tracing::warn!(error = %err, "snapshot rejected");
            state.data.stale = true;
            state.data.last_fetch_error = Some(err.to_string());
        }
    }
}
