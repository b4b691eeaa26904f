//! Snapshot source: the backend-maintained JSON file, read on an interval.
//!
//! The poller is a detached producer feeding the action channel, like the
//! terminal input thread. It never interprets the payload; parse failures
//! are the engine's call. A read failure is reported as `FetchFailed` so
//! the UI can flag staleness without blanking anything.

use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::app::Action;

pub fn spawn_poller(
    path: PathBuf,
    interval: Duration,
    tx: mpsc::UnboundedSender<Action>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            let action = match read_source(&path).await {
                Ok(raw) => Action::SnapshotFetched(raw),
                Err(err) => Action::FetchFailed(err),
            };
            if tx.send(action).is_err() {
                break; // Receiver gone, dashboard shut down
            }
        }
    })
}

/// One immediate read outside the interval (the `r` key).
pub fn fetch_once(path: PathBuf, tx: mpsc::UnboundedSender<Action>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let action = match read_source(&path).await {
            Ok(raw) => Action::SnapshotFetched(raw),
            Err(err) => Action::FetchFailed(err),
        };
        let _ = tx.send(action);
    })
}

async fn read_source(path: &Path) -> Result<String, String> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|err| format!("{}: {err}", path.display()))
}
