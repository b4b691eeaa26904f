/// Everything the main loop can be asked to do, whether it came from a
/// key press or a background producer.
#[derive(Debug, Clone)]
pub enum Action {
    /// Frame heartbeat; drives the render scheduler.
    Tick,
    Quit,
    TogglePause,
    /// Re-read the snapshot source now instead of waiting for the poller.
    ForceRefresh,
    NextPanel,
    ScrollUp,
    ScrollDown,
    Resize(u16, u16),
    /// Raw snapshot body fetched by the poller.
    SnapshotFetched(String),
    /// The poller could not produce a snapshot; existing data stays up.
    FetchFailed(String),
}
