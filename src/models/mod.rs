mod lenient;
mod session;
mod snapshot;

pub use session::{SessionItem, VisibleSession};
pub use snapshot::{ChartPoint, CronJob, Snapshot};
