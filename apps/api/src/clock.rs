use chrono::{DateTime, Utc};

/// Time source for day-boundary resolution.
///
/// Carried in `AppState` as `Arc<dyn Clock>` so tests can pin "now" instead
/// of racing the wall clock across a midnight rollover.
pub trait Clock: Send + Sync {
    fn now_utc(&self) -> DateTime<Utc>;
}

/// Wall-clock implementation used in production.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
