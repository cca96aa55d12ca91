use chrono::DateTime;
use chrono::Utc;

/// Time source used by [`TokenMaker`](super::TokenMaker).
///
/// Injected so expiry logic can be exercised at simulated times instead of
/// reading the wall clock directly.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock implementation used outside of tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
