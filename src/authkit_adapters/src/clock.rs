use authkit_core::Clock;
use chrono::{DateTime, Utc};

/// Wall-clock time source for production wiring.
#[derive(Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
