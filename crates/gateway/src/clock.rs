use chrono::Utc;

use orderdesk_core::Timestamp;
use orderdesk_ports::Clock;

/// Real system clock for production use
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Utc::now()
    }
}
