use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timing rules for a single match. All values are in elapsed seconds unless noted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub half_duration: u32,
    pub regulation_duration: u32,
    pub first_extra_time_end: u32,
    /// The displayed match time wraps at this many seconds
    pub display_block: u32,
    pub timeout_duration: u32,
    pub suspension_duration: u32,
    pub timeouts_per_match: u8,
    pub tick_period_ms: u64,
}

impl Default for Match {
    fn default() -> Self {
        Self {
            half_duration: 1800,
            regulation_duration: 3600,
            first_extra_time_end: 3900,
            display_block: 1800,
            timeout_duration: 60,
            suspension_duration: 120,
            timeouts_per_match: 3,
            tick_period_ms: 1000,
        }
    }
}

impl Match {
    /// Never zero, a timer can't run with an empty period
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms.max(1))
    }
}
