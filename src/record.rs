use std::fmt;

use tokio::time::Instant;

/// A single state change of a mote, stamped relative to process start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventRecord {
    identifier: u16,
    state: bool,
    timestamp_ms: u64,
}

impl EventRecord {
    /// Builds a record for a message arriving now. Any nonzero `raw_state` is "on".
    pub fn new(identifier: u16, raw_state: u16, start_time: Instant) -> Self {
        let elapsed = Instant::now().saturating_duration_since(start_time);
        EventRecord::from_parts(
            identifier,
            raw_state != 0,
            u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
        )
    }

    pub fn from_parts(identifier: u16, state: bool, timestamp_ms: u64) -> Self {
        EventRecord {
            identifier,
            state,
            timestamp_ms,
        }
    }

    pub fn identifier(&self) -> u16 {
        self.identifier
    }

    pub fn state(&self) -> bool {
        self.state
    }

    /// Milliseconds since start
    pub fn timestamp_ms(&self) -> u64 {
        self.timestamp_ms
    }

    fn off_or_on(&self) -> &'static str {
        if self.state {
            "on"
        } else {
            "off"
        }
    }
}

impl fmt::Display for EventRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] Mote {} turned {}",
            self.timestamp_ms / 1000,
            self.identifier,
            self.off_or_on()
        )
    }
}
