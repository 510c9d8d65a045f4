//! Event, particle and run identity types.
//!
//! Events are numbered from 1 in generation order. A particle is identified
//! by its event and its position in that event's line order.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Event identifier, 1-based.
///
/// Displays zero-padded to three digits (`001`); wider ids print in full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub u32);

impl EventId {
    /// The first event of a run.
    pub const FIRST: EventId = EventId(1);

    /// The id following this one.
    pub fn next(self) -> Self {
        EventId(self.0 + 1)
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03}", self.0)
    }
}

impl From<u32> for EventId {
    fn from(id: u32) -> Self {
        EventId(id)
    }
}

/// Handle to one particle instance: event plus 0-based index in line order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ParticleId {
    pub event: EventId,
    pub index: u32,
}

impl ParticleId {
    pub fn new(event: EventId, index: u32) -> Self {
        Self { event, index }
    }
}

impl fmt::Display for ParticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.event, self.index)
    }
}

/// Run ID for correlating log records of one invocation.
///
/// Format: `run-YYYYMMDD-HHMMSS-xxxxxxxx`
/// Example: `run-20260115-143022-9f1c2ab4`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(pub String);

impl RunId {
    /// Generate a new run ID.
    pub fn new() -> Self {
        let now = chrono::Utc::now();
        let uuid = uuid::Uuid::new_v4().simple().to_string();
        RunId(format!(
            "run-{}-{}-{}",
            now.format("%Y%m%d"),
            now.format("%H%M%S"),
            &uuid[..8]
        ))
    }

    /// Parse an existing run ID string.
    pub fn parse(s: &str) -> Option<Self> {
        let rest = s.strip_prefix("run-")?;
        let mut parts = rest.split('-');
        let date = parts.next()?;
        let time = parts.next()?;
        let suffix = parts.next()?;
        if parts.next().is_some() {
            return None;
        }
        if date.len() != 8 || !date.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        if time.len() != 6 || !time.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        if suffix.len() != 8 || !suffix.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        Some(RunId(s.to_string()))
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
