//! Injected time and identifier capabilities.
//!
//! Production code uses the system clock and random v4 ids. Tests inject
//! deterministic implementations so transcripts and artifacts are
//! reproducible without patching globals.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Source of timestamps for session bookkeeping.
pub trait Clock: Send + Sync {
    /// Current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Source of fresh unique identifiers.
pub trait IdSource: Send + Sync {
    /// Mint an identifier never handed out before.
    fn next_id(&self) -> Uuid;
}

/// Random v4 identifiers.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIds;

impl IdSource for RandomIds {
    fn next_id(&self) -> Uuid {
        Uuid::new_v4()
    }
}
