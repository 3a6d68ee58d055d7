use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use pricecraft_core::{Clock, IdSource};
use uuid::Uuid;

/// Clock that always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    instant: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self { instant }
    }
}

impl Default for FixedClock {
    fn default() -> Self {
        Self::new(DateTime::<Utc>::UNIX_EPOCH)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.instant
    }
}

/// Ids drawn from a counter so transcripts are reproducible.
#[derive(Debug, Default)]
pub struct SequentialIds {
    next: Mutex<u128>,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// The id the counter will hand out at position `index`, for
    /// assertions against recorded output.
    pub fn id_at(index: u128) -> Uuid {
        Uuid::from_u128(index)
    }
}

impl IdSource for SequentialIds {
    fn next_id(&self) -> Uuid {
        let mut next = self.next.lock();
        let id = Uuid::from_u128(*next);
        *next += 1;
        id
    }
}
