//! Append-only logs backing a session transcript.

use crate::types::Message;
use parking_lot::RwLock;
use pricecraft_protocol::Artifact;

/// Ordered log of messages for one session.
pub type MessageLog = AppendLog<Message>;
/// Ordered log of artifacts for one session.
pub type ArtifactLog = AppendLog<Artifact>;

/// Append-only log with snapshot reads.
///
/// Appends never fail and there is no capacity bound; sessions are short
/// lived and discarded whole. No delete, update, or reorder exists.
#[derive(Debug, Default)]
pub struct AppendLog<T> {
    items: RwLock<Vec<T>>,
}

impl<T: Clone> AppendLog<T> {
    /// Create an empty log.
    pub fn new() -> Self {
        Self {
            items: RwLock::new(Vec::new()),
        }
    }

    /// Add an item to the end of the log.
    pub fn append(&self, item: T) {
        self.items.write().push(item);
    }

    /// Owned snapshot of the log in insertion order.
    ///
    /// Later appends do not alter a previously returned snapshot.
    pub fn all(&self) -> Vec<T> {
        self.items.read().clone()
    }

    /// Number of items appended so far.
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    /// True when nothing has been appended.
    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::AppendLog;
    use pretty_assertions::assert_eq;

    #[test]
    fn snapshots_are_stable_across_appends() {
        let log = AppendLog::new();
        log.append("a");
        log.append("b");

        let before = log.all();
        assert_eq!(before, vec!["a", "b"]);
        assert_eq!(log.all(), before);

        log.append("c");
        assert_eq!(before, vec!["a", "b"]);
        assert_eq!(log.all(), vec!["a", "b", "c"]);
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn new_log_is_empty() {
        let log: AppendLog<&str> = AppendLog::new();
        assert!(log.is_empty());
        assert_eq!(log.all(), Vec::<&str>::new());
    }
}
