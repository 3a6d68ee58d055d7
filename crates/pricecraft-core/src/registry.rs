//! In-memory session registry keyed by session id.

use crate::clock::{Clock, IdSource, RandomIds, SystemClock};
use crate::conversation::Conversation;
use crate::gateway::AnalysisGateway;
use log::info;
use parking_lot::RwLock;
use pricecraft_protocol::SessionId;
use std::collections::HashMap;
use std::sync::Arc;

/// Hands out per-session conversations, creating them on first use.
///
/// Each session gets its own transcript, artifact log, and status flag;
/// nothing is shared across sessions except the backend itself.
pub struct SessionRegistry {
    sessions: RwLock<HashMap<SessionId, Arc<Conversation>>>,
    gateway: Arc<dyn AnalysisGateway>,
    ids: Arc<dyn IdSource>,
    clock: Arc<dyn Clock>,
}

impl SessionRegistry {
    /// Create a registry over the given backend with system id and time
    /// sources.
    pub fn new(gateway: Arc<dyn AnalysisGateway>) -> Self {
        Self::with_env(gateway, Arc::new(RandomIds), Arc::new(SystemClock))
    }

    /// Create a registry with injected id and time sources, shared by all
    /// sessions it creates.
    pub fn with_env(
        gateway: Arc<dyn AnalysisGateway>,
        ids: Arc<dyn IdSource>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            gateway,
            ids,
            clock,
        }
    }

    /// Fetch the conversation for `id`, creating it if unseen.
    pub fn open(&self, id: SessionId) -> Arc<Conversation> {
        if let Some(existing) = self.sessions.read().get(&id) {
            return existing.clone();
        }
        self.sessions
            .write()
            .entry(id)
            .or_insert_with(|| {
                info!("created session (session_id={id})");
                Arc::new(Conversation::with_env(
                    self.gateway.clone(),
                    self.ids.clone(),
                    self.clock.clone(),
                ))
            })
            .clone()
    }

    /// Drop the conversation for `id`, discarding its state.
    ///
    /// Returns false when the session was never opened.
    pub fn close(&self, id: SessionId) -> bool {
        let removed = self.sessions.write().remove(&id).is_some();
        if removed {
            info!("closed session (session_id={id})");
        }
        removed
    }

    /// Number of live sessions.
    pub fn session_count(&self) -> usize {
        self.sessions.read().len()
    }
}

#[cfg(test)]
mod tests {
    use super::SessionRegistry;
    use crate::stub::StubBackend;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use uuid::Uuid;

    #[test]
    fn open_reuses_the_same_session() {
        let registry = SessionRegistry::new(Arc::new(StubBackend::instant()));
        let id = Uuid::new_v4();
        let first = registry.open(id);
        let second = registry.open(id);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.session_count(), 1);
    }

    #[tokio::test]
    async fn sessions_are_isolated() {
        let registry = SessionRegistry::new(Arc::new(StubBackend::instant()));
        let left = registry.open(Uuid::new_v4());
        let right = registry.open(Uuid::new_v4());

        left.send_turn("pricing help", Vec::new()).await.expect("turn");
        assert_eq!(left.messages().len(), 2);
        assert_eq!(right.messages().len(), 0);
        assert_eq!(registry.session_count(), 2);
    }

    #[test]
    fn close_discards_session_state() {
        let registry = SessionRegistry::new(Arc::new(StubBackend::instant()));
        let id = Uuid::new_v4();
        registry.open(id);
        assert!(registry.close(id));
        assert!(!registry.close(id));
        assert_eq!(registry.session_count(), 0);
    }
}
