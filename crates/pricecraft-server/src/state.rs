//! Shared state wired into the HTTP handlers.

use pricecraft_config::PricecraftConfig;
use pricecraft_core::{
    AnalysisGateway, Clock, FileParser, IdSource, RandomIds, SessionRegistry, StubBackend,
    SystemClock,
};
use pricecraft_protocol::SessionId;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// Session used for chat requests that do not name one.
pub const DEFAULT_SESSION: SessionId = Uuid::nil();

/// Shared state for the HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Per-session conversations.
    pub sessions: Arc<SessionRegistry>,
    /// File extraction backend.
    pub parser: Arc<dyn FileParser>,
    /// Identifier source for upload records.
    pub ids: Arc<dyn IdSource>,
    /// Timestamp source for upload records.
    pub clock: Arc<dyn Clock>,
    /// Simulated upload latency.
    pub upload_delay: Duration,
}

impl AppState {
    /// Wire the stub backend with config-driven latency and system id and
    /// time sources.
    pub fn new(config: &PricecraftConfig) -> Self {
        let backend = Arc::new(StubBackend::new(&config.gateway));
        Self::with_env(
            config,
            backend.clone(),
            backend,
            Arc::new(RandomIds),
            Arc::new(SystemClock),
        )
    }

    /// Wire explicit backends and id/time sources, for tests and embedders
    /// bringing their own analysis service.
    pub fn with_env(
        config: &PricecraftConfig,
        gateway: Arc<dyn AnalysisGateway>,
        parser: Arc<dyn FileParser>,
        ids: Arc<dyn IdSource>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            sessions: Arc::new(SessionRegistry::with_env(
                gateway,
                ids.clone(),
                clock.clone(),
            )),
            parser,
            ids,
            clock,
            upload_delay: Duration::from_millis(config.gateway.upload_delay_ms),
        }
    }
}
