use async_trait::async_trait;
use parking_lot::Mutex;
use pricecraft_core::{AnalysisGateway, AnalysisReply, AnalysisRequest, CoreError};
use pricecraft_protocol::Artifact;
use std::sync::Arc;
use tokio::sync::Notify;

/// Gateway returning one canned reply for every request.
#[derive(Debug, Clone)]
pub struct FixedGateway {
    message: String,
    artifact: Option<Artifact>,
}

impl FixedGateway {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            artifact: None,
        }
    }

    pub fn with_artifact(message: impl Into<String>, artifact: Artifact) -> Self {
        Self {
            message: message.into(),
            artifact: Some(artifact),
        }
    }
}

#[async_trait]
impl AnalysisGateway for FixedGateway {
    async fn respond(&self, _request: AnalysisRequest) -> Result<AnalysisReply, CoreError> {
        Ok(AnalysisReply {
            message: self.message.clone(),
            artifact: self.artifact.clone(),
        })
    }
}

/// Gateway that always fails.
#[derive(Debug, Clone)]
pub struct FailingGateway {
    message: String,
}

impl FailingGateway {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl AnalysisGateway for FailingGateway {
    async fn respond(&self, _request: AnalysisRequest) -> Result<AnalysisReply, CoreError> {
        Err(CoreError::Gateway(self.message.clone()))
    }
}

/// Gateway recording every request it sees.
#[derive(Debug, Clone)]
pub struct RecordingGateway {
    reply: String,
    requests: Arc<Mutex<Vec<AnalysisRequest>>>,
}

impl RecordingGateway {
    pub fn new(reply: impl Into<String>) -> (Self, Arc<Mutex<Vec<AnalysisRequest>>>) {
        let requests = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                reply: reply.into(),
                requests: requests.clone(),
            },
            requests,
        )
    }
}

#[async_trait]
impl AnalysisGateway for RecordingGateway {
    async fn respond(&self, request: AnalysisRequest) -> Result<AnalysisReply, CoreError> {
        self.requests.lock().push(request);
        Ok(AnalysisReply {
            message: self.reply.clone(),
            artifact: None,
        })
    }
}

/// Gateway that holds its reply until released, for overlap tests.
#[derive(Debug, Clone)]
pub struct GatedGateway {
    reply: String,
    gate: Arc<Notify>,
}

impl GatedGateway {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            gate: Arc::new(Notify::new()),
        }
    }

    /// Allow one pending `respond` call to complete.
    pub fn release(&self) {
        self.gate.notify_one();
    }
}

#[async_trait]
impl AnalysisGateway for GatedGateway {
    async fn respond(&self, _request: AnalysisRequest) -> Result<AnalysisReply, CoreError> {
        self.gate.notified().await;
        Ok(AnalysisReply {
            message: self.reply.clone(),
            artifact: None,
        })
    }
}
