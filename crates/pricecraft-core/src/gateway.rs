//! Boundary traits toward the external analysis backend.
//!
//! The keyword stub, a real NLP backend, and test doubles all satisfy the
//! same traits, so the conversation controller never knows which one it is
//! talking to.

use crate::error::CoreError;
use async_trait::async_trait;
use pricecraft_protocol::{Artifact, FileRef};
use serde_json::Value;

/// One user turn forwarded to the analysis backend.
///
/// Only file metadata travels; raw bytes stay behind the upload pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    /// User message text.
    pub message: String,
    /// Name and declared type of each attached file.
    pub files: Vec<FileRef>,
}

/// Reply from the analysis backend for one turn.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReply {
    /// Assistant reply text.
    pub message: String,
    /// Artifact produced for the turn, if any.
    pub artifact: Option<Artifact>,
}

/// Conversational analysis backend.
#[async_trait]
pub trait AnalysisGateway: Send + Sync {
    /// Produce an assistant reply for one user turn.
    async fn respond(&self, request: AnalysisRequest) -> Result<AnalysisReply, CoreError>;
}

/// Document and spreadsheet extraction backend.
#[async_trait]
pub trait FileParser: Send + Sync {
    /// Extract structured data from a previously uploaded file.
    ///
    /// The shape of the returned value depends on the declared file type.
    async fn parse(&self, file_id: &str, file_type: Option<&str>) -> Result<Value, CoreError>;
}
