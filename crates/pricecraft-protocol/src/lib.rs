//! Wire types for the PriceCraft HTTP API.
//!
//! These shapes are the compatibility contract between the analysis backend
//! and any front-end: request and response bodies for `/chat`, `/parse`, and
//! `/upload`, plus the artifact payloads rendered alongside a conversation.

mod artifact;

pub use artifact::{Artifact, ArtifactType};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Unique identifier for a session.
pub type SessionId = Uuid;

/// File metadata forwarded with a chat request.
///
/// Only the declared name and MIME type travel with a turn; raw bytes go
/// through the upload pipeline instead.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileRef {
    /// File name as declared by the uploader.
    pub name: String,
    /// Declared MIME type.
    #[serde(rename = "type")]
    pub file_type: String,
}

/// Body of `POST /chat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    /// User message text.
    pub message: String,
    /// Metadata for files attached to the turn.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<FileRef>,
    /// Session to route the turn through; a shared default session is used
    /// when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<SessionId>,
}

/// Success body of `POST /chat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Assistant reply text.
    pub message: String,
    /// Artifact produced for this turn, if any. Serialized as `null` when
    /// absent, matching the wire contract.
    pub artifact: Option<Artifact>,
    /// Always true on the success path.
    pub success: bool,
}

/// Body of `POST /parse`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseRequest {
    /// Identifier of a previously uploaded file. Required; the endpoint
    /// rejects requests without it.
    #[serde(default)]
    pub file_id: Option<String>,
    /// Declared MIME type, used to pick the extraction shape.
    #[serde(default)]
    pub file_type: Option<String>,
}

/// Success body of `POST /parse`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseResponse {
    /// Extracted content; the shape depends on the file type.
    pub data: Value,
    /// Always true on the success path.
    pub success: bool,
    /// Human-readable status line.
    pub message: String,
}

/// One stored file in an upload response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    /// Fresh identifier assigned by the upload pipeline.
    pub id: Uuid,
    /// Original file name.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// Declared MIME type.
    #[serde(rename = "type")]
    pub file_type: String,
    /// Location the stored file can be fetched from.
    pub url: String,
    /// When the upload was accepted.
    pub uploaded_at: DateTime<Utc>,
}

/// Success body of `POST /upload`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    /// One entry per stored file, in submission order.
    pub files: Vec<UploadedFile>,
    /// Always true on the success path.
    pub success: bool,
    /// Human-readable status line.
    pub message: String,
}

/// Error envelope returned with non-2xx statuses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Human-readable failure description.
    pub error: String,
    /// Always false on the error path.
    pub success: bool,
}

impl ApiError {
    /// Build an error envelope with `success` pinned to false.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            success: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ApiError, ChatRequest, ChatResponse, FileRef};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn chat_request_accepts_minimal_body() {
        let request: ChatRequest =
            serde_json::from_value(json!({ "message": "hello" })).expect("deserialize");
        assert_eq!(request.message, "hello");
        assert!(request.files.is_empty());
        assert_eq!(request.session_id, None);
    }

    #[test]
    fn file_ref_uses_type_on_the_wire() {
        let file = FileRef {
            name: "q3.csv".to_string(),
            file_type: "text/csv".to_string(),
        };
        let value = serde_json::to_value(&file).expect("serialize");
        assert_eq!(value, json!({ "name": "q3.csv", "type": "text/csv" }));
    }

    #[test]
    fn chat_response_serializes_missing_artifact_as_null() {
        let response = ChatResponse {
            message: "hi".to_string(),
            artifact: None,
            success: true,
        };
        let value = serde_json::to_value(&response).expect("serialize");
        assert_eq!(
            value,
            json!({ "message": "hi", "artifact": null, "success": true })
        );
    }

    #[test]
    fn api_error_pins_success_false() {
        let value = serde_json::to_value(ApiError::new("File ID required")).expect("serialize");
        assert_eq!(
            value,
            json!({ "error": "File ID required", "success": false })
        );
    }
}
