//! Core data types shared across the session API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for a message.
pub type MessageId = Uuid;
/// Unique identifier for an attachment.
pub type AttachmentId = Uuid;

/// Message stored in a session transcript.
///
/// Messages are immutable once appended; the transcript never reorders,
/// edits, or deletes them within a session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    /// Unique identifier, assigned at creation and never reused.
    pub id: MessageId,
    /// Role that produced the message.
    pub role: Role,
    /// Text body. May be empty only when attachments are present.
    pub content: String,
    /// Creation timestamp.
    pub timestamp: DateTime<Utc>,
    /// Files attached to the turn, in selection order.
    pub attachments: Vec<Attachment>,
    /// Artifact produced in response to this message, if any. Weak
    /// reference: lookup only, no ownership.
    pub artifact_id: Option<Uuid>,
}

/// Speaker role for a message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System-generated message.
    System,
    /// User-authored message.
    User,
    /// Assistant-authored message.
    Assistant,
}

impl Role {
    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }

    /// Parse a role from a lowercase string.
    pub fn parse(value: &str) -> Self {
        if value == "system" {
            Role::System
        } else if value == "assistant" {
            Role::Assistant
        } else {
            Role::User
        }
    }
}

impl FromStr for Role {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(Role::parse(value))
    }
}

/// Metadata for one file accepted into a message draft.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Attachment {
    /// Unique identifier, assigned at admission.
    pub id: AttachmentId,
    /// File name as declared by the uploader.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// Declared MIME type.
    pub content_type: String,
    /// When the file was accepted into the draft.
    pub uploaded_at: DateTime<Utc>,
    /// Storage location once a real upload pipeline exists; absent in the
    /// stub flow.
    pub url: Option<String>,
}

impl Attachment {
    /// Metadata-only record for a file referenced in a chat request.
    ///
    /// The size is unknown here because raw bytes never travel with a
    /// turn; only the declared name and type do.
    pub fn referenced(
        id: AttachmentId,
        name: impl Into<String>,
        content_type: impl Into<String>,
        uploaded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            size: 0,
            content_type: content_type.into(),
            uploaded_at,
            url: None,
        }
    }
}

/// Whether a turn is currently in flight on a session.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    /// No turn in flight; sends are accepted.
    Idle,
    /// A turn is awaiting the analysis backend; new sends are refused.
    Busy,
}
