//! Error types for the core session crate.

use thiserror::Error;

/// Errors returned by core session operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A turn with no content and no attachments was refused.
    #[error("empty turn: content and attachments are both empty")]
    EmptyTurn,
    /// A send overlapped a turn already in flight on the same session.
    #[error("session busy: a turn is already in flight")]
    SessionBusy,
    /// The analysis backend failed or returned a malformed response.
    #[error("gateway error: {0}")]
    Gateway(String),
}
