//! Admission rules for files attached to a pending draft.

use crate::clock::{Clock, IdSource, RandomIds, SystemClock};
use crate::types::Attachment;
use log::debug;
use pricecraft_config::AttachmentConfig;
use std::sync::Arc;
use thiserror::Error;

/// Reasons an attachment candidate is refused before entering a draft.
///
/// The Display strings are shown to the user as inline rejection reasons.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AttachmentError {
    /// File exceeds the configured size limit.
    #[error("file is too large ({size} bytes, limit {max})")]
    TooLarge { size: u64, max: u64 },
    /// Declared MIME type is outside the allow-list.
    #[error("file type {0} is not supported")]
    UnsupportedType(String),
    /// The draft already holds the maximum number of files.
    #[error("too many attachments (limit {max})")]
    TooManyFiles { max: usize },
}

/// Candidate file metadata as declared by the uploader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMeta {
    /// File name.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// Declared MIME type.
    pub content_type: String,
}

/// Enforces size, type, and count limits before a file joins a draft.
///
/// Validation is synchronous and has no side effects beyond minting the
/// accepted record; rejected candidates leave no trace anywhere.
pub struct AttachmentValidator {
    limits: AttachmentConfig,
    ids: Arc<dyn IdSource>,
    clock: Arc<dyn Clock>,
}

impl AttachmentValidator {
    /// Create a validator over the given limits with system id/time sources.
    pub fn new(limits: AttachmentConfig) -> Self {
        Self::with_env(limits, Arc::new(RandomIds), Arc::new(SystemClock))
    }

    /// Create a validator with injected id and time sources.
    pub fn with_env(
        limits: AttachmentConfig,
        ids: Arc<dyn IdSource>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { limits, ids, clock }
    }

    /// Decide whether `candidate` may join a draft already holding
    /// `pending` attachments.
    ///
    /// Checks run in order: size, type, count. Accepting mints the
    /// attachment record with a fresh id and the current time.
    pub fn admit(&self, candidate: FileMeta, pending: usize) -> Result<Attachment, AttachmentError> {
        if candidate.size > self.limits.max_size_bytes {
            return Err(AttachmentError::TooLarge {
                size: candidate.size,
                max: self.limits.max_size_bytes,
            });
        }
        if !self
            .limits
            .allowed_types
            .iter()
            .any(|kind| kind == &candidate.content_type)
        {
            return Err(AttachmentError::UnsupportedType(candidate.content_type));
        }
        if pending >= self.limits.max_files {
            return Err(AttachmentError::TooManyFiles {
                max: self.limits.max_files,
            });
        }

        debug!(
            "admitted attachment (name={}, size={}, type={})",
            candidate.name, candidate.size, candidate.content_type
        );
        Ok(Attachment {
            id: self.ids.next_id(),
            name: candidate.name,
            size: candidate.size,
            content_type: candidate.content_type,
            uploaded_at: self.clock.now(),
            url: None,
        })
    }
}
