//! The per-session conversation state machine.

use crate::clock::{Clock, IdSource, RandomIds, SystemClock};
use crate::error::CoreError;
use crate::gateway::{AnalysisGateway, AnalysisReply, AnalysisRequest};
use crate::store::{ArtifactLog, MessageLog};
use crate::types::{Attachment, Message, Role, SessionStatus};
use log::{debug, info, warn};
use parking_lot::RwLock;
use pricecraft_protocol::{Artifact, FileRef};
use std::sync::Arc;

/// Assistant text appended when the analysis backend fails.
pub const FALLBACK_REPLY: &str = "I apologize, but I encountered an error. This is a demo interface. In production, I would provide detailed pricing strategy insights based on your query.";

/// One in-memory conversation: an ordered message transcript, the
/// artifacts produced alongside it, and a busy/idle flag that serializes
/// turns.
///
/// Sessions live only in memory and are discarded whole when dropped.
/// Backend failures never escape [`Conversation::send_turn`]; they become
/// a fallback assistant message so the conversation always progresses.
pub struct Conversation {
    messages: MessageLog,
    artifacts: ArtifactLog,
    status: RwLock<SessionStatus>,
    gateway: Arc<dyn AnalysisGateway>,
    ids: Arc<dyn IdSource>,
    clock: Arc<dyn Clock>,
}

/// The assistant turn appended by a completed `send_turn`.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnOutcome {
    /// Assistant message appended to the transcript.
    pub assistant: Message,
    /// Artifact appended to the artifact log, if the backend produced one.
    pub artifact: Option<Artifact>,
}

impl Conversation {
    /// Create an empty session over the given backend with system id and
    /// time sources.
    pub fn new(gateway: Arc<dyn AnalysisGateway>) -> Self {
        Self::with_env(gateway, Arc::new(RandomIds), Arc::new(SystemClock))
    }

    /// Create an empty session with injected id and time sources.
    pub fn with_env(
        gateway: Arc<dyn AnalysisGateway>,
        ids: Arc<dyn IdSource>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            messages: MessageLog::new(),
            artifacts: ArtifactLog::new(),
            status: RwLock::new(SessionStatus::Idle),
            gateway,
            ids,
            clock,
        }
    }

    /// Send one user turn and wait for the assistant reply.
    ///
    /// Empty turns (whitespace-only content with no attachments) and sends
    /// that overlap an in-flight turn are refused without touching the
    /// transcript. Otherwise the user message is appended, the session
    /// goes busy, the backend is invoked with message text plus file
    /// metadata, and exactly one assistant message is appended: the reply
    /// on success, [`FALLBACK_REPLY`] on failure. The session returns to
    /// idle on every path.
    pub async fn send_turn(
        &self,
        content: &str,
        attachments: Vec<Attachment>,
    ) -> Result<TurnOutcome, CoreError> {
        if content.trim().is_empty() && attachments.is_empty() {
            debug!("refusing empty turn");
            return Err(CoreError::EmptyTurn);
        }
        let _turn = self.begin_turn()?;

        let files = attachments
            .iter()
            .map(|attachment| FileRef {
                name: attachment.name.clone(),
                file_type: attachment.content_type.clone(),
            })
            .collect::<Vec<_>>();
        let user = Message {
            id: self.ids.next_id(),
            role: Role::User,
            content: content.to_string(),
            timestamp: self.clock.now(),
            attachments,
            artifact_id: None,
        };
        info!(
            "user turn (message_id={}, content_len={}, files={})",
            user.id,
            user.content.len(),
            files.len()
        );
        self.messages.append(user);

        let reply = self
            .gateway
            .respond(AnalysisRequest {
                message: content.to_string(),
                files,
            })
            .await;

        let outcome = match reply {
            Ok(reply) => self.record_reply(reply),
            Err(err) => {
                warn!("gateway failed, falling back (error={err})");
                self.record_fallback()
            }
        };
        Ok(outcome)
    }

    /// Snapshot of the transcript in send order.
    pub fn messages(&self) -> Vec<Message> {
        self.messages.all()
    }

    /// Snapshot of produced artifacts in creation order.
    pub fn artifacts(&self) -> Vec<Artifact> {
        self.artifacts.all()
    }

    /// Whether a turn is currently in flight.
    pub fn status(&self) -> SessionStatus {
        *self.status.read()
    }

    /// Mark the session busy, refusing if a turn is already in flight.
    ///
    /// The returned guard clears the flag when dropped, so the session
    /// returns to idle even when the turn future is cancelled mid-await.
    fn begin_turn(&self) -> Result<TurnGuard<'_>, CoreError> {
        let mut status = self.status.write();
        if *status == SessionStatus::Busy {
            return Err(CoreError::SessionBusy);
        }
        *status = SessionStatus::Busy;
        Ok(TurnGuard {
            status: &self.status,
        })
    }

    fn record_reply(&self, reply: AnalysisReply) -> TurnOutcome {
        let assistant = Message {
            id: self.ids.next_id(),
            role: Role::Assistant,
            content: reply.message,
            timestamp: self.clock.now(),
            attachments: Vec::new(),
            artifact_id: reply.artifact.as_ref().map(|artifact| artifact.id),
        };
        self.messages.append(assistant.clone());
        if let Some(artifact) = &reply.artifact {
            debug!(
                "recording artifact (artifact_id={}, type={})",
                artifact.id,
                artifact.artifact_type.as_str()
            );
            self.artifacts.append(artifact.clone());
        }
        TurnOutcome {
            assistant,
            artifact: reply.artifact,
        }
    }

    fn record_fallback(&self) -> TurnOutcome {
        let assistant = Message {
            id: self.ids.next_id(),
            role: Role::Assistant,
            content: FALLBACK_REPLY.to_string(),
            timestamp: self.clock.now(),
            attachments: Vec::new(),
            artifact_id: None,
        };
        self.messages.append(assistant.clone());
        TurnOutcome {
            assistant,
            artifact: None,
        }
    }
}

/// Clears the session's busy flag when dropped.
///
/// Dropping covers both normal completion and cancellation of the turn
/// future, so a session can never be left stuck busy.
struct TurnGuard<'a> {
    status: &'a RwLock<SessionStatus>,
}

impl Drop for TurnGuard<'_> {
    fn drop(&mut self) {
        *self.status.write() = SessionStatus::Idle;
    }
}
