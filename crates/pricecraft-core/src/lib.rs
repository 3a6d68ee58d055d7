//! Session state machine for the PriceCraft assistant.
//!
//! A [`Conversation`] owns one in-memory session: an append-only message
//! transcript, the artifacts produced alongside it, and a busy/idle flag
//! that serializes turns. The analysis backend sits behind the
//! [`AnalysisGateway`] trait; [`StubBackend`] is the deterministic keyword
//! implementation used for demos and tests. Attachments pass through
//! [`AttachmentValidator`] before they may join a draft.

mod clock;
mod conversation;
mod error;
mod gateway;
mod registry;
mod store;
mod stub;
mod types;
mod validate;

pub use clock::{Clock, IdSource, RandomIds, SystemClock};
pub use conversation::{Conversation, FALLBACK_REPLY, TurnOutcome};
pub use error::CoreError;
pub use gateway::{AnalysisGateway, AnalysisReply, AnalysisRequest, FileParser};
pub use registry::SessionRegistry;
pub use store::{AppendLog, ArtifactLog, MessageLog};
pub use stub::StubBackend;
pub use types::{Attachment, AttachmentId, Message, MessageId, Role, SessionStatus};
pub use validate::{AttachmentError, AttachmentValidator, FileMeta};
