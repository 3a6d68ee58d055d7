//! Conversation controller integration tests.

use pretty_assertions::assert_eq;
use pricecraft_config::AttachmentConfig;
use pricecraft_core::{
    Attachment, AttachmentValidator, Conversation, CoreError, FALLBACK_REPLY, FileMeta, Role,
    SessionStatus, StubBackend,
};
use pricecraft_protocol::{Artifact, ArtifactType};
use pricecraft_test_utils::{
    FailingGateway, FixedClock, FixedGateway, GatedGateway, RecordingGateway, SequentialIds,
};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

fn deterministic(gateway: Arc<dyn pricecraft_core::AnalysisGateway>) -> Conversation {
    Conversation::with_env(
        gateway,
        Arc::new(SequentialIds::new()),
        Arc::new(FixedClock::default()),
    )
}

fn csv_attachment() -> Attachment {
    let validator = AttachmentValidator::new(AttachmentConfig::default());
    validator
        .admit(
            FileMeta {
                name: "sales.csv".to_string(),
                size: 2048,
                content_type: "text/csv".to_string(),
            },
            0,
        )
        .expect("admit")
}

#[tokio::test]
async fn turns_append_in_send_order() {
    let conversation = deterministic(Arc::new(StubBackend::instant()));

    conversation
        .send_turn("What price should I charge?", Vec::new())
        .await
        .expect("first turn");
    conversation
        .send_turn("Tell me about elasticity", Vec::new())
        .await
        .expect("second turn");

    let messages = conversation.messages();
    assert_eq!(messages.len(), 4);
    assert_eq!(messages[0].role, Role::User);
    assert_eq!(messages[1].role, Role::Assistant);
    assert_eq!(messages[2].role, Role::User);
    assert_eq!(messages[3].role, Role::Assistant);
    assert_eq!(messages[0].content, "What price should I charge?");
    assert_eq!(conversation.status(), SessionStatus::Idle);
}

#[tokio::test]
async fn empty_turn_is_a_noop() {
    let conversation = deterministic(Arc::new(StubBackend::instant()));

    let err = conversation
        .send_turn("   ", Vec::new())
        .await
        .expect_err("refused");
    assert!(matches!(err, CoreError::EmptyTurn));
    assert!(conversation.messages().is_empty());
    assert_eq!(conversation.status(), SessionStatus::Idle);
}

#[tokio::test]
async fn attachment_only_turn_is_accepted() {
    let (gateway, requests) = RecordingGateway::new("received");
    let conversation = deterministic(Arc::new(gateway));

    conversation
        .send_turn("", vec![csv_attachment()])
        .await
        .expect("attachment-only turn");

    let messages = conversation.messages();
    assert_eq!(messages[0].content, "");
    assert_eq!(messages[0].attachments.len(), 1);

    // Only name and declared type travel to the backend.
    let requests = requests.lock();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].files.len(), 1);
    assert_eq!(requests[0].files[0].name, "sales.csv");
    assert_eq!(requests[0].files[0].file_type, "text/csv");
}

#[tokio::test]
async fn gateway_failure_appends_fallback_and_goes_idle() {
    let conversation = deterministic(Arc::new(FailingGateway::new("connection refused")));

    let outcome = conversation
        .send_turn("what should my pricing be?", Vec::new())
        .await
        .expect("absorbed failure");

    assert_eq!(outcome.assistant.content, FALLBACK_REPLY);
    assert_eq!(outcome.artifact, None);
    let messages = conversation.messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[1].role, Role::Assistant);
    assert_eq!(messages[1].content, FALLBACK_REPLY);
    assert!(conversation.artifacts().is_empty());
    assert_eq!(conversation.status(), SessionStatus::Idle);
}

#[tokio::test]
async fn artifact_is_linked_to_the_assistant_turn() {
    let artifact = Artifact {
        id: Uuid::from_u128(99),
        artifact_type: ArtifactType::CompetitiveMatrix,
        title: "Competitor grid".to_string(),
        description: None,
        data: json!({ "competitors": [] }),
        created_at: chrono::DateTime::<chrono::Utc>::UNIX_EPOCH,
        updated_at: chrono::DateTime::<chrono::Utc>::UNIX_EPOCH,
    };
    let conversation = deterministic(Arc::new(FixedGateway::with_artifact(
        "see the grid",
        artifact.clone(),
    )));

    let outcome = conversation
        .send_turn("how do I stack up against competition?", Vec::new())
        .await
        .expect("turn");

    assert_eq!(outcome.assistant.artifact_id, Some(artifact.id));
    assert_eq!(outcome.artifact, Some(artifact.clone()));
    assert_eq!(conversation.artifacts(), vec![artifact]);
}

#[tokio::test]
async fn overlapping_send_is_refused() {
    let gateway = GatedGateway::new("done");
    let conversation = Arc::new(deterministic(Arc::new(gateway.clone())));

    let in_flight = {
        let conversation = conversation.clone();
        tokio::spawn(async move { conversation.send_turn("first", Vec::new()).await })
    };
    tokio::task::yield_now().await;
    assert_eq!(conversation.status(), SessionStatus::Busy);

    let err = conversation
        .send_turn("second", Vec::new())
        .await
        .expect_err("overlap refused");
    assert!(matches!(err, CoreError::SessionBusy));

    gateway.release();
    in_flight.await.expect("join").expect("first turn");
    assert_eq!(conversation.status(), SessionStatus::Idle);
    // The refused send left no trace: one user turn, one assistant turn.
    assert_eq!(conversation.messages().len(), 2);
}

#[tokio::test]
async fn cancelled_turn_returns_session_to_idle() {
    let gateway = GatedGateway::new("done");
    let conversation = Arc::new(deterministic(Arc::new(gateway.clone())));

    let in_flight = {
        let conversation = conversation.clone();
        tokio::spawn(async move { conversation.send_turn("first", Vec::new()).await })
    };
    tokio::task::yield_now().await;
    assert_eq!(conversation.status(), SessionStatus::Busy);

    // Dropping the turn future mid-await (a disconnecting client does
    // this) must not leave the session stuck busy.
    in_flight.abort();
    let joined = in_flight.await;
    assert!(joined.expect_err("aborted").is_cancelled());
    assert_eq!(conversation.status(), SessionStatus::Idle);
    // The user message landed before the gateway call; no reply follows.
    assert_eq!(conversation.messages().len(), 1);

    gateway.release();
    conversation
        .send_turn("second", Vec::new())
        .await
        .expect("session accepts turns again");
    assert_eq!(conversation.status(), SessionStatus::Idle);
    assert_eq!(conversation.messages().len(), 3);
}

#[tokio::test]
async fn snapshots_do_not_change_retroactively() {
    let conversation = deterministic(Arc::new(StubBackend::instant()));

    conversation
        .send_turn("price check", Vec::new())
        .await
        .expect("turn");
    let artifacts_before = conversation.artifacts();
    assert_eq!(artifacts_before.len(), 1);
    assert_eq!(conversation.artifacts(), artifacts_before);

    conversation
        .send_turn("another price question", Vec::new())
        .await
        .expect("turn");
    assert_eq!(artifacts_before.len(), 1);
    assert_eq!(conversation.artifacts().len(), 2);
    assert_eq!(conversation.artifacts()[0], artifacts_before[0]);
}
