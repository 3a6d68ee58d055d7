//! Request handlers for the chat, parse, and upload endpoints.

use crate::state::{AppState, DEFAULT_SESSION};
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::{debug, error};
use pricecraft_core::{Attachment, CoreError};
use pricecraft_protocol::{
    ApiError, ChatRequest, ChatResponse, ParseRequest, ParseResponse, UploadResponse, UploadedFile,
};

/// Handler failure mapped onto the `{error, success: false}` envelope.
pub(crate) struct ApiFailure {
    status: StatusCode,
    error: String,
}

impl ApiFailure {
    fn bad_request(error: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: error.into(),
        }
    }

    fn conflict(error: impl Into<String>) -> Self {
        Self {
            status: StatusCode::CONFLICT,
            error: error.into(),
        }
    }

    fn internal(error: impl std::fmt::Display) -> Self {
        error!("request failed: {error}");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error: error.to_string(),
        }
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        (self.status, Json(ApiError::new(self.error))).into_response()
    }
}

/// JSON body extractor whose rejections use the same error envelope as
/// handler failures, instead of axum's plain-text default.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiFailure))]
pub(crate) struct ApiJson<T>(pub(crate) T);

impl From<JsonRejection> for ApiFailure {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            status: rejection.status(),
            error: rejection.body_text(),
        }
    }
}

/// `POST /chat`: run one turn through the session named in the body, or
/// the shared default session.
///
/// Gateway failures do not reach this layer; the conversation absorbs them
/// into its fallback reply, so the response still carries `success: true`.
pub(crate) async fn chat(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiFailure> {
    let session_id = body.session_id.unwrap_or(DEFAULT_SESSION);
    let conversation = state.sessions.open(session_id);

    let attachments = body
        .files
        .iter()
        .map(|file| {
            Attachment::referenced(
                state.ids.next_id(),
                &file.name,
                &file.file_type,
                state.clock.now(),
            )
        })
        .collect();

    let outcome = conversation
        .send_turn(&body.message, attachments)
        .await
        .map_err(|err| match err {
            CoreError::EmptyTurn => ApiFailure::bad_request("Message required"),
            CoreError::SessionBusy => ApiFailure::conflict("A turn is already in flight"),
            other => ApiFailure::internal(other),
        })?;

    Ok(Json(ChatResponse {
        message: outcome.assistant.content,
        artifact: outcome.artifact,
        success: true,
    }))
}

/// `POST /parse`: extract structured data from a previously uploaded file.
pub(crate) async fn parse(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<ParseRequest>,
) -> Result<Json<ParseResponse>, ApiFailure> {
    let file_id = body
        .file_id
        .as_deref()
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiFailure::bad_request("File ID required"))?;

    let data = state
        .parser
        .parse(file_id, body.file_type.as_deref())
        .await
        .map_err(ApiFailure::internal)?;

    Ok(Json(ParseResponse {
        data,
        success: true,
        message: "File parsed successfully".to_string(),
    }))
}

/// `POST /upload`: accept multipart `files` fields and acknowledge each
/// with a stored-file record. Bytes are read and dropped; the stub keeps
/// nothing.
pub(crate) async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiFailure> {
    let mut files = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| ApiFailure::bad_request(err.to_string()))?
    {
        if field.name() != Some("files") {
            continue;
        }
        let name = field.file_name().unwrap_or("upload").to_string();
        let file_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|err| ApiFailure::bad_request(err.to_string()))?;

        debug!(
            "upload received (name={}, size={}, type={})",
            name,
            bytes.len(),
            file_type
        );
        files.push(UploadedFile {
            id: state.ids.next_id(),
            url: format!("/uploads/{name}"),
            name,
            size: bytes.len() as u64,
            file_type,
            uploaded_at: state.clock.now(),
        });
    }

    if files.is_empty() {
        return Err(ApiFailure::bad_request("No files provided"));
    }

    tokio::time::sleep(state.upload_delay).await;
    Ok(Json(UploadResponse {
        files,
        success: true,
        message: "Files uploaded successfully".to_string(),
    }))
}
