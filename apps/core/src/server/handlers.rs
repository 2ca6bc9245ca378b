//! Request handlers.
//!
//! Malformed requests are answered with `{"error": ..., "status": "error"}`
//! and HTTP 200, never with a rejection status.

use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, Path, State};
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::Path as FsPath;
use tracing::{error, info};

use super::state::SharedState;
use crate::database;
use crate::error::AppError;
use crate::models::{ChatPayload, ChatRequest, ConversationTurn, ErrorResult, FeatureResponse};
use crate::text_extract::file_type_of;

const SERVICE_NAME: &str = "Switchboard";

pub async fn chat(
    State(state): State<SharedState>,
    payload: Result<Json<ChatPayload>, JsonRejection>,
) -> Json<FeatureResponse> {
    let request = match payload {
        Ok(Json(payload)) => ChatRequest::try_from(payload),
        Err(rejection) => Err(AppError::Validation(rejection.body_text())),
    };

    match request {
        Ok(request) => Json(state.dispatcher.process(request).await),
        Err(e) => {
            error!("Chat endpoint error: {}", e);
            Json(FeatureResponse::Error(ErrorResult::new(format!(
                "❌ Chat Error: {}",
                e
            ))))
        }
    }
}

struct UploadForm {
    filename: String,
    bytes: Vec<u8>,
    feature: Option<String>,
    session_id: Option<String>,
}

pub async fn upload(
    State(state): State<SharedState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Json<Value> {
    match handle_upload(&state, multipart).await {
        Ok(body) => Json(body),
        Err(e) => {
            error!("Upload error: {}", e);
            Json(serde_json::json!({
                "error": format!("File upload error: {}", e),
                "status": "error",
            }))
        }
    }
}

async fn handle_upload(
    state: &SharedState,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Value, AppError> {
    let multipart = multipart.map_err(|rejection| AppError::Validation(rejection.body_text()))?;
    let form = read_upload_form(multipart).await?;

    let path = state.paths.upload_path(&form.filename);
    tokio::fs::create_dir_all(state.paths.uploads_dir()).await?;
    tokio::fs::write(&path, &form.bytes).await?;
    info!("Stored upload {} ({} bytes) at {:?}", form.filename, form.bytes.len(), path);

    let file_type = file_type_of(&form.filename);
    if let Some(pool) = state.dispatcher.db_pool() {
        if let Err(e) = database::record_upload(pool, &form.filename, &file_type).await {
            error!("Failed to record upload: {}", e);
        }
    }

    let request = ChatRequest::try_from(ChatPayload {
        feature: form.feature,
        message: Some(format!("file:{}", path.to_string_lossy())),
        model: None,
        session_id: form.session_id,
    })?;
    let feature_id = request.feature_id.clone();
    let result = state.dispatcher.process(request).await;

    let mut body = Map::new();
    body.insert("feature".to_string(), Value::String(feature_id));
    body.insert("filename".to_string(), Value::String(form.filename));
    body.insert("file_type".to_string(), Value::String(file_type));
    // Result fields win over the echoed ones
    if let Value::Object(fields) = serde_json::to_value(&result)? {
        body.extend(fields);
    }

    Ok(Value::Object(body))
}

async fn read_upload_form(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut file: Option<(String, Vec<u8>)> = None;
    let mut feature = None;
    let mut session_id = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.body_text()))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                // Keep only the final path component of the client-supplied name
                let filename = field
                    .file_name()
                    .and_then(|name| FsPath::new(name).file_name())
                    .map(|name| name.to_string_lossy().to_string())
                    .filter(|name| !name.is_empty())
                    .unwrap_or_else(|| "upload".to_string());
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(e.body_text()))?;
                file = Some((filename, bytes.to_vec()));
            }
            Some("feature") => {
                feature = Some(field.text().await.map_err(|e| AppError::Validation(e.body_text()))?);
            }
            Some("session_id") => {
                session_id = Some(field.text().await.map_err(|e| AppError::Validation(e.body_text()))?);
            }
            _ => {}
        }
    }

    let (filename, bytes) =
        file.ok_or_else(|| AppError::Validation("Missing field: file".to_string()))?;

    Ok(UploadForm {
        filename,
        bytes,
        feature,
        session_id,
    })
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub models_available: usize,
    pub features_available: usize,
    pub demo_mode: bool,
    pub timestamp: String,
}

pub async fn status(State(state): State<SharedState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "online",
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        models_available: state.dispatcher.models().len(),
        features_available: state.dispatcher.features().len(),
        demo_mode: state.demo_mode,
        timestamp: Utc::now().to_rfc3339(),
    })
}

#[derive(Debug, Serialize)]
pub struct ConversationHistory {
    pub session_id: String,
    pub conversations: Vec<ConversationTurn>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum HistoryResponse {
    History(ConversationHistory),
    Error(ErrorResult),
}

pub async fn conversations(
    State(state): State<SharedState>,
    Path(session_id): Path<String>,
) -> Json<HistoryResponse> {
    let Some(pool) = state.dispatcher.db_pool() else {
        return Json(HistoryResponse::Error(ErrorResult::new(
            "Conversation history is unavailable: no database",
        )));
    };

    match database::session_history(pool, &session_id).await {
        Ok(conversations) => Json(HistoryResponse::History(ConversationHistory {
            count: conversations.len(),
            session_id,
            conversations,
        })),
        Err(e) => {
            error!("Conversation fetch error: {}", e);
            Json(HistoryResponse::Error(ErrorResult::new(e.to_string())))
        }
    }
}

pub async fn health() -> Json<Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": SERVICE_NAME,
    }))
}
