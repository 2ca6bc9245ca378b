use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::catalog::DEFAULT_MODEL;
use crate::error::AppError;

/// Raw inbound chat body. Every field is optional so a missing one can be
/// reported as a value instead of a rejected request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatPayload {
    pub feature: Option<String>,
    pub message: Option<String>,
    pub model: Option<String>,
    pub session_id: Option<String>,
}

/// A validated request to run a feature.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChatRequest {
    /// Need not exist in the catalogue.
    #[validate(length(min = 1))]
    pub feature_id: String,
    pub message: String,
    #[validate(length(min = 1))]
    pub model_id: String,
    pub session_id: Option<String>,
}

impl ChatRequest {
    pub fn new(feature_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            feature_id: feature_id.into(),
            message: message.into(),
            model_id: DEFAULT_MODEL.to_string(),
            session_id: None,
        }
    }

    pub fn with_model(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = model_id.into();
        self
    }

    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }
}

impl TryFrom<ChatPayload> for ChatRequest {
    type Error = AppError;

    fn try_from(payload: ChatPayload) -> Result<Self, Self::Error> {
        let feature_id = payload
            .feature
            .ok_or_else(|| AppError::Validation("Missing field: feature".to_string()))?;
        let message = payload
            .message
            .ok_or_else(|| AppError::Validation("Missing field: message".to_string()))?;

        let request = Self {
            feature_id,
            message,
            model_id: payload.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            session_id: payload.session_id.filter(|id| !id.is_empty()),
        };
        request.validate()?;
        Ok(request)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultStatus {
    Success,
    Error,
}

/// Response of the generic path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResult {
    pub feature: String,
    pub model: String,
    pub response: String,
    pub detected_language: String,
    pub detected_domain: String,
    /// ISO-8601
    pub timestamp: String,
    pub session_id: Option<String>,
    pub status: ResultStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebSummary {
    pub feature: String,
    pub url: String,
    pub content_preview: String,
    pub analysis: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileSummary {
    pub feature: String,
    pub file_path: String,
    pub file_type: String,
    pub content_preview: String,
    pub analysis: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityScan {
    pub feature: String,
    pub security_report: String,
    pub vulnerabilities_found: usize,
    pub detailed_analysis: String,
    pub timestamp: String,
}

/// Only produced for malformed inbound requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResult {
    pub error: String,
    pub status: ResultStatus,
}

impl ErrorResult {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            status: ResultStatus::Error,
        }
    }
}

/// Any value a feature dispatch can produce.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FeatureResponse {
    Chat(ChatResult),
    Web(WebSummary),
    File(FileSummary),
    Security(SecurityScan),
    Error(ErrorResult),
}

impl FeatureResponse {
    /// The generic result, if this is one.
    pub fn as_chat(&self) -> Option<&ChatResult> {
        match self {
            FeatureResponse::Chat(result) => Some(result),
            _ => None,
        }
    }
}

/// A stored exchange.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ConversationTurn {
    pub id: i64,
    pub session_id: String,
    pub feature: String,
    pub user_input: String,
    pub ai_response: String,
    pub model_used: String,
    /// RFC 3339
    pub created_at: String,
}

/// Metadata of an uploaded file.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UploadedFile {
    pub id: i64,
    pub filename: String,
    pub file_type: String,
    pub content: String,
    pub uploaded_at: String,
}
