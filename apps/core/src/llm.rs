//! Completion service client.
//!
//! `LlmBackend` is the seam the dispatcher depends on; `HttpLlmClient` speaks
//! the OpenAI-compatible chat-completions protocol over reqwest.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::timeout;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::error::AppError;

/// Upstream error bodies are truncated to this many characters in errors and logs.
const ERROR_BODY_LIMIT: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub message: Option<ChoiceMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub total_tokens: Option<u64>,
}

impl CompletionResponse {
    /// Single-choice response, used by test doubles.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            choices: vec![Choice {
                message: Some(ChoiceMessage {
                    content: Some(text.into()),
                }),
            }],
            usage: None,
        }
    }

    /// Content of the first choice, if the response has one.
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.message.as_ref())
            .and_then(|message| message.content.as_deref())
    }
}

/// Defines the interface for a chat-completion backend.
///
/// Any error returned is treated by callers as recoverable: the dispatcher
/// substitutes canned text and never surfaces it.
#[async_trait]
pub trait LlmBackend: Send + Sync + 'static {
    async fn complete(
        &self,
        model: &str,
        messages: Vec<ChatMessage>,
    ) -> Result<CompletionResponse, AppError>;
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
}

/// reqwest-backed client for an OpenAI-compatible endpoint.
#[derive(Debug, Clone)]
pub struct HttpLlmClient {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    temperature: f32,
    max_tokens: u32,
    timeout: Duration,
}

impl HttpLlmClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            endpoint: config.llm_api_url.clone(),
            api_key: config.api_key.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            timeout: config.llm_timeout,
        }
    }

    /// Without an API key every call fails fast with a `Config` error.
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

#[async_trait]
impl LlmBackend for HttpLlmClient {
    async fn complete(
        &self,
        model: &str,
        messages: Vec<ChatMessage>,
    ) -> Result<CompletionResponse, AppError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::Config("No completion API key configured".to_string()))?;

        let payload = CompletionRequest {
            model,
            messages: &messages,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        // One deadline covers the request and the body decode
        let completion = timeout(self.timeout, async {
            let response = self
                .client
                .post(&self.endpoint)
                .bearer_auth(api_key)
                .json(&payload)
                .send()
                .await?;

            let status = response.status();
            if status.as_u16() >= 400 {
                let body = response.text().await.unwrap_or_default();
                let body: String = body.chars().take(ERROR_BODY_LIMIT).collect();
                warn!("Completion API error ({}): {}", status.as_u16(), body);
                return Err(AppError::Upstream {
                    status: status.as_u16(),
                    body,
                });
            }

            Ok::<_, AppError>(response.json::<CompletionResponse>().await?)
        })
        .await??;

        let tokens = completion
            .usage
            .as_ref()
            .and_then(|usage| usage.total_tokens)
            .map(|t| t.to_string())
            .unwrap_or_else(|| "N/A".to_string());
        info!("Completion succeeded for model {} - tokens: {}", model, tokens);

        Ok(completion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer, api_key: Option<&str>) -> HttpLlmClient {
        let config = AppConfig {
            api_key: api_key.map(str::to_string),
            llm_api_url: format!("{}/openai/v1/chat/completions", server.uri()),
            ..AppConfig::default()
        };
        HttpLlmClient::new(&config)
    }

    fn messages() -> Vec<ChatMessage> {
        vec![ChatMessage::system("be brief"), ChatMessage::user("Hello")]
    }

    #[tokio::test]
    async fn test_complete_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/openai/v1/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_partial_json(json!({
                "model": "llama-3.1-8b-instant",
                "temperature": 0.7,
                "max_tokens": 4000
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": "Hi there"}}],
                "usage": {"total_tokens": 12}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, Some("test-key"));
        let response = client
            .complete("llama-3.1-8b-instant", messages())
            .await
            .unwrap();

        assert_eq!(response.first_content(), Some("Hi there"));
    }

    #[tokio::test]
    async fn test_error_status_is_upstream_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
            .mount(&server)
            .await;

        let client = client_for(&server, Some("bad-key"));
        let err = client.complete("any", messages()).await.unwrap_err();

        match err {
            AppError::Upstream { status, body } => {
                assert_eq!(status, 401);
                assert_eq!(body, "invalid api key");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_slow_upstream_hits_single_deadline() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"choices": []}))
                    .set_delay(Duration::from_millis(400)),
            )
            .mount(&server)
            .await;

        let config = AppConfig {
            api_key: Some("key".to_string()),
            llm_api_url: server.uri(),
            llm_timeout: Duration::from_millis(100),
            ..AppConfig::default()
        };
        let client = HttpLlmClient::new(&config);

        let started = std::time::Instant::now();
        let err = client.complete("any", messages()).await.unwrap_err();
        assert!(matches!(err, AppError::Timeout(_)));
        assert!(started.elapsed() < Duration::from_millis(400));
    }

    #[tokio::test]
    async fn test_missing_key_never_calls_network() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_for(&server, None);
        assert!(!client.is_configured());
        let err = client.complete("any", messages()).await.unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[tokio::test]
    async fn test_undecodable_body_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = client_for(&server, Some("key"));
        assert!(client.complete("any", messages()).await.is_err());
    }

    #[tokio::test]
    async fn test_empty_choices_decode() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        let client = client_for(&server, Some("key"));
        let response = client.complete("any", messages()).await.unwrap();
        assert!(response.first_content().is_none());
    }
}
