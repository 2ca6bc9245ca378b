//! Test doubles shared by the suites.

use async_trait::async_trait;
use sqlx::SqlitePool;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::database;
use crate::dispatch::Dispatcher;
use crate::error::AppError;
use crate::fetch::PageFetcher;
use crate::llm::{ChatMessage, CompletionResponse, LlmBackend};

/// Answers every call with the user prompt it received.
#[derive(Default)]
pub struct EchoLlm {
    pub calls: AtomicUsize,
}

impl EchoLlm {
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmBackend for EchoLlm {
    async fn complete(
        &self,
        _model: &str,
        messages: Vec<ChatMessage>,
    ) -> Result<CompletionResponse, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let prompt = messages
            .iter()
            .rev()
            .find(|m| m.role == "user")
            .map(|m| m.content.clone())
            .unwrap_or_default();
        Ok(CompletionResponse::from_text(prompt))
    }
}

/// Always fails like an unreachable upstream.
pub struct FailingLlm;

#[async_trait]
impl LlmBackend for FailingLlm {
    async fn complete(
        &self,
        _model: &str,
        _messages: Vec<ChatMessage>,
    ) -> Result<CompletionResponse, AppError> {
        Err(AppError::Upstream {
            status: 503,
            body: "service unavailable".to_string(),
        })
    }
}

/// Succeeds with a payload that has no choices.
pub struct EmptyLlm;

#[async_trait]
impl LlmBackend for EmptyLlm {
    async fn complete(
        &self,
        _model: &str,
        _messages: Vec<ChatMessage>,
    ) -> Result<CompletionResponse, AppError> {
        Ok(CompletionResponse::default())
    }
}

/// Serves a fixed page, or fails when built with `failing`.
pub struct StaticFetcher {
    body: Option<String>,
}

impl StaticFetcher {
    pub fn page(body: &str) -> Self {
        Self {
            body: Some(body.to_string()),
        }
    }

    pub fn failing() -> Self {
        Self { body: None }
    }
}

#[async_trait]
impl PageFetcher for StaticFetcher {
    async fn fetch(&self, _url: &str) -> Result<String, AppError> {
        self.body
            .clone()
            .ok_or_else(|| AppError::Timeout("page did not answer".to_string()))
    }
}

pub async fn memory_pool() -> SqlitePool {
    database::init_db("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database")
}

pub fn dispatcher_with(llm: Arc<dyn LlmBackend>, pool: Option<SqlitePool>) -> Dispatcher {
    Dispatcher::new(llm, Arc::new(StaticFetcher::page("<p>unused</p>")), pool)
        .expect("Failed to build dispatcher")
}

pub fn echo_dispatcher() -> Dispatcher {
    dispatcher_with(Arc::new(EchoLlm::default()), None)
}
