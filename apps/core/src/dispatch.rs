//! Feature dispatch and graceful degradation.
//!
//! Routes a request to the generic completion path or to a special handler
//! (web fetch, file or archive extraction, static security scan). Nothing here
//! returns an error to the caller: every failure is folded into a
//! success-shaped response carrying fallback or explanatory text.
//!
//! Special handlers re-enter [`Dispatcher::handle_generic`] for their analysis
//! step; the generic path never re-enters a special handler.

use chrono::Utc;
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

use crate::brain::{Classifier, PatternRegistry};
use crate::catalog::{FeatureCatalog, FeatureDescriptor, ModelCatalog};
use crate::database;
use crate::error::AppError;
use crate::fetch::PageFetcher;
use crate::llm::{ChatMessage, LlmBackend};
use crate::models::{
    ChatRequest, ChatResult, FeatureResponse, FileSummary, ResultStatus, SecurityScan, WebSummary,
};
use crate::prompts::{build_prompt, fallback_response, invalid_response_fallback, SYSTEM_PREAMBLE};
use crate::security::{render_report, SecurityScanner};
use crate::text_extract;

pub const CHAT_FEATURE: &str = "chat";
pub const SUMMARY_FEATURE: &str = "summary_maker";
pub const CODE_ANALYSIS_FEATURE: &str = "code_analyzer";

/// Characters of fetched or extracted content kept in previews.
const PREVIEW_CHARS: usize = 1000;

const FILE_PREFIX: &str = "file:";

/// Handling path for a feature id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Generic,
    WebFetch,
    FileRead,
    ArchiveRead,
    SecurityScan,
}

impl Route {
    pub fn for_feature(feature_id: &str) -> Self {
        match feature_id {
            "web_scraper" => Route::WebFetch,
            "file_reader" => Route::FileRead,
            "zip_extractor" => Route::ArchiveRead,
            "security_scanner" => Route::SecurityScan,
            _ => Route::Generic,
        }
    }

    pub fn is_special(&self) -> bool {
        !matches!(self, Route::Generic)
    }
}

pub struct Dispatcher {
    classifier: Classifier,
    features: Arc<FeatureCatalog>,
    models: Arc<ModelCatalog>,
    scanner: SecurityScanner,
    llm: Arc<dyn LlmBackend>,
    fetcher: Arc<dyn PageFetcher>,
    db_pool: Option<SqlitePool>,
}

impl Dispatcher {
    /// Dispatcher over the built-in registry and catalogues.
    ///
    /// Without a pool, conversation turns are simply not persisted.
    pub fn new(
        llm: Arc<dyn LlmBackend>,
        fetcher: Arc<dyn PageFetcher>,
        db_pool: Option<SqlitePool>,
    ) -> Result<Self, AppError> {
        Self::with_tables(
            Arc::new(PatternRegistry::builtin()?),
            Arc::new(FeatureCatalog::builtin()?),
            Arc::new(ModelCatalog::builtin()),
            llm,
            fetcher,
            db_pool,
        )
    }

    /// Dispatcher over tables built by the caller.
    pub fn with_tables(
        registry: Arc<PatternRegistry>,
        features: Arc<FeatureCatalog>,
        models: Arc<ModelCatalog>,
        llm: Arc<dyn LlmBackend>,
        fetcher: Arc<dyn PageFetcher>,
        db_pool: Option<SqlitePool>,
    ) -> Result<Self, AppError> {
        Ok(Self {
            classifier: Classifier::new(registry),
            features,
            models,
            scanner: SecurityScanner::new()?,
            llm,
            fetcher,
            db_pool,
        })
    }

    pub fn features(&self) -> &FeatureCatalog {
        &self.features
    }

    pub fn models(&self) -> &ModelCatalog {
        &self.models
    }

    pub fn db_pool(&self) -> Option<&SqlitePool> {
        self.db_pool.as_ref()
    }

    /// Run a request through the path its feature selects.
    #[instrument(skip(self, request), fields(feature = %request.feature_id, model = %request.model_id))]
    pub async fn process(&self, request: ChatRequest) -> FeatureResponse {
        let ChatRequest {
            feature_id,
            message,
            model_id,
            session_id,
        } = request;

        match Route::for_feature(&feature_id) {
            Route::Generic => FeatureResponse::Chat(
                self.handle_generic(&feature_id, &message, &model_id, session_id.as_deref())
                    .await,
            ),
            route => self.handle_special(route, &feature_id, &message, &model_id).await,
        }
    }

    /// Prompt, complete, classify, persist.
    ///
    /// Completion failures are replaced by the feature's canned text; a
    /// response without a usable choice gets the invalid-response text.
    #[instrument(skip(self, input, session_id))]
    pub async fn handle_generic(
        &self,
        feature_id: &str,
        input: &str,
        model_id: &str,
        session_id: Option<&str>,
    ) -> ChatResult {
        let feature = self.features.resolve(feature_id);
        let model = self.models.resolve(model_id);

        let prompt = build_prompt(feature_id, input, &feature, &model);
        let messages = vec![ChatMessage::system(SYSTEM_PREAMBLE), ChatMessage::user(prompt)];

        let response = match self.llm.complete(model_id, messages).await {
            Ok(completion) => match completion.first_content() {
                Some(content) => content.to_string(),
                None => {
                    error!("Invalid completion response, using fallback text");
                    invalid_response_fallback(feature_id, input)
                }
            },
            Err(AppError::Config(reason)) => {
                debug!("Demo mode ({}), using canned response", reason);
                fallback_response(feature_id, input)
            }
            Err(e) => {
                warn!("Completion failed, using canned response: {}", e);
                fallback_response(feature_id, input)
            }
        };

        let detected_language = self.classifier.classify_language(input);
        let detected_domain = self.classifier.classify_domain(input);

        if let (Some(session_id), Some(pool)) = (session_id, &self.db_pool) {
            if let Err(e) =
                database::record_turn(pool, session_id, feature_id, input, &response, model_id).await
            {
                error!("Failed to persist conversation turn: {}", e);
            }
        }

        ChatResult {
            feature: feature.label(),
            model: model.label(),
            response,
            detected_language,
            detected_domain,
            timestamp: now(),
            session_id: session_id.map(str::to_string),
            status: ResultStatus::Success,
        }
    }

    /// Special paths. Input that does not fit the feature's convention falls
    /// through to generic `chat`.
    async fn handle_special(
        &self,
        route: Route,
        feature_id: &str,
        input: &str,
        model_id: &str,
    ) -> FeatureResponse {
        let feature = self.features.resolve(feature_id);

        match route {
            Route::WebFetch if input.starts_with("http") => {
                return self.summarize_page(&feature, input, model_id).await;
            }
            Route::FileRead | Route::ArchiveRead => {
                if let Some(path) = input.strip_prefix(FILE_PREFIX) {
                    return FeatureResponse::File(
                        self.summarize_file(route, &feature, path, model_id).await,
                    );
                }
            }
            Route::SecurityScan => {
                return FeatureResponse::Security(
                    self.scan_security(&feature, input, model_id).await,
                );
            }
            _ => {}
        }

        info!("Input does not fit {}, falling through to {}", feature_id, CHAT_FEATURE);
        FeatureResponse::Chat(self.handle_generic(CHAT_FEATURE, input, model_id, None).await)
    }

    async fn summarize_page(
        &self,
        feature: &FeatureDescriptor,
        url: &str,
        model_id: &str,
    ) -> FeatureResponse {
        match self.fetcher.fetch(url).await {
            Ok(body) => {
                let content = format!("Website Content Preview: {}...", preview(&body));
                let analysis = self
                    .handle_generic(SUMMARY_FEATURE, &content, model_id, None)
                    .await;

                FeatureResponse::Web(WebSummary {
                    feature: feature.label(),
                    url: url.to_string(),
                    content_preview: content,
                    analysis: analysis.response,
                    timestamp: now(),
                })
            }
            Err(e) => {
                error!("Web fetch error: {}", e);
                let message = format!("Failed to scrape website: {}", e);
                FeatureResponse::Chat(
                    self.handle_generic(CHAT_FEATURE, &message, model_id, None)
                        .await,
                )
            }
        }
    }

    async fn summarize_file(
        &self,
        route: Route,
        feature: &FeatureDescriptor,
        file_path: &str,
        model_id: &str,
    ) -> FileSummary {
        let file_type = text_extract::file_type_of(file_path);
        let content = extract_content(route, PathBuf::from(file_path), file_type.clone()).await;

        let analysis = self
            .handle_generic(
                SUMMARY_FEATURE,
                &format!("Analyze this content: {}", content),
                model_id,
                None,
            )
            .await;

        FileSummary {
            feature: feature.label(),
            file_path: file_path.to_string(),
            file_type,
            content_preview: preview(&content),
            analysis: analysis.response,
            timestamp: now(),
        }
    }

    async fn scan_security(
        &self,
        feature: &FeatureDescriptor,
        input: &str,
        model_id: &str,
    ) -> SecurityScan {
        let findings = self.scanner.scan(input);
        if !findings.is_empty() {
            warn!("Security scan flagged {} vulnerability classes", findings.len());
        }

        let detailed = self
            .handle_generic(CODE_ANALYSIS_FEATURE, input, model_id, None)
            .await;

        SecurityScan {
            feature: feature.label(),
            security_report: render_report(&findings),
            vulnerabilities_found: findings.len(),
            detailed_analysis: detailed.response,
            timestamp: now(),
        }
    }
}

/// Extraction does blocking file IO, so it runs off the async workers.
async fn extract_content(route: Route, path: PathBuf, file_type: String) -> String {
    let task = tokio::task::spawn_blocking(move || match route {
        Route::ArchiveRead => text_extract::extract_zip_content(&path),
        _ => text_extract::read_file_content(&path, &file_type),
    });

    match task.await {
        Ok(content) => content,
        Err(e) => {
            error!("Extraction task failed: {}", e);
            format!("Error reading file: {}", e)
        }
    }
}

fn preview(text: &str) -> String {
    text.chars().take(PREVIEW_CHARS).collect()
}

fn now() -> String {
    Utc::now().to_rfc3339()
}
