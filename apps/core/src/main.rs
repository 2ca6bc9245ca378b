// Switchboard Backend Entry Point

use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use switchboard_core::brain::{Axis, PatternRegistry};
use switchboard_core::catalog::{FeatureCatalog, ModelCatalog};
use switchboard_core::config::AppConfig;
use switchboard_core::database;
use switchboard_core::dispatch::Dispatcher;
use switchboard_core::fetch::HttpFetcher;
use switchboard_core::fs_manager::PathManager;
use switchboard_core::llm::HttpLlmClient;
use switchboard_core::server::{build_router, AppState};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env may carry RUST_LOG, so load it before the subscriber
    dotenv::dotenv().ok();
    init_tracing();
    let config = AppConfig::from_env()?;

    info!("Starting Switchboard...");

    // File system
    let paths = PathManager::new(&config.data_dir);
    if let Err(e) = paths.init() {
        error!("Failed to initialize data directories: {}", e);
    }

    // Database (optional: the service runs without persistence)
    let db_url = config
        .database_url
        .clone()
        .unwrap_or_else(|| paths.default_database_url());
    let db_pool = match database::init_db(&db_url).await {
        Ok(pool) => Some(pool),
        Err(e) => {
            error!("Failed to initialize database, persistence disabled: {}", e);
            None
        }
    };

    if config.demo_mode() {
        warn!("GROQ_API_KEY not set: every completion will use canned demo text");
    }

    // Static tables
    let registry = Arc::new(PatternRegistry::builtin()?);
    let features = Arc::new(FeatureCatalog::builtin()?);
    let models = Arc::new(ModelCatalog::builtin());
    info!(
        "{} features, {} models and {} language/{} domain categories ready",
        features.len(),
        models.len(),
        registry.categories(Axis::Language).len(),
        registry.categories(Axis::Domain).len()
    );

    let llm = Arc::new(HttpLlmClient::new(&config));
    let fetcher = Arc::new(HttpFetcher::new(config.fetch_timeout));
    let dispatcher = Dispatcher::with_tables(registry, features, models, llm, fetcher, db_pool)?;

    let app = build_router(AppState::new(dispatcher, paths, config.demo_mode()));

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
