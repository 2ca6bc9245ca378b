use crate::error::AppError;
use crate::models::{ConversationTurn, UploadedFile};
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tracing::info;

pub async fn init_db(db_url: &str) -> Result<SqlitePool, AppError> {
    info!("Initializing database at: {}", db_url);

    let options = SqliteConnectOptions::from_str(db_url)?.create_if_missing(true);

    // In-memory databases are per-connection
    let max_connections = if db_url.contains(":memory:") { 1 } else { 5 };

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    migrate(&pool).await?;
    info!("Database initialized and migrations applied.");

    Ok(pool)
}

/// Creates the tables if they do not exist.
pub async fn migrate(pool: &SqlitePool) -> Result<(), AppError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS conversations (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            session_id TEXT NOT NULL,
            feature TEXT NOT NULL,
            user_input TEXT NOT NULL,
            ai_response TEXT NOT NULL,
            model_used TEXT NOT NULL,
            created_at TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_conversations_session ON conversations(session_id);
        CREATE TABLE IF NOT EXISTS uploaded_files (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            filename TEXT NOT NULL,
            file_type TEXT NOT NULL,
            content TEXT NOT NULL,
            uploaded_at TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

// --- Conversations ---

pub async fn record_turn(
    pool: &SqlitePool,
    session_id: &str,
    feature: &str,
    user_input: &str,
    ai_response: &str,
    model_used: &str,
) -> Result<ConversationTurn, AppError> {
    let created_at = Utc::now().to_rfc3339();

    let turn = sqlx::query_as::<_, ConversationTurn>(
        r#"
        INSERT INTO conversations (session_id, feature, user_input, ai_response, model_used, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        RETURNING id, session_id, feature, user_input, ai_response, model_used, created_at
        "#,
    )
    .bind(session_id)
    .bind(feature)
    .bind(user_input)
    .bind(ai_response)
    .bind(model_used)
    .bind(created_at)
    .fetch_one(pool)
    .await?;

    Ok(turn)
}

/// Turns of a session in insertion order.
pub async fn session_history(
    pool: &SqlitePool,
    session_id: &str,
) -> Result<Vec<ConversationTurn>, AppError> {
    let turns = sqlx::query_as::<_, ConversationTurn>(
        r#"
        SELECT id, session_id, feature, user_input, ai_response, model_used, created_at
        FROM conversations
        WHERE session_id = ?
        ORDER BY id ASC
        "#,
    )
    .bind(session_id)
    .fetch_all(pool)
    .await?;

    Ok(turns)
}

// --- Uploads ---

pub async fn record_upload(
    pool: &SqlitePool,
    filename: &str,
    file_type: &str,
) -> Result<UploadedFile, AppError> {
    let uploaded_at = Utc::now().to_rfc3339();
    let note = format!("File uploaded: {}", filename);

    let file = sqlx::query_as::<_, UploadedFile>(
        r#"
        INSERT INTO uploaded_files (filename, file_type, content, uploaded_at)
        VALUES (?, ?, ?, ?)
        RETURNING id, filename, file_type, content, uploaded_at
        "#,
    )
    .bind(filename)
    .bind(file_type)
    .bind(note)
    .bind(uploaded_at)
    .fetch_one(pool)
    .await?;

    Ok(file)
}
