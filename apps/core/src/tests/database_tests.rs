//! Database Module Tests
//!
//! Conversation turns and upload metadata against in-memory and file-backed
//! SQLite databases.

use super::support::memory_pool;
use crate::database;
use tempfile::tempdir;

#[cfg(test)]
mod conversation_tests {
    use super::*;

    #[tokio::test]
    async fn test_record_turn() {
        let pool = memory_pool().await;

        let turn = database::record_turn(
            &pool,
            "session-a",
            "chat",
            "hello",
            "hi there",
            "llama-3.1-8b-instant",
        )
        .await
        .expect("Failed to record turn");

        assert!(turn.id > 0);
        assert_eq!(turn.session_id, "session-a");
        assert_eq!(turn.ai_response, "hi there");
        assert!(chrono::DateTime::parse_from_rfc3339(&turn.created_at).is_ok());
    }

    #[tokio::test]
    async fn test_history_in_insertion_order() {
        let pool = memory_pool().await;

        for i in 0..3 {
            database::record_turn(&pool, "ordered", "chat", &format!("q{}", i), "a", "m")
                .await
                .unwrap();
        }
        database::record_turn(&pool, "other", "chat", "elsewhere", "a", "m")
            .await
            .unwrap();

        let history = database::session_history(&pool, "ordered").await.unwrap();
        let inputs: Vec<&str> = history.iter().map(|t| t.user_input.as_str()).collect();
        assert_eq!(inputs, vec!["q0", "q1", "q2"]);
    }

    #[tokio::test]
    async fn test_history_of_unknown_session_is_empty() {
        let pool = memory_pool().await;
        let history = database::session_history(&pool, "nobody").await.unwrap();
        assert!(history.is_empty());
    }
}

#[cfg(test)]
mod upload_tests {
    use super::*;

    #[tokio::test]
    async fn test_record_upload() {
        let pool = memory_pool().await;

        let file = database::record_upload(&pool, "report.pdf", "pdf")
            .await
            .expect("Failed to record upload");

        assert_eq!(file.filename, "report.pdf");
        assert_eq!(file.file_type, "pdf");
        assert_eq!(file.content, "File uploaded: report.pdf");
    }
}

#[cfg(test)]
mod init_tests {
    use super::*;

    #[tokio::test]
    async fn test_init_creates_file_database() {
        let dir = tempdir().expect("Failed to create temp dir");
        let db_path = dir.path().join("test.sqlite");
        let db_url = format!("sqlite://{}", db_path.display());

        let pool = database::init_db(&db_url).await.expect("Failed to init db");
        database::record_turn(&pool, "s", "chat", "q", "a", "m").await.unwrap();
        assert!(db_path.exists());

        // migrations are idempotent
        database::migrate(&pool).await.unwrap();
        assert_eq!(database::session_history(&pool, "s").await.unwrap().len(), 1);
        pool.close().await;
    }
}
