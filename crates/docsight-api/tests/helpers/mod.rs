//! Test helpers: build AppState and router for integration tests.
//!
//! Each test app gets its own in-memory SQLite database and temporary upload directory.
//! The summarizer is the real HTTP client pointed at a `mockito` server, or left without
//! an API key for keyword-only mode.

#![allow(dead_code)]

pub mod fixtures;

use axum_test::TestServer;
use docsight_api::setup::{routes, services};
use docsight_api::state::AppState;
use docsight_core::Config;
use sqlx::sqlite::SqlitePoolOptions;
use std::collections::HashMap;
use std::sync::Arc;
use tempfile::TempDir;

pub const COMPLETIONS_PATH: &str = "/v1/chat/completions";
pub const TEST_API_KEY: &str = "test-summarizer-key";

/// Test application: server, state, and owned resources.
pub struct TestApp {
    pub server: TestServer,
    pub state: Arc<AppState>,
    pub _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Number of files currently in the upload directory.
    pub fn stored_file_count(&self) -> usize {
        std::fs::read_dir(&self.state.config.uploads_dir)
            .map(|entries| entries.count())
            .unwrap_or(0)
    }
}

/// App whose summarizer posts to the given mockito server.
pub async fn setup_test_app(summarizer: &mockito::ServerGuard) -> TestApp {
    let url = format!("{}{}", summarizer.url(), COMPLETIONS_PATH);
    build_app(&[
        ("SUMMARIZER_API_URL", url.as_str()),
        ("SUMMARIZER_API_KEY", TEST_API_KEY),
        ("SUMMARIZER_TIMEOUT_SECS", "2"),
    ])
    .await
}

/// App with no summarizer credential. Every upload is processed by keyword analysis.
pub async fn setup_keyword_only_app() -> TestApp {
    build_app(&[]).await
}

async fn build_app(vars: &[(&str, &str)]) -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let uploads_dir = temp_dir.path().join("uploads");

    let mut env: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    env.insert(
        "UPLOADS_DIR".to_string(),
        uploads_dir.to_string_lossy().into_owned(),
    );
    env.insert("DATABASE_URL".to_string(), "sqlite::memory:".to_string());

    let config = Config::from_lookup(|key| env.get(key).cloned()).expect("Invalid test config");

    // One connection keeps the in-memory database alive for the whole test
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(config.database_url())
        .await
        .expect("Failed to connect to test database");
    docsight_db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    let state = services::initialize_services(&config, pool)
        .await
        .expect("Failed to initialize services");

    let app = routes::setup_routes(&config, state.clone()).expect("Failed to setup routes");
    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp {
        server,
        state,
        _temp_dir: temp_dir,
    }
}

/// Chat-completions response body carrying `content`.
pub fn completion_body(content: &str) -> String {
    serde_json::json!({
        "id": "chatcmpl-test",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
    .to_string()
}
