//! Service and repository initialization

use crate::state::AppState;
use anyhow::{Context, Result};
use docsight_core::Config;
use docsight_db::DocumentRepository;
use docsight_processing::{KeywordAnalyzer, PdfTextExtractor, UploadValidator};
use docsight_services::{ChatCompletionsClient, InsightResolver};
use docsight_storage::LocalUploadStorage;
use sqlx::SqlitePool;
use std::sync::Arc;

/// Build the application state from configuration and a migrated pool.
pub async fn initialize_services(config: &Config, pool: SqlitePool) -> Result<Arc<AppState>> {
    let storage = LocalUploadStorage::new(&config.uploads_dir)
        .await
        .context("Failed to initialize upload storage")?;
    tracing::info!(uploads_dir = %config.uploads_dir.display(), "Upload storage ready");

    let summarizer = ChatCompletionsClient::new(config.summarizer.clone())?;
    if config.summarizer.is_configured() {
        tracing::info!(
            api_url = %config.summarizer.api_url,
            model = %config.summarizer.model,
            "Summarizer client configured"
        );
    } else {
        tracing::warn!("No summarizer API key configured; uploads will use keyword analysis");
    }

    let resolver = InsightResolver::new(
        Arc::new(summarizer),
        KeywordAnalyzer::new(config.keyword_count),
    );

    Ok(Arc::new(AppState {
        config: config.clone(),
        documents: DocumentRepository::new(pool),
        storage: Arc::new(storage),
        validator: UploadValidator::pdf_only(),
        extractor: Arc::new(PdfTextExtractor::new()),
        resolver,
    }))
}
