//! Application state shared by all handlers.

use docsight_core::Config;
use docsight_db::DocumentRepository;
use docsight_processing::{TextExtractor, UploadValidator};
use docsight_services::InsightResolver;
use docsight_storage::UploadStorage;
use std::sync::Arc;

/// Everything a request needs, built once at startup. The pool inside the repository is
/// the only shared resource; there is no other mutable state.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub documents: DocumentRepository,
    pub storage: Arc<dyn UploadStorage>,
    pub validator: UploadValidator,
    pub extractor: Arc<dyn TextExtractor>,
    pub resolver: InsightResolver,
}
