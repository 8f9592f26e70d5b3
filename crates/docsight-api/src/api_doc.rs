//! OpenAPI documentation, served at `/api/openapi.json` and rendered by RapiDoc at `/docs`.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use docsight_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "docsight API",
        version = "0.1.0",
        description = "Upload PDF documents and get an AI summary, or the most frequent keywords when no summary is available."
    ),
    paths(
        handlers::document_upload::upload_resume,
        handlers::document_get::list_history,
        handlers::document_get::get_insights,
        handlers::health::health_check,
    ),
    components(schemas(
        models::DocumentResponse,
        models::InsightBody,
        models::KeywordInsight,
        models::Provenance,
        error::ErrorResponse,
        handlers::health::HealthCheckResponse,
    )),
    tags(
        (name = "documents", description = "Document upload and insight lookup"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_all_routes() {
        let doc = ApiDoc::openapi();
        for path in ["/upload-resume/", "/history/", "/insights/{document_id}", "/health"] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }
}
