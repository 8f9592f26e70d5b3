use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::upload::extract_multipart_file;
use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use chrono::Utc;
use docsight_core::{DocumentRecord, DocumentResponse};
use std::sync::Arc;

/// Upload a PDF and derive its insight.
///
/// Order matters: the extension is checked before anything is written, and the record is
/// only inserted once an insight exists. The response is built from the in-memory record.
#[utoipa::path(
    post,
    path = "/upload-resume/",
    tag = "documents",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Document processed", body = DocumentResponse),
        (status = 400, description = "Not a PDF, or no extractable text", body = ErrorResponse),
        (status = 500, description = "File could not be saved or stored", body = ErrorResponse)
    )
)]
pub async fn upload_resume(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<DocumentResponse>, HttpAppError> {
    let upload = extract_multipart_file(multipart?).await?;

    state.validator.validate_extension(&upload.filename)?;

    let stored = state.storage.save(&upload.filename, &upload.data).await?;

    tracing::info!(
        filename = %upload.filename,
        content_type = upload.content_type.as_deref().unwrap_or("unknown"),
        size_bytes = stored.size_bytes,
        path = %stored.path.display(),
        "Upload saved"
    );

    let text = state.extractor.extract(&upload.data).await.map_err(|e| {
        tracing::warn!(filename = %upload.filename, error = %e, "Text extraction failed");
        e
    })?;

    let upload_date = Utc::now();
    let insight = state.resolver.resolve(&text).await;
    let record = DocumentRecord::new(upload.filename, stored.size_bytes, upload_date, insight);

    state.documents.insert(&record).await?;

    tracing::info!(
        document_id = %record.id,
        filename = %record.filename,
        processed_by = %record.provenance(),
        "Document processed"
    );

    Ok(Json(DocumentResponse::from(record)))
}
