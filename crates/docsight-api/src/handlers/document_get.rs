use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use docsight_core::{AppError, DocumentResponse};
use std::sync::Arc;
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/history/",
    tag = "documents",
    responses(
        (status = 200, description = "All processed documents, newest first", body = Vec<DocumentResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn list_history(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<DocumentResponse>>, HttpAppError> {
    let documents = state.documents.list_all().await?;

    Ok(Json(
        documents.into_iter().map(DocumentResponse::from).collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/insights/{document_id}",
    tag = "documents",
    params(
        ("document_id" = String, Path, description = "Document ID")
    ),
    responses(
        (status = 200, description = "Document found", body = DocumentResponse),
        (status = 404, description = "Document not found", body = ErrorResponse),
        (status = 500, description = "Stored document could not be decoded", body = ErrorResponse)
    )
)]
pub async fn get_insights(
    State(state): State<Arc<AppState>>,
    Path(document_id): Path<String>,
) -> Result<Json<DocumentResponse>, HttpAppError> {
    // An id that is not a UUID cannot name a stored document
    let id = Uuid::parse_str(&document_id)
        .map_err(|_| AppError::NotFound("Document not found".to_string()))?;

    let document = state
        .documents
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Document not found".to_string()))?;

    Ok(Json(DocumentResponse::from(document)))
}
