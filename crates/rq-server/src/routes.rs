use crate::error::ApiError;
use crate::generate::GenerationKind;
use crate::state::AppState;
use axum::{
    extract::{Multipart, Path, State},
    routing::{get, post},
    Json, Router,
};
use rq_core::RqError;
use rq_extract::FileTextExtractor;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;

pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
}

pub fn document_routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/extract", post(extract_text))
        .route("/api/v1/documents", post(upload_document))
}

pub fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/session/{id}", get(session_info).delete(delete_session))
        .route("/api/v1/session/{id}/generate", post(generate_from_session))
}

async fn root() -> Json<Value> {
    Json(json!({ "message": "reqsmith API" }))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

/// Pull the `file` field out of a multipart upload.
async fn read_upload(mut multipart: Multipart) -> Result<(String, Vec<u8>), ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(e.to_string()))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or("upload").to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::bad_request(e.to_string()))?;
            return Ok((filename, bytes.to_vec()));
        }
    }
    Err(ApiError::bad_request("Missing multipart field: file"))
}

/// Dotted lowercase extension of a filename, or empty string.
fn dotted_extension(filename: &str) -> String {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| format!(".{}", ext.to_lowercase()))
        .unwrap_or_default()
}

/// Run the size gate and the blocking extraction off the runtime.
async fn extract_upload(
    state: &AppState,
    filename: &str,
    bytes: Vec<u8>,
) -> Result<String, ApiError> {
    let max_mb = state.config.upload.max_file_size_mb;
    if !FileTextExtractor::validate_size(&bytes, max_mb) {
        return Err(RqError::SizeLimitExceeded { size_bytes: bytes.len(), max_mb }.into());
    }
    let extension = dotted_extension(filename);
    let extractor = Arc::clone(&state.extractor);
    let text = tokio::task::spawn_blocking(move || extractor.extract(&bytes, &extension))
        .await
        .map_err(|e| ApiError::internal(e.to_string()))??;
    Ok(text)
}

/// Extract text only, without creating a session.
async fn extract_text(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    let (filename, bytes) = read_upload(multipart).await?;
    let text = extract_upload(&state, &filename, bytes).await?;
    Ok(Json(json!({
        "filename": filename,
        "extracted_text": text,
        "text_length": text.chars().count(),
    })))
}

/// Upload a document: extract, cache under a session, and generate the
/// initial system-requirements draft from the extracted text.
async fn upload_document(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    let (filename, bytes) = read_upload(multipart).await?;
    let text = extract_upload(&state, &filename, bytes).await?;
    if text.trim().is_empty() {
        return Err(RqError::EmptyDocument.into());
    }

    let session_id = state.store.create(text.clone(), filename.clone());
    info!(session_id = %session_id, filename = %filename, "document uploaded");

    let generated = state
        .generator
        .generate(GenerationKind::SystemRequirements, &text)
        .await
        .map_err(|e| ApiError::internal(e.to_string()))?;

    Ok(Json(json!({
        "original_filename": filename,
        "extracted_text": text,
        "generated_requirements": generated,
        "session_id": session_id,
        "status": "success",
    })))
}

async fn session_info(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let session = state.store.get(&id).ok_or_else(ApiError::session_not_found)?;
    Ok(Json(json!({
        "session_id": session.id,
        "filename": session.source_name,
        "created_at": session.created_at.to_rfc3339(),
        "last_accessed": session.last_accessed.to_rfc3339(),
        "text_length": session.text_length(),
    })))
}

async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    if !state.store.delete(&id) {
        return Err(ApiError::not_found("Session not found"));
    }
    Ok(Json(json!({ "message": "Session deleted successfully" })))
}

#[derive(Debug, Deserialize)]
struct GenerateRequest {
    kind: GenerationKind,
}

/// Generate a document of the requested kind from a cached session.
async fn generate_from_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<Value>, ApiError> {
    let session = state.store.get(&id).ok_or_else(ApiError::session_not_found)?;
    let generated = state
        .generator
        .generate(req.kind, &session.text)
        .await
        .map_err(|e| ApiError::internal(e.to_string()))?;
    Ok(Json(json!({
        "original_filename": session.source_name,
        "kind": req.kind.as_str(),
        "generated_text": generated,
        "status": "success",
    })))
}
