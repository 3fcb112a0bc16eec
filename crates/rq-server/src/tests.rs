use crate::generate::{GenerationKind, TextGenerator};
use crate::state::AppState;
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use rq_core::ReqsmithConfig;
use rq_extract::{
    FileTextExtractor, LegacyBackend, PaginatedBackend, SpreadsheetBackend, StructuredBackend,
    StructuredDocument, Workbook,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

// Fakes: the pdf backend echoes the payload back as one page, the
// generator tags its input with the requested kind.

struct EchoPdf;

impl PaginatedBackend for EchoPdf {
    fn extract_pages(&self, bytes: &[u8]) -> anyhow::Result<Vec<String>> {
        Ok(vec![String::from_utf8_lossy(bytes).to_string()])
    }
}

struct NoStructured;

impl StructuredBackend for NoStructured {
    fn parse_document(&self, _bytes: &[u8]) -> anyhow::Result<StructuredDocument> {
        Ok(StructuredDocument::default())
    }
}

struct NoLegacy;

impl LegacyBackend for NoLegacy {
    fn extract_raw_text(&self, _bytes: &[u8]) -> anyhow::Result<String> {
        Ok(String::new())
    }
}

struct NoSpreadsheet;

impl SpreadsheetBackend for NoSpreadsheet {
    fn load_workbook(&self, _bytes: &[u8]) -> anyhow::Result<Workbook> {
        Ok(Workbook::default())
    }
}

struct EchoGenerator;

#[async_trait]
impl TextGenerator for EchoGenerator {
    async fn generate(&self, kind: GenerationKind, source_text: &str) -> anyhow::Result<String> {
        Ok(format!("[{}] {}", kind.as_str(), source_text))
    }
}

fn test_app() -> Router {
    test_app_with_config(ReqsmithConfig::default())
}

fn test_app_with_config(config: ReqsmithConfig) -> Router {
    let extractor = Arc::new(FileTextExtractor::new(
        Arc::new(EchoPdf),
        Arc::new(NoStructured),
        Arc::new(NoLegacy),
        Arc::new(NoSpreadsheet),
    ));
    crate::app(AppState::new(config, extractor, Arc::new(EchoGenerator)))
}

const BOUNDARY: &str = "reqsmith-test-boundary";

fn multipart_request(uri: &str, filename: &str, content: &str) -> Request<Body> {
    let body = format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
         Content-Type: application/octet-stream\r\n\r\n\
         {content}\r\n\
         --{BOUNDARY}--\r\n"
    );
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ========== Health ==========

#[tokio::test]
async fn test_health() {
    let response = test_app()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["status"], "healthy");
}

// ========== Extraction Endpoint ==========

#[tokio::test]
async fn test_extract_text_only() {
    let response = test_app()
        .oneshot(multipart_request("/api/v1/extract", "doc.pdf", "Hello"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["filename"], "doc.pdf");
    assert_eq!(body["extracted_text"], "Hello");
    assert_eq!(body["text_length"], 5);
}

#[tokio::test]
async fn test_extract_unsupported_extension() {
    let response = test_app()
        .oneshot(multipart_request("/api/v1/extract", "notes.txt", "Hello"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "bad_request");
}

#[tokio::test]
async fn test_extract_oversized_payload() {
    let mut config = ReqsmithConfig::default();
    config.upload.max_file_size_mb = 0;
    let response = test_app_with_config(config)
        .oneshot(multipart_request("/api/v1/extract", "doc.pdf", "x"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_extract_missing_file_field() {
    let body = format!("--{BOUNDARY}--\r\n");
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/extract")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();
    let response = test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ========== Upload / Session Lifecycle ==========

#[tokio::test]
async fn test_upload_then_session_roundtrip() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(multipart_request("/api/v1/documents", "a.pdf", "Hello"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["original_filename"], "a.pdf");
    assert_eq!(body["extracted_text"], "Hello");
    assert_eq!(body["generated_requirements"], "[system-requirements] Hello");
    assert_eq!(body["status"], "success");
    let session_id = body["session_id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(
            Request::get(format!("/api/v1/session/{session_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let info = json_body(response).await;
    assert_eq!(info["filename"], "a.pdf");
    assert_eq!(info["text_length"], 5);
    assert_eq!(info["session_id"], session_id.as_str());

    let response = app
        .clone()
        .oneshot(
            Request::delete(format!("/api/v1/session/{session_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(
            Request::get(format!("/api/v1/session/{session_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_upload_rejects_empty_extraction() {
    // EchoPdf yields a single empty page for an empty payload.
    let response = test_app()
        .oneshot(multipart_request("/api/v1/documents", "a.pdf", ""))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_unknown_session() {
    let response = test_app()
        .oneshot(
            Request::delete("/api/v1/session/unknown")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ========== Session-Scoped Generation ==========

#[tokio::test]
async fn test_generate_from_session() {
    let app = test_app();
    let body = json_body(
        app.clone()
            .oneshot(multipart_request("/api/v1/documents", "spec.pdf", "Build a parser"))
            .await
            .unwrap(),
    )
    .await;
    let session_id = body["session_id"].as_str().unwrap().to_string();

    let request = Request::post(format!("/api/v1/session/{session_id}/generate"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({ "kind": "functional-diagram" }).to_string(),
        ))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["kind"], "functional-diagram");
    assert_eq!(body["generated_text"], "[functional-diagram] Build a parser");
    assert_eq!(body["original_filename"], "spec.pdf");
}

#[tokio::test]
async fn test_generate_from_missing_session() {
    let request = Request::post("/api/v1/session/gone/generate")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "kind": "security-requirements" }).to_string()))
        .unwrap();
    let response = test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
