mod common;

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use common::{StubSummarizer, minimal_pdf};
use pdf_summarizer::api::AppState;
use pdf_summarizer::api::handler::{NO_TEXT_MESSAGE, route};
use pdf_summarizer::core::config::AppConfig;
use serde_json::{Value, json};

fn state_with(stub: StubSummarizer) -> (AppState, Arc<StubSummarizer>) {
    let config = AppConfig::from_lookup(|key| match key {
        "MAX_UPLOAD_BYTES" => Some("4096".to_string()),
        _ => None,
    })
    .unwrap();
    let stub = Arc::new(stub);
    (AppState::new(config, stub.clone()), stub)
}

fn request(method: &str, path: &str) -> Value {
    json!({
        "rawPath": path,
        "requestContext": { "http": { "method": method } },
        "headers": {}
    })
}

fn upload_request(filename: &str, bytes: &[u8]) -> Value {
    json!({
        "rawPath": "/summarize_pdf",
        "requestContext": { "http": { "method": "POST" } },
        "headers": {
            "content-type": "application/pdf",
            "content-disposition": format!("attachment; filename=\"{filename}\"")
        },
        "isBase64Encoded": true,
        "body": STANDARD.encode(bytes)
    })
}

fn body_of(response: &Value) -> Value {
    serde_json::from_str(response["body"].as_str().unwrap()).unwrap()
}

#[tokio::test]
async fn test_root_describes_service() {
    let (state, _) = state_with(StubSummarizer::truncating());

    let response = route(&state, &request("GET", "/")).await;

    assert_eq!(response["statusCode"], 200);
    let body = body_of(&response);
    assert_eq!(body["model"], "stub-model");
    assert_eq!(body["endpoints"]["summarize_pdf"], "/summarize_pdf");
}

#[tokio::test]
async fn test_health_reports_model_status() {
    let (state, stub) = state_with(StubSummarizer::truncating());
    let response = route(&state, &request("GET", "/health")).await;
    let body = body_of(&response);
    assert_eq!(response["statusCode"], 200);
    assert_eq!(body["model_status"], "ok");
    assert!(body["timestamp"].as_str().is_some());
    assert_eq!(stub.call_count(), 1);

    let (state, _) = state_with(StubSummarizer::failing());
    let response = route(&state, &request("GET", "/health")).await;
    let body = body_of(&response);
    assert_eq!(response["statusCode"], 200);
    assert!(body["model_status"].as_str().unwrap().starts_with("error:"));
}

#[tokio::test]
async fn test_unknown_route_and_wrong_method() {
    let (state, _) = state_with(StubSummarizer::truncating());

    let response = route(&state, &request("GET", "/docs")).await;
    assert_eq!(response["statusCode"], 404);

    let response = route(&state, &request("GET", "/summarize_pdf")).await;
    assert_eq!(response["statusCode"], 405);
}

#[tokio::test]
async fn test_rejects_non_pdf_filename() {
    let (state, stub) = state_with(StubSummarizer::truncating());

    let response = route(&state, &upload_request("notes.txt", b"plain text")).await;

    assert_eq!(response["statusCode"], 400);
    assert!(
        body_of(&response)["detail"]
            .as_str()
            .unwrap()
            .contains("File must be a PDF")
    );
    assert_eq!(stub.call_count(), 0);
}

#[tokio::test]
async fn test_rejects_oversized_upload() {
    let (state, stub) = state_with(StubSummarizer::truncating());

    let response = route(&state, &upload_request("big.pdf", &vec![b'%'; 8192])).await;

    assert_eq!(response["statusCode"], 400);
    assert!(
        body_of(&response)["detail"]
            .as_str()
            .unwrap()
            .contains("must not exceed")
    );
    assert_eq!(stub.call_count(), 0);
}

#[tokio::test]
async fn test_unparseable_pdf_is_internal_error() {
    let (state, stub) = state_with(StubSummarizer::truncating());

    let response = route(&state, &upload_request("broken.pdf", b"not really a pdf")).await;

    assert_eq!(response["statusCode"], 500);
    assert!(
        body_of(&response)["detail"]
            .as_str()
            .unwrap()
            .starts_with("Internal error")
    );
    assert_eq!(stub.call_count(), 0);
}

#[tokio::test]
async fn test_summarizes_uploaded_pdf() {
    let (state, stub) = state_with(StubSummarizer::truncating());
    let pdf = minimal_pdf(&["Rust makes systems programming safer", "and more productive"]);

    let response = route(&state, &upload_request("paper.pdf", &pdf)).await;

    assert_eq!(response["statusCode"], 200);
    let summary = body_of(&response)["summary"].as_str().unwrap().to_string();
    assert!(summary.contains("Rust"));
    assert_eq!(stub.call_count(), 1);
    assert!(stub.calls()[0].0.contains("productive"));
}

#[tokio::test]
async fn test_pdf_without_text_returns_no_text_message() {
    let (state, stub) = state_with(StubSummarizer::truncating());
    let pdf = minimal_pdf(&[]);

    let response = route(&state, &upload_request("blank.pdf", &pdf)).await;

    assert_eq!(response["statusCode"], 200);
    assert_eq!(body_of(&response)["summary"], NO_TEXT_MESSAGE);
    assert_eq!(stub.call_count(), 0);
}
