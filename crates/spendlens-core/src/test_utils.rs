//! Test utilities for spendlens-core
//!
//! This module provides testing infrastructure including a mock receipts
//! API server that can be used for development and integration tests. The
//! server records every request's method, path, and query parameters so
//! tests can assert on the exact wire contract.

use axum::extract::{Multipart, Path, RawQuery, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

use crate::models::{AnalyticsSnapshot, ExtractionResult, Receipt};

/// One request observed by the mock server
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Vec<(String, String)>,
}

#[derive(Default)]
struct MockState {
    receipts: Vec<Receipt>,
    analytics: AnalyticsSnapshot,
    extraction: Option<ExtractionResult>,
    /// When set, every endpoint answers 400 with this structured error
    error: Option<String>,
    requests: Vec<RecordedRequest>,
}

type SharedState = Arc<Mutex<MockState>>;

/// Mock receipts API server for testing and development
pub struct MockReceiptServer {
    addr: SocketAddr,
    state: SharedState,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockReceiptServer {
    /// Start the mock server on an available port
    pub async fn start() -> Self {
        let state: SharedState = Arc::new(Mutex::new(MockState::default()));

        let app = Router::new()
            .route("/receipts/", get(handle_list))
            .route("/receipts/upload/", post(handle_upload))
            .route(
                "/receipts/:id/",
                get(handle_get).patch(handle_update).delete(handle_delete),
            )
            .route("/receipts/analytics/", get(handle_analytics))
            .route("/receipts/export/", get(handle_export))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .unwrap();
        });

        Self {
            addr,
            state,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Get the API base URL for this mock server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }

    /// Replace the receipt fixtures served by the list/get endpoints
    pub fn seed_receipts(&self, receipts: Vec<Receipt>) {
        self.state.lock().unwrap().receipts = receipts;
    }

    /// Set the analytics snapshot fixture
    pub fn set_analytics(&self, snapshot: AnalyticsSnapshot) {
        self.state.lock().unwrap().analytics = snapshot;
    }

    /// Set the extraction result returned by the upload endpoint
    pub fn set_extraction(&self, result: ExtractionResult) {
        self.state.lock().unwrap().extraction = Some(result);
    }

    /// Make every endpoint fail with a structured `{"error": ...}` body
    pub fn set_error(&self, message: Option<&str>) {
        self.state.lock().unwrap().error = message.map(str::to_string);
    }

    /// All requests observed so far, in arrival order
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    /// Forget previously recorded requests
    pub fn clear_requests(&self) {
        self.state.lock().unwrap().requests.clear();
    }
}

impl Drop for MockReceiptServer {
    fn drop(&mut self) {
        self.stop();
    }
}

fn record(state: &SharedState, method: &str, path: String, raw_query: &Option<String>) {
    let query = raw_query
        .as_deref()
        .unwrap_or("")
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((k, v)) => (k.to_string(), v.to_string()),
            None => (pair.to_string(), String::new()),
        })
        .collect();

    state.lock().unwrap().requests.push(RecordedRequest {
        method: method.to_string(),
        path,
        query,
    });
}

fn forced_error(state: &SharedState) -> Option<Response> {
    let guard = state.lock().unwrap();
    guard.error.as_ref().map(|message| {
        (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
    })
}

async fn handle_list(State(state): State<SharedState>, RawQuery(query): RawQuery) -> Response {
    record(&state, "GET", "/receipts/".to_string(), &query);
    if let Some(response) = forced_error(&state) {
        return response;
    }

    let receipts = state.lock().unwrap().receipts.clone();
    Json(json!({ "results": receipts })).into_response()
}

async fn handle_get(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    RawQuery(query): RawQuery,
) -> Response {
    record(&state, "GET", format!("/receipts/{}/", id), &query);
    if let Some(response) = forced_error(&state) {
        return response;
    }

    let receipt = state
        .lock()
        .unwrap()
        .receipts
        .iter()
        .find(|r| r.id == id)
        .cloned();
    match receipt {
        Some(receipt) => Json(receipt).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" }))).into_response(),
    }
}

async fn handle_upload(
    State(state): State<SharedState>,
    RawQuery(query): RawQuery,
    mut multipart: Multipart,
) -> Response {
    record(&state, "POST", "/receipts/upload/".to_string(), &query);

    let mut saw_file_field = false;
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() == Some("file") {
            saw_file_field = true;
        }
        let _ = field.bytes().await;
    }

    if let Some(response) = forced_error(&state) {
        return response;
    }
    if !saw_file_field {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "No file provided" })),
        )
            .into_response();
    }

    let extraction = state.lock().unwrap().extraction.clone();
    match extraction {
        Some(result) => (StatusCode::CREATED, Json(result)).into_response(),
        None => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Processing failed: no fixture configured" })),
        )
            .into_response(),
    }
}

async fn handle_update(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    RawQuery(query): RawQuery,
    Json(body): Json<serde_json::Value>,
) -> Response {
    record(&state, "PATCH", format!("/receipts/{}/", id), &query);
    if let Some(response) = forced_error(&state) {
        return response;
    }

    let mut guard = state.lock().unwrap();
    let Some(receipt) = guard.receipts.iter_mut().find(|r| r.id == id) else {
        return (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" }))).into_response();
    };

    if let Some(vendor) = body.get("vendor").and_then(|v| v.as_str()) {
        receipt.vendor = vendor.to_string();
    }
    if let Some(amount) = body.get("amount").and_then(|v| v.as_f64()) {
        receipt.amount = amount;
    }
    if let Some(category) = body.get("category").and_then(|v| v.as_str()) {
        if let Ok(parsed) = category.parse() {
            receipt.category = parsed;
        }
    }
    if let Some(date) = body.get("transaction_date").and_then(|v| v.as_str()) {
        if let Ok(parsed) = date.parse() {
            receipt.transaction_date = parsed;
        }
    }

    Json(receipt.clone()).into_response()
}

async fn handle_delete(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    RawQuery(query): RawQuery,
) -> Response {
    record(&state, "DELETE", format!("/receipts/{}/", id), &query);
    if let Some(response) = forced_error(&state) {
        return response;
    }

    let mut guard = state.lock().unwrap();
    let before = guard.receipts.len();
    guard.receipts.retain(|r| r.id != id);
    if guard.receipts.len() == before {
        return (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" }))).into_response();
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn handle_analytics(State(state): State<SharedState>, RawQuery(query): RawQuery) -> Response {
    record(&state, "GET", "/receipts/analytics/".to_string(), &query);
    if let Some(response) = forced_error(&state) {
        return response;
    }

    let snapshot = state.lock().unwrap().analytics.clone();
    Json(snapshot).into_response()
}

async fn handle_export(State(state): State<SharedState>, RawQuery(query): RawQuery) -> Response {
    record(&state, "GET", "/receipts/export/".to_string(), &query);
    if let Some(response) = forced_error(&state) {
        return response;
    }

    let wants_json = query
        .as_deref()
        .unwrap_or("")
        .split('&')
        .any(|pair| pair == "format=json");

    let guard = state.lock().unwrap();
    if wants_json {
        Json(guard.receipts.clone()).into_response()
    } else {
        let mut csv = String::from("Vendor,Date,Amount,Category,Created\n");
        for receipt in &guard.receipts {
            csv.push_str(&format!(
                "{},{},{:.2},{},{}\n",
                receipt.vendor,
                receipt.transaction_date,
                receipt.amount,
                receipt.category,
                receipt.created_at.format("%Y-%m-%d %H:%M:%S")
            ));
        }
        csv.into_response()
    }
}
