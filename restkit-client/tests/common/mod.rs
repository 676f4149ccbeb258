#![allow(dead_code)]

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

use axum::{
    extract::{Path, RawQuery},
    http::{StatusCode, Uri},
    routing::get,
    Json, Router,
};
use restkit_client::{Hooks, MockTransport, ResourceClient, ResourceDescriptor};
use serde_json::{json, Value};

/// Records every hook invocation so tests can assert on the error path.
#[derive(Debug, Default)]
pub struct RecordingHooks {
    messages: Mutex<Vec<String>>,
    pub unauthorized: AtomicUsize,
}

impl RecordingHooks {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Hooks for RecordingHooks {
    fn show_error_message(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }

    fn handle_unauthorized(&self) {
        self.unauthorized.fetch_add(1, Ordering::SeqCst);
    }
}

async fn list_items(RawQuery(query): RawQuery) -> Json<Value> {
    Json(json!({ "op": "list", "query": query }))
}

async fn get_item(Path(id): Path<String>, RawQuery(query): RawQuery) -> Json<Value> {
    Json(json!({ "op": "get", "id": id, "query": query }))
}

async fn create_item(RawQuery(query): RawQuery, Json(body): Json<Value>) -> Json<Value> {
    Json(json!({ "op": "create", "query": query, "body": body }))
}

async fn update_item(
    Path(id): Path<String>,
    RawQuery(query): RawQuery,
    Json(body): Json<Value>,
) -> Json<Value> {
    Json(json!({ "op": "update", "id": id, "query": query, "body": body }))
}

async fn delete_item(Path(id): Path<String>, RawQuery(query): RawQuery) -> Json<Value> {
    Json(json!({ "op": "delete", "id": id, "query": query }))
}

async fn reports() -> Json<Value> {
    Json(json!({ "op": "reports" }))
}

async fn protected() -> StatusCode {
    StatusCode::UNAUTHORIZED
}

async fn forbidden() -> (StatusCode, Json<Value>) {
    (
        StatusCode::FORBIDDEN,
        Json(json!({ "message": "Not allowed" })),
    )
}

async fn broken() -> (StatusCode, &'static str) {
    (StatusCode::INTERNAL_SERVER_ERROR, "it broke")
}

async fn plain() -> &'static str {
    "not json"
}

async fn slow() -> Json<Value> {
    tokio::time::sleep(std::time::Duration::from_secs(60)).await;
    Json(json!({ "op": "slow" }))
}

async fn not_found(uri: Uri) -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": format!("no route for {uri}") })),
    )
}

/// Echo server standing in for the real backend.
pub fn router() -> Router {
    Router::new()
        .route("/items", get(list_items).post(create_item))
        .route(
            "/items/:id",
            get(get_item).put(update_item).delete(delete_item),
        )
        .route("/reports", get(reports))
        .route("/protected", get(protected))
        .route("/forbidden", get(forbidden))
        .route("/broken", get(broken))
        .route("/plain", get(plain))
        .route("/slow", get(slow))
        .fallback(not_found)
}

pub fn setup_client(descriptor: ResourceDescriptor) -> ResourceClient {
    MockTransport::new(router()).into_client(descriptor, None)
}

pub fn setup_client_with_hooks(
    descriptor: ResourceDescriptor,
) -> (ResourceClient, Arc<RecordingHooks>) {
    let hooks = Arc::new(RecordingHooks::default());
    let client =
        MockTransport::new(router()).into_client(descriptor, Some(hooks.clone() as Arc<dyn Hooks>));
    (client, hooks)
}
