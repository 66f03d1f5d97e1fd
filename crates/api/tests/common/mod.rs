#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use laborlines_api::app;
use laborlines_api::dispatcher::{DispatchOptions, LaborLineDispatcher};
use laborlines_api::event::ResolverEvent;
use laborlines_api::response::ResolverResponse;
use laborlines_api::state::AppState;
use laborlines_core::validation::LaborLineValidator;
use laborlines_db::DbStore;

/// Dispatcher with the production validator over a fresh in-memory store.
pub fn test_dispatcher() -> LaborLineDispatcher {
    dispatcher_with(laborlines_db::create_memory_store(), DispatchOptions::default())
}

pub fn dispatcher_with(store: DbStore, options: DispatchOptions) -> LaborLineDispatcher {
    LaborLineDispatcher::new(store, Arc::new(LaborLineValidator::new()), options)
}

/// Build the harness router with all middleware layers over an in-memory
/// store.
pub fn build_test_app() -> Router {
    app::build_app(AppState::new(test_dispatcher()), Duration::from_secs(30))
}

pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

pub fn mutation(field_name: &str, input: Value) -> ResolverEvent {
    ResolverEvent::new("Mutation", field_name, input)
}

pub fn query(field_name: &str, input: Value) -> ResolverEvent {
    ResolverEvent::new("Query", field_name, input)
}

/// Create a labor line and return its `data` payload.
pub async fn create_line(
    dispatcher: &LaborLineDispatcher,
    account_id: &str,
    task_id: &str,
    notes: &[&str],
) -> Value {
    let response = dispatcher
        .handle(&mutation(
            "createLaborLine",
            json!({
                "contactId": new_id(),
                "accountId": account_id,
                "taskId": task_id,
                "partId": [new_id()],
                "notes": notes,
            }),
        ))
        .await;
    expect_data(response)
}

pub fn expect_data(response: ResolverResponse) -> Value {
    assert!(
        response.error.is_none(),
        "unexpected error: {:?}",
        response.error
    );
    response.data.expect("response carries data")
}

/// The lookup key of a created record, as a get/delete input.
pub fn key_of(line: &Value) -> Value {
    json!({
        "accountId": line["accountId"],
        "taskId": line["taskId"],
        "laborLineId": line["laborLineId"],
    })
}

// ---------------------------------------------------------------------------
// HTTP helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn post_raw(app: Router, uri: &str, body: &'static str) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .body(Body::from(body))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
