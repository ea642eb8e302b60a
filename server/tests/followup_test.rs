//! Follow-up Message Integration Tests
//!
//! Drives every follow-up call against a mock webhook API and checks the
//! method, path, and query each one sends.
//!
//! Run with: `cargo test --test followup_test -- --nocapture`

mod helpers;

use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{patch, post};
use axum::{Json, Router};
use helpers::{spawn_test_server, TestServer};
use ix_common::{MessageBody, Snowflake};
use ix_server::interactions::Followup;
use ix_server::rest::RetryPolicy;
use serde_json::{json, Value};

const APPLICATION_ID: &str = "1000";
const TOKEN: &str = "interaction-token";

// ============================================================================
// Mock webhook API
// ============================================================================

/// One request seen by the mock: method, path and query, JSON body.
type Seen = (Method, String, Option<Value>);

#[derive(Clone, Default)]
struct Webhooks {
    seen: Arc<Mutex<Vec<Seen>>>,
}

impl Webhooks {
    fn record(&self, method: Method, uri: &Uri, body: Option<Value>) {
        let target = uri
            .path_and_query()
            .map_or_else(|| uri.path().to_owned(), ToString::to_string);
        self.seen.lock().unwrap().push((method, target, body));
    }

    fn seen(&self) -> Vec<Seen> {
        self.seen.lock().unwrap().clone()
    }
}

async fn create(
    State(hooks): State<Webhooks>,
    Path((_app, _token)): Path<(String, String)>,
    uri: Uri,
    Json(body): Json<Value>,
) -> Json<Value> {
    hooks.record(Method::POST, &uri, Some(body.clone()));
    Json(json!({"id": "801", "channel_id": "300", "content": body["content"]}))
}

async fn edit(
    State(hooks): State<Webhooks>,
    Path((_app, _token, message_id)): Path<(String, String, String)>,
    uri: Uri,
    Json(body): Json<Value>,
) -> Json<Value> {
    hooks.record(Method::PATCH, &uri, Some(body.clone()));
    Json(json!({"id": message_id, "content": body["content"], "flags": 64}))
}

async fn remove(
    State(hooks): State<Webhooks>,
    Path((_app, _token, _message_id)): Path<(String, String, String)>,
    uri: Uri,
) -> Response {
    hooks.record(Method::DELETE, &uri, None);
    StatusCode::NO_CONTENT.into_response()
}

async fn setup() -> (Followup, Webhooks, TestServer) {
    let hooks = Webhooks::default();
    let router = Router::new()
        .route("/webhooks/{application_id}/{token}", post(create))
        .route(
            "/webhooks/{application_id}/{token}/messages/{message_id}",
            patch(edit).delete(remove),
        )
        .with_state(hooks.clone());
    let server = spawn_test_server(router).await;

    let rest = helpers::rest_client(&server.url, RetryPolicy::default());
    let followup = Followup::new(rest, APPLICATION_ID.into(), TOKEN);
    (followup, hooks, server)
}

fn message_path(message_id: &str) -> String {
    format!("/webhooks/{APPLICATION_ID}/{TOKEN}/messages/{message_id}")
}

// ============================================================================
// Follow-up lifecycle
// ============================================================================

#[tokio::test]
async fn test_create_message_waits_for_the_message() {
    let (followup, hooks, _server) = setup().await;

    let message = followup
        .create_message(&MessageBody::text("second thoughts"))
        .await
        .unwrap();
    assert_eq!(message.id.as_str(), "801");
    assert_eq!(message.channel_id, Some(Snowflake::from("300")));
    assert_eq!(message.content, "second thoughts");

    let seen = hooks.seen();
    assert_eq!(seen.len(), 1);
    let (method, target, body) = &seen[0];
    assert_eq!(*method, Method::POST);
    assert_eq!(*target, format!("/webhooks/{APPLICATION_ID}/{TOKEN}?wait=true"));
    assert_eq!(body.as_ref().unwrap()["content"], "second thoughts");
}

#[tokio::test]
async fn test_edit_then_delete_follow_up_message() {
    let (followup, hooks, _server) = setup().await;

    let created = followup
        .create_message(&MessageBody::text("draft"))
        .await
        .unwrap();
    let edited = followup
        .edit_message(&created.id, &MessageBody::text("final").ephemeral())
        .await
        .unwrap();
    assert_eq!(edited.id, created.id);
    assert_eq!(edited.content, "final");
    assert_eq!(edited.flags, Some(64));

    followup.delete_message(&created.id).await.unwrap();

    let seen = hooks.seen();
    assert_eq!(seen.len(), 3);
    assert_eq!(seen[1].0, Method::PATCH);
    assert_eq!(seen[1].1, message_path("801"));
    assert_eq!(seen[1].2.as_ref().unwrap()["content"], "final");
    assert_eq!(seen[2].0, Method::DELETE);
    assert_eq!(seen[2].1, message_path("801"));
    assert!(seen[2].2.is_none());
}

#[tokio::test]
async fn test_edit_and_delete_original_response() {
    let (followup, hooks, _server) = setup().await;

    let edited = followup
        .edit_original(&MessageBody::text("done"))
        .await
        .unwrap();
    assert_eq!(edited.id.as_str(), "@original");
    followup.delete_original().await.unwrap();

    let seen = hooks.seen();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0].0, Method::PATCH);
    assert_eq!(seen[0].1, message_path("@original"));
    assert_eq!(seen[1].0, Method::DELETE);
    assert_eq!(seen[1].1, message_path("@original"));
}

#[tokio::test]
async fn test_invalid_follow_up_is_never_sent() {
    let (followup, hooks, _server) = setup().await;

    assert!(followup.create_message(&MessageBody::default()).await.is_err());
    assert!(followup
        .edit_message(&"801".into(), &MessageBody::text("x".repeat(2001)))
        .await
        .is_err());
    assert!(hooks.seen().is_empty());
}
