#![allow(dead_code)]

use std::sync::Arc;
use std::sync::Mutex;

use axum::Json;
use axum::Router;
use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::http::StatusCode;
use axum::routing::post;
use rental_stats::config::CONTACTS_WEBHOOK_KEY;
use rental_stats::config::Config;
use rental_stats::config::WORKFLOW_WEBHOOK_KEY;
use rental_stats::relay::upstream::WebhookClient;
use rental_stats::server::AppState;
use rental_stats::server::router;
use serde_json::Value;
use serde_json::json;
use tokio::net::TcpListener;
use tower::ServiceExt;
use uuid::Uuid;

/// Config with the given raw webhook values and defaults for everything else.
pub fn config(workflow: Option<&str>, contacts: Option<&str>) -> Config {
    Config::from_lookup(|key| {
        if key == WORKFLOW_WEBHOOK_KEY {
            workflow.map(str::to_string)
        } else if key == CONTACTS_WEBHOOK_KEY {
            contacts.map(str::to_string)
        } else {
            None
        }
    })
    .expect("Failed to build config")
}

pub fn relay_app(config: &Config) -> Router {
    let upstream = Arc::new(WebhookClient::new().expect("Failed to create webhook client"));
    let state = AppState::new(config, upstream).expect("Failed to build app state");
    router(state)
}

/// Sends one request through the router and returns status and JSON body.
pub async fn call(app: Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if body.is_some() {
        builder = builder.header("content-type", "application/json");
    }
    let request = builder
        .body(body.map_or_else(Body::empty, |b| Body::from(b.to_string())))
        .expect("Failed to build request");

    let response = app.oneshot(request).await.expect("Router failed");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

/// Serves `app` on an ephemeral local port and returns its base URL.
pub async fn spawn_app(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("Failed to read local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });
    format!("http://{addr}")
}

// CONTACTS STUB

type ContactStore = Arc<Mutex<Vec<Value>>>;

/// Starts an in-memory stand-in for the contacts webhook and returns its URL.
pub async fn spawn_contacts_stub() -> String {
    let store = ContactStore::default();
    let app = Router::new()
        .route("/webhook/contacts", post(contacts_stub))
        .with_state(store);
    format!("{}/webhook/contacts", spawn_app(app).await)
}

async fn contacts_stub(
    State(store): State<ContactStore>,
    Json(mut body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let action = body
        .as_object_mut()
        .and_then(|o| o.remove("action"))
        .and_then(|a| a.as_str().map(str::to_string));
    let mut contacts = store.lock().unwrap();

    match action.as_deref() {
        Some("list") => (StatusCode::OK, Json(json!({ "contacts": contacts.clone() }))),
        Some("add") => {
            body["id"] = json!(Uuid::new_v4().to_string());
            body["createdAt"] = json!("2026-10-18T09:00:00Z");
            contacts.push(body.clone());
            (StatusCode::OK, Json(json!({ "success": true, "contact": body })))
        }
        Some("update") => {
            let id = body["id"].clone();
            match contacts.iter_mut().find(|c| c["id"] == id) {
                Some(existing) => {
                    for (k, v) in body.as_object().cloned().unwrap_or_default() {
                        existing[k.as_str()] = v;
                    }
                    (StatusCode::OK, Json(json!({ "success": true })))
                }
                None => (StatusCode::NOT_FOUND, Json(json!({ "message": "unknown id" }))),
            }
        }
        Some("delete") => {
            let id = body["id"].clone();
            contacts.retain(|c| c["id"] != id);
            (StatusCode::OK, Json(json!({ "success": true })))
        }
        _ => (StatusCode::BAD_REQUEST, Json(json!({ "message": "unknown action" }))),
    }
}
