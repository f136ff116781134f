//! Inbound HTTP surface: the dashboard page and the relay routes.

use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::Method;
use axum::response::Html;
use axum::routing::any;
use axum::routing::get;
use axum::routing::post;
use log::info;
use log::warn;
use serde_json::Value;
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing::instrument;

use crate::config::Config;
use crate::relay::CONTACTS_ORIGIN;
use crate::relay::ContactAction;
use crate::relay::Relay;
use crate::relay::WORKFLOW_ORIGIN;
use crate::relay::error::RelayError;
use crate::relay::upstream::Upstream;

pub mod error;
pub mod page;

pub const WORKFLOW_PATH: &str = "/workflow";
pub const CONTACTS_PATH: &str = "/contacts";

/// Read-only state shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub workflow: Arc<Relay>,
    pub contacts: Arc<Relay>,
    pub page: Arc<str>,
}

impl AppState {
    pub fn new(config: &Config, upstream: Arc<dyn Upstream>) -> Result<Self, minijinja::Error> {
        let workflow = Relay::new(
            WORKFLOW_ORIGIN,
            &config.workflow,
            config.detail_limit,
            upstream.clone(),
        );
        let contacts = Relay::new(
            CONTACTS_ORIGIN,
            &config.contacts,
            config.detail_limit,
            upstream,
        );
        let page = page::render_dashboard(WORKFLOW_PATH, CONTACTS_PATH)?;

        Ok(Self {
            workflow: Arc::new(workflow),
            contacts: Arc::new(contacts),
            page: Arc::from(page),
        })
    }
}

/// Builds the router. Relay routes are served both at the root and under `/api`.
pub fn router(state: AppState) -> Router {
    let relay_routes = Router::new()
        .route(WORKFLOW_PATH, post(trigger_workflow))
        .route(CONTACTS_PATH, any(relay_contacts));

    Router::new()
        .route("/", get(dashboard))
        .route("/health", get(health))
        .merge(relay_routes.clone())
        .nest("/api", relay_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn dashboard(State(state): State<AppState>) -> Html<String> {
    Html(state.page.to_string())
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// `POST /workflow`: forwards the report request as-is.
#[instrument(skip_all)]
async fn trigger_workflow(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, RelayError> {
    let payload = parse_body(&body)?;
    let result = state.workflow.forward(&payload).await?;
    info!("Report workflow completed");
    Ok(Json(result))
}

/// `GET|POST|PUT|DELETE /contacts`: forwards with the method's `action`.
/// Any other method is answered 405 without calling the webhook.
#[instrument(skip(state, body))]
async fn relay_contacts(
    State(state): State<AppState>,
    method: Method,
    body: Bytes,
) -> Result<Json<Value>, RelayError> {
    let action = ContactAction::from_method(&method).ok_or_else(|| {
        RelayError::UnsupportedMethod {
            method: method.to_string(),
        }
    })?;

    // `list` never carries a payload, so its body is not read.
    let payload = match action {
        ContactAction::List => Value::Null,
        _ => parse_body(&body)?,
    };

    let result = state.contacts.forward(&action.wrap(payload)).await?;
    info!("Contacts action `{action}` completed");
    Ok(Json(result))
}

fn parse_body(body: &[u8]) -> Result<Value, RelayError> {
    serde_json::from_slice(body).map_err(|e| {
        warn!("Rejecting malformed request body: {e}");
        RelayError::from(e)
    })
}
