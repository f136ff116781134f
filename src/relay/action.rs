//! Contact operations multiplexed onto the single contacts webhook.

use std::fmt;

use axum::http::Method;
use serde_json::Map;
use serde_json::Value;

/// Operation requested from the contacts webhook, carried as `action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactAction {
    List,
    Add,
    Update,
    Delete,
}

impl ContactAction {
    pub fn from_method(method: &Method) -> Option<Self> {
        match *method {
            Method::GET => Some(ContactAction::List),
            Method::POST => Some(ContactAction::Add),
            Method::PUT => Some(ContactAction::Update),
            Method::DELETE => Some(ContactAction::Delete),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContactAction::List => "list",
            ContactAction::Add => "add",
            ContactAction::Update => "update",
            ContactAction::Delete => "delete",
        }
    }

    /// Builds `{ "action": <self>, ...body }`.
    ///
    /// Only object bodies contribute fields. The method-derived action always
    /// wins over an `action` key sent by the caller.
    pub fn wrap(self, body: Value) -> Value {
        let mut envelope = Map::new();
        if let Value::Object(fields) = body {
            envelope.extend(fields);
        }
        envelope.insert("action".to_string(), Value::from(self.as_str()));
        Value::Object(envelope)
    }
}

impl fmt::Display for ContactAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
