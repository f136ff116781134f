//! Environment-driven configuration.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::AppError;

pub const WORKFLOW_WEBHOOK_KEY: &str = "N8N_WEBHOOK_URL";
pub const CONTACTS_WEBHOOK_KEY: &str = "N8N_CONTACTS_WEBHOOK_URL";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_WORKFLOW_TIMEOUT_SECS: u64 = 60;
const DEFAULT_CONTACTS_TIMEOUT_SECS: u64 = 30;
const DEFAULT_DETAIL_LIMIT: usize = 500;

/// One outbound webhook as read from the environment.
#[derive(Clone, Debug)]
pub struct WebhookConfig {
    /// Name of the environment variable the URL came from.
    pub key: &'static str,
    /// Sanitized URL, `None` when unset or blank.
    pub url: Option<String>,
    pub timeout: Duration,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub logs_path: PathBuf,
    pub workflow: WebhookConfig,
    pub contacts: WebhookConfig,
    /// Maximum number of characters of an upstream body echoed back in errors.
    pub detail_limit: usize,
}

impl Config {
    /// Loads configuration from the process environment.
    pub fn load() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr: SocketAddr =
            parse_or(&lookup, "BIND_ADDR", DEFAULT_BIND_ADDR.parse().ok())?;
        let logs_path = lookup("LOGS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("logs"));

        let workflow_timeout = parse_or(
            &lookup,
            "WORKFLOW_TIMEOUT_SECS",
            Some(DEFAULT_WORKFLOW_TIMEOUT_SECS),
        )?;
        let contacts_timeout = parse_or(
            &lookup,
            "CONTACTS_TIMEOUT_SECS",
            Some(DEFAULT_CONTACTS_TIMEOUT_SECS),
        )?;
        let detail_limit = parse_or(&lookup, "RELAY_DETAIL_LIMIT", Some(DEFAULT_DETAIL_LIMIT))?;

        Ok(Self {
            bind_addr,
            logs_path,
            workflow: WebhookConfig {
                key: WORKFLOW_WEBHOOK_KEY,
                url: lookup(WORKFLOW_WEBHOOK_KEY)
                    .and_then(|raw| sanitize_endpoint(WORKFLOW_WEBHOOK_KEY, &raw)),
                timeout: Duration::from_secs(workflow_timeout),
            },
            contacts: WebhookConfig {
                key: CONTACTS_WEBHOOK_KEY,
                url: lookup(CONTACTS_WEBHOOK_KEY)
                    .and_then(|raw| sanitize_endpoint(CONTACTS_WEBHOOK_KEY, &raw)),
                timeout: Duration::from_secs(contacts_timeout),
            },
            detail_limit,
        })
    }
}

/// Normalizes a configured endpoint value.
///
/// Some hosting platforms inject the variable as `KEY=value`, so a single leading
/// `"<key>="` is stripped before trimming. Only the exact key is recognized.
/// Returns `None` when nothing usable remains.
pub fn sanitize_endpoint(key: &str, raw: &str) -> Option<String> {
    let prefix = format!("{key}=");
    let value = raw
        .trim_start()
        .strip_prefix(prefix.as_str())
        .unwrap_or(raw)
        .trim();

    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: Option<T>) -> Result<T, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key).filter(|v| !v.trim().is_empty()) {
        Some(value) => value.trim().parse::<T>().map_err(|_| AppError::InvalidConfig {
            key: key.to_string(),
            value,
        }),
        None => default.ok_or_else(|| AppError::ConfigurationError {
            msg: format!("Missing config with key \"{key}\""),
        }),
    }
}
