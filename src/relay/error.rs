#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RelayError {
    #[error("{key} not configured")]
    NotConfigured { key: &'static str },

    /// The webhook answered with a non-2xx status.
    #[error("{origin} returned {status}")]
    UpstreamStatus {
        origin: &'static str,
        status: u16,
        detail: String,
    },

    /// The webhook answered 2xx with a body that is not JSON.
    #[error("Invalid JSON from webhook")]
    InvalidJson { detail: String },

    #[error("Malformed request body: {0}")]
    MalformedBody(#[from] serde_json::Error),

    #[error("HTTP request failed: {0}")]
    RequestFailed(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Method {method} is not supported")]
    UnsupportedMethod { method: String },
}

impl From<wreq::Error> for RelayError {
    fn from(e: wreq::Error) -> Self {
        RelayError::RequestFailed(Box::new(e))
    }
}
