#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ClientError {
    /// The relay answered with an error status; `message` is ready for display.
    #[error("{message}")]
    Relay { status: u16, message: String },

    #[error("HTTP request failed: {0}")]
    RequestFailed(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Failed to parse relay response: {0}")]
    JsonParseFailed(#[from] serde_json::Error),
}

impl From<wreq::Error> for ClientError {
    fn from(e: wreq::Error) -> Self {
        ClientError::RequestFailed(Box::new(e))
    }
}
