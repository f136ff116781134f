//! HTTP error mapping for relay failures.

use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::model::ErrorBody;
use crate::relay::error::RelayError;

/// Message reported for local faults (bad inbound body, transport failures).
pub const LOCAL_FAULT_MESSAGE: &str = "Failed to execute workflow";

impl RelayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RelayError::NotConfigured { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            RelayError::UpstreamStatus { .. } | RelayError::InvalidJson { .. } => {
                StatusCode::BAD_GATEWAY
            }
            RelayError::MalformedBody(_) | RelayError::RequestFailed(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            RelayError::UnsupportedMethod { .. } => StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    pub fn to_body(&self) -> ErrorBody {
        match self {
            RelayError::NotConfigured { .. } | RelayError::UnsupportedMethod { .. } => ErrorBody {
                error: self.to_string(),
                detail: None,
            },
            RelayError::UpstreamStatus { detail, .. } | RelayError::InvalidJson { detail } => {
                ErrorBody {
                    error: self.to_string(),
                    detail: Some(detail.clone()),
                }
            }
            RelayError::MalformedBody(e) => ErrorBody {
                error: LOCAL_FAULT_MESSAGE.to_string(),
                detail: Some(e.to_string()),
            },
            RelayError::RequestFailed(e) => ErrorBody {
                error: LOCAL_FAULT_MESSAGE.to_string(),
                detail: Some(e.to_string()),
            },
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.to_body())).into_response()
    }
}
