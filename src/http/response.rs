//! Mapping of bridge outcomes onto HTTP responses.
//!
//! # Responsibilities
//! - Encode session failures as `{"error": <message>}` JSON bodies
//! - Pick the status code per failure kind (busy vs. backend failure)

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::bridge::BridgeError;

/// JSON body for every failure response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl BridgeError {
    /// Status code this failure maps to on the wire.
    pub fn status_code(&self) -> StatusCode {
        match self {
            BridgeError::Busy => StatusCode::SERVICE_UNAVAILABLE,
            BridgeError::Session(_) => StatusCode::BAD_GATEWAY,
            BridgeError::Dropped => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for BridgeError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionError;

    #[test]
    fn busy_maps_to_service_unavailable() {
        assert_eq!(BridgeError::Busy.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn session_failures_map_to_bad_gateway() {
        for err in [
            SessionError::Connect("refused".into()),
            SessionError::Greeting("WELCOME".into()),
            SessionError::Closed,
            SessionError::Timeout,
        ] {
            assert_eq!(
                BridgeError::Session(err).status_code(),
                StatusCode::BAD_GATEWAY
            );
        }
    }

    #[test]
    fn error_body_carries_the_message() {
        let err = BridgeError::Session(SessionError::Timeout);
        let body = serde_json::to_value(ErrorBody {
            error: err.to_string(),
        })
        .unwrap();
        assert_eq!(body["error"], "mpd session timed out");
    }
}
