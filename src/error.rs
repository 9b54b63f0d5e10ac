//! Error type for the JSON API.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::analysis::AnalysisError;

/// Errors surfaced by API handlers.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Analysis failed.
    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    /// The body was not valid JSON for the endpoint.
    #[error("{}", .0.body_text())]
    InvalidBody(#[from] JsonRejection),

    /// The request was well-formed JSON but semantically invalid.
    #[error("{0}")]
    Validation(String),
}

impl AppError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Analysis(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            Self::Analysis(_) => StatusCode::BAD_GATEWAY,
            Self::InvalidBody(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                StatusCode::PAYLOAD_TOO_LARGE
            }
            Self::InvalidBody(_) | Self::Validation(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Message safe to show to callers. Backend details stay in the logs.
    #[must_use]
    pub fn client_message(&self) -> String {
        match self {
            Self::Analysis(AnalysisError::Transport(_)) => {
                "El servicio de análisis no está disponible".to_string()
            }
            Self::Analysis(AnalysisError::BackendStatus { .. } | AnalysisError::Decode(_)) => {
                "El servicio de análisis respondió con un error".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "API request failed");
        } else {
            tracing::debug!(error = %self, "API request rejected");
        }
        let body = json!({
            "status": "error",
            "message": self.client_message(),
        });
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let invalid = AppError::from(AnalysisError::InvalidImage("x".to_string()));
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);

        let backend = AppError::from(AnalysisError::Transport("refused".to_string()));
        assert_eq!(backend.status(), StatusCode::BAD_GATEWAY);

        let validation = AppError::Validation("empty".to_string());
        assert_eq!(validation.status(), StatusCode::BAD_REQUEST);
        assert_eq!(validation.to_string(), "empty");
    }

    #[test]
    fn test_backend_details_are_not_exposed() {
        let status = AppError::from(AnalysisError::BackendStatus {
            status: 500,
            body: "Traceback: /srv/model.py".to_string(),
        });
        assert!(!status.client_message().contains("Traceback"));

        let transport = AppError::from(AnalysisError::Transport("10.0.0.7:8000 refused".to_string()));
        assert!(!transport.client_message().contains("10.0.0.7"));

        let rejected = AppError::from(AnalysisError::Rejected("no face found".to_string()));
        assert!(rejected.client_message().contains("no face found"));

        let invalid = AppError::from(AnalysisError::InvalidImage("invalid base64".to_string()));
        assert_eq!(invalid.client_message(), invalid.to_string());
    }
}
