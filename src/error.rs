use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("TTS backend returned {status}")]
    Upstream { status: u16, body: String },

    #[error("Audio payload too small ({size} bytes)")]
    InvalidAudio { size: usize, lang: String },

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
}

impl ErrorResponse {
    fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: None,
            status: None,
            details: None,
            size: None,
            lang: None,
        }
    }

    fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorResponse::new(msg.clone())),
            AppError::Upstream { status, body } => (
                // Non-2xx codes from the backend are passed through as-is
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY),
                ErrorResponse {
                    status: Some(*status),
                    details: Some(body.clone()),
                    ..ErrorResponse::new("TTS service error")
                },
            ),
            AppError::InvalidAudio { size, lang } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorResponse {
                    size: Some(*size),
                    lang: Some(lang.clone()),
                    ..ErrorResponse::new("Invalid audio response")
                        .with_message("The audio file is too small")
                },
            ),
            AppError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                ErrorResponse::new("Method not allowed"),
            ),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new("Internal server error").with_message(msg.clone()),
            ),
            AppError::HttpError(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new("Internal server error").with_message(e.to_string()),
            ),
            AppError::JsonError(e) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("Invalid JSON body").with_message(e.to_string()),
            ),
        };

        tracing::error!("Request failed: {} - {}", status, self);

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn render(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn upstream_status_is_passed_through() {
        let (status, body) = render(AppError::Upstream {
            status: 503,
            body: "overloaded".into(),
        })
        .await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"], "TTS service error");
        assert_eq!(body["status"], 503);
        assert_eq!(body["details"], "overloaded");
    }

    #[tokio::test]
    async fn invalid_audio_reports_size() {
        let (status, body) = render(AppError::InvalidAudio {
            size: 12,
            lang: "ja".into(),
        })
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["size"], 12);
        assert_eq!(body["lang"], "ja");
        assert!(body["message"].is_string());
    }

    #[tokio::test]
    async fn bad_request_has_only_error_field() {
        let (status, body) = render(AppError::BadRequest("Missing text".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, serde_json::json!({ "error": "Missing text" }));
    }
}
