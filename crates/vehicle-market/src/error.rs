use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::listing::SubmissionError;
use crate::workflows::moderation::ModerationError;
use crate::workflows::photos::PhotoError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Photo(PhotoError),
    Submission(SubmissionError),
    Moderation(ModerationError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Photo(err) => write!(f, "photo intake error: {}", err),
            AppError::Submission(err) => write!(f, "listing submission error: {}", err),
            AppError::Moderation(err) => write!(f, "moderation error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Photo(err) => Some(err),
            AppError::Submission(err) => Some(err),
            AppError::Moderation(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Photo(_) | AppError::Submission(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Moderation(err) => err.status_code(),
            AppError::Config(_) | AppError::Telemetry(_) | AppError::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<PhotoError> for AppError {
    fn from(value: PhotoError) -> Self {
        Self::Photo(value)
    }
}

impl From<SubmissionError> for AppError {
    fn from(value: SubmissionError) -> Self {
        Self::Submission(value)
    }
}

impl From<ModerationError> for AppError {
    fn from(value: ModerationError) -> Self {
        Self::Moderation(value)
    }
}
