use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::{
    composer::ValidationError,
    feed::UnknownTab,
    image::ImageError,
    post::UnknownReaction,
};

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Post not found: {0}")]
    PostNotFound(String),

    #[error("Unknown tab '{0}'")]
    UnknownTab(String),

    #[error("Unknown reaction '{0}'")]
    UnknownReaction(String),

    #[error(transparent)]
    Image(#[from] ImageError),
}

impl From<UnknownTab> for AppError {
    fn from(err: UnknownTab) -> Self {
        AppError::UnknownTab(err.0)
    }
}

impl From<UnknownReaction> for AppError {
    fn from(err: UnknownReaction) -> Self {
        AppError::UnknownReaction(err.0)
    }
}

impl AppError {
    fn status(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_FAILED"),
            AppError::PostNotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            AppError::UnknownTab(_) => (StatusCode::BAD_REQUEST, "UNKNOWN_TAB"),
            AppError::UnknownReaction(_) => (StatusCode::BAD_REQUEST, "UNKNOWN_REACTION"),
            AppError::Image(ImageError::UnsupportedMedia(_)) => {
                (StatusCode::UNSUPPORTED_MEDIA_TYPE, "UNSUPPORTED_MEDIA")
            }
            AppError::Image(ImageError::Empty) => (StatusCode::BAD_REQUEST, "EMPTY_IMAGE"),
            AppError::Image(ImageError::TooLarge(_)) => {
                (StatusCode::PAYLOAD_TOO_LARGE, "IMAGE_TOO_LARGE")
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status();

        let mut error = json!({
            "code": code,
            "message": self.to_string(),
        });
        if let AppError::Validation(err) = &self {
            let violations: Vec<Value> = err
                .violations
                .iter()
                .map(|v| json!({ "code": v.code(), "message": v.to_string() }))
                .collect();
            error["violations"] = Value::Array(violations);
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
