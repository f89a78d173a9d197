// src/error.rs
use std::path::PathBuf;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

pub const INVALID_BODY: &str = "Invalid JSON body";
pub const MISSING_MESSAGE: &str = "Message field is required";
pub const UPSTREAM_FAILURE: &str = "Failed to retrieve response from AI service.";
pub const INTERNAL_FAILURE: &str = "Internal server error";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(&'static str),
    #[error("upstream webhook failed: {0}")]
    Upstream(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Upstream(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to the caller. Server-side detail never leaves the process.
    pub fn public_message(&self) -> &'static str {
        match self {
            AppError::BadRequest(msg) => *msg,
            AppError::Upstream(_) => UPSTREAM_FAILURE,
            AppError::Internal(_) => INTERNAL_FAILURE,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::BadRequest(msg) => tracing::warn!("rejected chat request: {}", msg),
            AppError::Upstream(_) | AppError::Internal(_) => tracing::error!("{}", self),
        }
        (self.status(), Json(json!({ "error": self.public_message() }))).into_response()
    }
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Image not found: {}", .0.display())]
    MissingInput(PathBuf),
    #[error("could not decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("error writing file: {0}")]
    Write(#[from] std::io::Error),
    #[error("could not serialize points: {0}")]
    Serialize(#[from] serde_json::Error),
}
