use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use deepshield_core::{
    client::detect_response::ErrorResponse, pipeline::compare_media_use_case::CompareError,
    shared::media::format_limit,
};
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Both realMedia and fakeMedia files are required")]
    MissingFiles,

    #[error("Files must be less than {limit}")]
    TooLarge { limit: String },

    #[error("{0}")]
    MalformedPayload(String),

    #[error("{0}")]
    Incompatible(String),

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn too_large(limit_bytes: u64) -> Self {
        AppError::TooLarge {
            limit: format_limit(limit_bytes),
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    fn title(&self) -> &'static str {
        match self {
            AppError::MissingFiles => "Missing files",
            AppError::TooLarge { .. } => "File too large",
            AppError::MalformedPayload(_) => "Malformed payload",
            AppError::Incompatible(_) => "Incompatible media",
            AppError::Internal(_) => "Server error",
        }
    }
}

impl From<CompareError> for AppError {
    fn from(e: CompareError) -> Self {
        if e.is_incompatible_input() {
            AppError::Incompatible(e.to_string())
        } else {
            AppError::Internal(e.to_string())
        }
    }
}

impl From<MultipartError> for AppError {
    fn from(e: MultipartError) -> Self {
        AppError::MalformedPayload(e.body_text())
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Internal(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Error processing files: {self}");
        }

        let body = ErrorResponse {
            error: self.title().to_string(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
