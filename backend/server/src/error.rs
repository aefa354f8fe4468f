use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::html::error_page;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} is not configured")]
    Missing(String),

    #[error("Invalid {key} value: {reason}")]
    Invalid { key: String, reason: String },

    #[error("Invalid country pattern: {0}")]
    Pattern(#[from] regex::Error),
}

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("CSV source unreachable: {0}")]
    Unreachable(#[from] reqwest::Error),

    #[error("CSV source answered with HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("Could not read CSV file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV header is missing the required column {0:?}")]
    MissingColumn(&'static str),

    #[error("Line {line}: {column} value {value:?} is not a valid coordinate")]
    InvalidCoordinate {
        line: u64,
        column: &'static str,
        value: String,
    },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Malformed payload")]
    MalformedPayload,

    #[error("Password required")]
    Locked,

    #[error("Address data unavailable: {0}")]
    DataUnavailable(#[from] LoadError),

    #[error("Internal error: {0}")]
    InternalError(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::MalformedPayload => StatusCode::BAD_REQUEST,
            AppError::Locked => StatusCode::UNAUTHORIZED,
            AppError::DataUnavailable(_) => StatusCode::BAD_GATEWAY,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}

/// Page-level failures render as HTML instead of plain text.
pub struct PageError(pub AppError);

impl From<AppError> for PageError {
    fn from(error: AppError) -> Self {
        Self(error)
    }
}

impl From<LoadError> for PageError {
    fn from(error: LoadError) -> Self {
        Self(AppError::DataUnavailable(error))
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        (self.0.status(), Html(error_page(&self.0.to_string()))).into_response()
    }
}
