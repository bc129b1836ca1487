//! The single failure type returned by every handler.
//!
//! Each variant resolves to a status code and a message, and is rendered
//! through the error page. Store and driver failures collapse into
//! `Internal`; their details are logged, never shown.

use super::views;
use crate::domain::model::ValidationErrors;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;
use tracing::{error, warn};

pub const LISTING_NOT_FOUND: &str = "Listing not found";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    #[error("{0}")]
    NotFound(&'static str),

    #[error("Page not found")]
    PageNotFound,

    #[error("Something went wrong")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) | AppError::PageNotFound => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            AppError::Internal(source) => error!(error = ?source, "request failed"),
            other => warn!(status = status.as_u16(), message = %other, "request rejected"),
        }

        (status, Html(views::error_page(status, &self.to_string()))).into_response()
    }
}
