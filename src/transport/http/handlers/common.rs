use crate::domain::model::DocumentId;
use crate::transport::http::error::{AppError, LISTING_NOT_FOUND};

/// Path ids that are not well-formed can never name a document, so they are
/// reported exactly like ids that do not exist.
pub fn listing_id(raw: &str) -> Result<DocumentId, AppError> {
    raw.trim()
        .parse::<DocumentId>()
        .map_err(|_| AppError::NotFound(LISTING_NOT_FOUND))
}

pub async fn root_handler() -> &'static str {
    "Welcome to Wanderlust"
}

/// Fallback for every unmatched path.
pub async fn page_not_found_handler() -> AppError {
    AppError::PageNotFound
}
