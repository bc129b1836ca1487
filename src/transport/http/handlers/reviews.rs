use crate::domain::model::{validate_review, DocumentId};
use crate::transport::http::error::{AppError, LISTING_NOT_FOUND};
use crate::transport::http::form::FormPayload;
use crate::transport::http::handlers::common::listing_id;
use crate::transport::http::types::AppState;
use axum::extract::{Path, State};
use axum::response::Redirect;
use tracing::info;

pub async fn create_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    FormPayload(payload): FormPayload,
) -> Result<Redirect, AppError> {
    let input = validate_review(&payload)?;
    let id = listing_id(&id)?;
    let review = state
        .store
        .add_review(&id, input)
        .await?
        .ok_or(AppError::NotFound(LISTING_NOT_FOUND))?;
    info!(listing = %id, review = %review.id, rating = review.rating, "review added");
    Ok(Redirect::to(&format!("/listings/{}", id)))
}

/// Detach and delete. Unknown or malformed ids are a no-op.
pub async fn destroy_handler(
    State(state): State<AppState>,
    Path((id, review_id)): Path<(String, String)>,
) -> Result<Redirect, AppError> {
    let Ok(id) = listing_id(&id) else {
        return Ok(Redirect::to("/listings"));
    };
    if let Ok(review_id) = review_id.trim().parse::<DocumentId>() {
        state.store.remove_review(&id, &review_id).await?;
        info!(listing = %id, review = %review_id, "review removed");
    }
    Ok(Redirect::to(&format!("/listings/{}", id)))
}
