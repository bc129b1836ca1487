use crate::domain::model::validate_listing;
use crate::transport::http::error::{AppError, LISTING_NOT_FOUND};
use crate::transport::http::form::FormPayload;
use crate::transport::http::handlers::common::listing_id;
use crate::transport::http::types::AppState;
use crate::transport::http::views;
use axum::extract::{Path, State};
use axum::response::{Html, Redirect};
use tracing::{debug, info};

pub async fn index_handler(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let listings = state.store.list_listings().await?;
    Ok(Html(views::index_page(&listings)))
}

pub async fn new_form_handler() -> Html<String> {
    Html(views::new_page())
}

pub async fn create_handler(
    State(state): State<AppState>,
    FormPayload(payload): FormPayload,
) -> Result<Redirect, AppError> {
    let input = validate_listing(&payload)?;
    let listing = state.store.insert_listing(input).await?;
    info!(listing = %listing.id, title = %listing.title, "listing created");
    Ok(Redirect::to("/listings"))
}

pub async fn show_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let id = listing_id(&id)?;
    let detail = state
        .store
        .find_listing_detail(&id)
        .await?
        .ok_or(AppError::NotFound(LISTING_NOT_FOUND))?;
    debug!(listing = %id, reviews = detail.reviews.len(), "listing with reviews");
    Ok(Html(views::show_page(&detail)))
}

pub async fn edit_form_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let id = listing_id(&id)?;
    let listing = state
        .store
        .find_listing(&id)
        .await?
        .ok_or(AppError::NotFound(LISTING_NOT_FOUND))?;
    Ok(Html(views::edit_page(&listing)))
}

/// The payload is validated before the id is looked at.
pub async fn update_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    FormPayload(payload): FormPayload,
) -> Result<Redirect, AppError> {
    let input = validate_listing(&payload)?;
    let id = listing_id(&id)?;
    let listing = state
        .store
        .update_listing(&id, input)
        .await?
        .ok_or(AppError::NotFound(LISTING_NOT_FOUND))?;
    info!(listing = %listing.id, title = %listing.title, "listing updated");
    Ok(Redirect::to(&format!("/listings/{}", listing.id)))
}

/// Deleting something that is already gone still redirects to the index.
pub async fn destroy_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    let Ok(id) = listing_id(&id) else {
        return Ok(Redirect::to("/listings"));
    };
    match state.store.delete_listing(&id).await? {
        Some(deleted) => info!(
            listing = %deleted.id,
            reviews = deleted.reviews.len(),
            "listing deleted"
        ),
        None => debug!(listing = %id, "delete requested for missing listing"),
    }
    Ok(Redirect::to("/listings"))
}
