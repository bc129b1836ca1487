use crate::transport::http::types::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::warn;

/// 200 when the store answers a ping, 503 otherwise.
pub async fn healthcheck_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.ping().await {
        Ok(()) => (StatusCode::OK, "ok"),
        Err(e) => {
            warn!(error = %e, "store ping failed");
            (StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
        }
    }
}
