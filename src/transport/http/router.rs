use crate::transport::http::handlers::{common, health, listings, reviews};
use crate::transport::http::types::{AppState, MethodOverride};
use axum::extract::{Query, Request};
use axum::http::Method;
use axum::routing::{delete, get, post};
use axum::{Router, ServiceExt};
use std::future::Future;
use tokio::net::TcpListener;
use tower::util::{MapRequest, MapRequestLayer};
use tower::Layer;
use tower_http::trace::TraceLayer;
use tracing::debug;

/// The router wrapped in the method override, ready to serve.
type App = MapRequest<Router, fn(Request) -> Request>;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(common::root_handler))
        .route("/health", get(health::healthcheck_handler))
        .route(
            "/listings",
            get(listings::index_handler).post(listings::create_handler),
        )
        .route("/listings/new", get(listings::new_form_handler))
        .route(
            "/listings/:id",
            get(listings::show_handler)
                .put(listings::update_handler)
                .delete(listings::destroy_handler),
        )
        .route("/listings/:id/edit", get(listings::edit_form_handler))
        .route("/listings/:id/reviews", post(reviews::create_handler))
        .route(
            "/listings/:id/reviews/:review_id",
            delete(reviews::destroy_handler),
        )
        .fallback(common::page_not_found_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

/// Rewrites `POST ...?_method=PUT|PATCH|DELETE` before routing, so that plain
/// HTML forms can reach the update and delete routes.
fn override_method(mut req: Request) -> Request {
    if req.method() != Method::POST {
        return req;
    }
    let target = Query::<MethodOverride>::try_from_uri(req.uri())
        .ok()
        .and_then(|Query(o)| o.target());
    if let Some(method) = target {
        debug!(path = %req.uri().path(), %method, "method override");
        *req.method_mut() = method;
    }
    req
}

/// Method override must wrap the whole router: a layer added with
/// `Router::layer` would only run after the method has been matched.
fn with_method_override(router: Router) -> App {
    MapRequestLayer::new(override_method as fn(Request) -> Request).layer(router)
}

/// Serves `router` on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, router: Router, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = with_method_override(router);
    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown)
        .await
}
