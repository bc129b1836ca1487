use crate::storage::DocumentStore;
use axum::http::Method;
use serde::Deserialize;
use std::sync::Arc;

/// Shared handler state. The store is created once at startup and injected here.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }
}

/// `?_method=PUT` on a form `POST`.
#[derive(Deserialize, Debug, Default)]
pub struct MethodOverride {
    #[serde(rename = "_method", default)]
    pub method: Option<String>,
}

impl MethodOverride {
    /// The method the request should be dispatched as, if an override applies.
    pub fn target(&self) -> Option<Method> {
        match self.method.as_deref()?.trim().to_ascii_uppercase().as_str() {
            "PUT" => Some(Method::PUT),
            "PATCH" => Some(Method::PATCH),
            "DELETE" => Some(Method::DELETE),
            _ => None,
        }
    }
}
