mod catalog;
mod categories;
mod respond;

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use catalogd_db::{CatalogStore, StoreError};

use crate::middleware::request_id;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CatalogStore>,
}

/// Handler-level failure: the status code plus the message placed in the
/// `{"error": message}` envelope.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        respond::error(self.status, &self.message)
    }
}

/// Map a storage failure onto the wire taxonomy.
///
/// Lookup and validation outcomes keep their own message; anything else is
/// logged and collapses into a generic 500 so persistence details stay out
/// of responses.
pub(super) fn map_store_error(error: &StoreError) -> ApiError {
    match error {
        StoreError::NotFound => ApiError::not_found(error.to_string()),
        StoreError::InvalidCategory => ApiError::invalid_input(error.to_string()),
        _ => {
            tracing::error!(error = %error, "catalog store operation failed");
            ApiError::internal("storage failure")
        }
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/catalog", get(catalog::list_products))
        .route("/catalog/{code}", get(catalog::get_product))
        .route(
            "/categories",
            get(categories::list_categories).post(categories::create_category),
        )
        .route("/health", get(health))
        // Trace stays outermost: Cors requires the wrapped service's body to
        // implement Default, which Trace's classified body does not.
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct HealthData {
    status: &'static str,
    store: &'static str,
}

async fn health(State(state): State<AppState>) -> Response {
    match state.store.connect().await {
        Ok(()) => respond::ok(&HealthData {
            status: "ok",
            store: "ok",
        }),
        Err(e) => {
            tracing::warn!(error = %e, "health check: store unavailable");
            respond::error(StatusCode::SERVICE_UNAVAILABLE, "store unavailable")
        }
    }
}
