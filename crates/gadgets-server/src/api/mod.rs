mod cart;
mod products;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::Mutex;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use gadgets_catalog::{ProductRepository, ResolveError};
use gadgets_core::AppConfig;
use gadgets_storefront::{InMemoryCart, InMemoryFavorites, PageSettings};

use crate::middleware::{request_id, RequestId};

/// Shared handler state. One cart and one favorites list per process.
pub struct AppState<R> {
    pub repo: Arc<R>,
    pub settings: PageSettings,
    pub page_timeout: Option<Duration>,
    pub cart: Arc<Mutex<InMemoryCart>>,
    pub favorites: Arc<Mutex<InMemoryFavorites>>,
}

// Manual impl so `R` itself need not be `Clone`.
impl<R> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            settings: self.settings.clone(),
            page_timeout: self.page_timeout,
            cart: Arc::clone(&self.cart),
            favorites: Arc::clone(&self.favorites),
        }
    }
}

impl<R> AppState<R> {
    pub fn new(repo: Arc<R>, config: &AppConfig) -> Self {
        Self {
            repo,
            settings: PageSettings::from_config(config),
            page_timeout: config.page_load_timeout_secs.map(Duration::from_secs),
            cart: Arc::new(Mutex::new(InMemoryCart::new())),
            favorites: Arc::new(Mutex::new(InMemoryFavorites::new())),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = status_for_code(&self.error.code);
        (status, Json(self)).into_response()
    }
}

pub(super) fn status_for_code(code: &str) -> StatusCode {
    match code {
        "not_found" | "summary_not_found" | "details_not_found" => StatusCode::NOT_FOUND,
        "bad_request" | "invalid_category" => StatusCode::BAD_REQUEST,
        "details_mismatch" | "fetch_error" => StatusCode::BAD_GATEWAY,
        "page_timeout" => StatusCode::GATEWAY_TIMEOUT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub(super) fn map_resolve_error(request_id: String, error: &ResolveError) -> ApiError {
    tracing::warn!(error = %error, code = error.code(), "product resolution failed");
    ApiError::new(request_id, error.code(), error.user_message())
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-request-id")])
}

pub fn build_app<R: ProductRepository + 'static>(state: AppState<R>) -> Router {
    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/featured", get(products::list_featured::<R>))
        .route(
            "/api/v1/products/{category}/{item_id}",
            get(products::get_product_page::<R>),
        )
        .route(
            "/api/v1/products/{category}/{item_id}/variant",
            get(products::get_variant_path::<R>),
        )
        .route("/api/v1/cart", get(cart::get_cart::<R>))
        .route(
            "/api/v1/cart/{item_id}",
            post(cart::toggle_cart::<R>).put(cart::update_quantity::<R>),
        )
        .route("/api/v1/favorites", get(cart::get_favorites::<R>))
        .route(
            "/api/v1/favorites/{item_id}",
            post(cart::toggle_favorite::<R>),
        )
        .layer(
            ServiceBuilder::new()
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(Extension(req_id): Extension<RequestId>) -> impl IntoResponse {
    Json(ApiResponse {
        data: HealthData { status: "ok" },
        meta: ResponseMeta::new(req_id.0),
    })
}
