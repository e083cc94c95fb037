use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Serialize;

use gadgets_catalog::{resolve_path, ProductRepository, VariantChange};
use gadgets_core::ProductSummary;
use gadgets_storefront::{PageController, PageView};

use crate::middleware::RequestId;

use super::{map_resolve_error, status_for_code, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct VariantTarget {
    path: String,
}

/// Renders the product page for `/{category}/{item_id}`.
///
/// An errored page is still returned as a page view so clients can show the
/// error panel and recommendations; the status code carries the failure.
pub(super) async fn get_product_page<R: ProductRepository + 'static>(
    State(state): State<AppState<R>>,
    Extension(req_id): Extension<RequestId>,
    Path((category, item_id)): Path<(String, String)>,
) -> Result<(StatusCode, Json<ApiResponse<PageView>>), ApiError> {
    let mut page = PageController::new(Arc::clone(&state.repo), state.settings.clone());
    page.navigate(&format!("/{category}/{item_id}"));

    let phase = match state.page_timeout {
        Some(limit) => tokio::time::timeout(limit, page.settle())
            .await
            .map_err(|_| {
                tracing::warn!(
                    %category,
                    %item_id,
                    timeout_ms = u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
                    "product page did not settle in time"
                );
                ApiError::new(req_id.0.clone(), "page_timeout", "Product page timed out")
            })?,
        None => page.settle().await,
    };
    tracing::debug!(%category, %item_id, ?phase, "product page settled");

    let view = {
        let cart = state.cart.lock().await;
        let favorites = state.favorites.lock().await;
        page.view(&*cart, &*favorites)
    };

    let status = match &view {
        PageView::Errored { code, .. } => status_for_code(code),
        _ => StatusCode::OK,
    };

    Ok((
        status,
        Json(ApiResponse {
            data: view,
            meta: ResponseMeta::new(req_id.0),
        }),
    ))
}

/// Returns the canonical path of a sibling variant. The target is not
/// checked for existence; following it resolves it.
pub(super) async fn get_variant_path<R: ProductRepository + 'static>(
    State(state): State<AppState<R>>,
    Extension(req_id): Extension<RequestId>,
    Path((category, item_id)): Path<(String, String)>,
    Query(change): Query<VariantChange>,
) -> Result<Json<ApiResponse<VariantTarget>>, ApiError> {
    let resolved = resolve_path(state.repo.as_ref(), &format!("/{category}/{item_id}"))
        .await
        .map_err(|e| map_resolve_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: VariantTarget {
            path: resolved.sibling_path(&change),
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn list_featured<R: ProductRepository + 'static>(
    State(state): State<AppState<R>>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<Vec<ProductSummary>>>, ApiError> {
    let products = state.repo.fetch_featured().await.map_err(|e| {
        tracing::warn!(error = %e, "Could not fetch shuffled products");
        ApiError::new(req_id.0.clone(), "fetch_error", "Could not fetch shuffled products")
    })?;

    Ok(Json(ApiResponse {
        data: products,
        meta: ResponseMeta::new(req_id.0),
    }))
}
