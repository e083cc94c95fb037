use axum::{
    extract::{Path, State},
    Extension, Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use gadgets_catalog::ProductRepository;
use gadgets_core::ProductSummary;
use gadgets_storefront::{Cart, CartItem, Favorites, InMemoryCart};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct CartData {
    items: Vec<CartItem>,
    total_quantity: u32,
    total_price: Decimal,
}

impl CartData {
    fn from_cart(cart: &InMemoryCart) -> Self {
        Self {
            items: cart.items().to_vec(),
            total_quantity: cart.total_quantity(),
            total_price: cart.total_price(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct CartToggled {
    item_id: String,
    in_cart: bool,
    cart: CartData,
}

#[derive(Debug, Deserialize)]
pub(super) struct QuantityUpdate {
    quantity: u32,
}

#[derive(Debug, Serialize)]
pub(super) struct FavoritesToggled {
    item_id: String,
    favorited: bool,
    favorites: Vec<ProductSummary>,
}

async fn find_summary<R: ProductRepository>(
    repo: &R,
    request_id: &str,
    item_id: &str,
) -> Result<ProductSummary, ApiError> {
    let summaries = repo.fetch_summaries().await.map_err(|e| {
        tracing::warn!(error = %e, "failed to fetch product summaries");
        ApiError::new(request_id, "fetch_error", "Error fetching products")
    })?;

    summaries
        .into_iter()
        .find(|s| s.item_id == item_id)
        .ok_or_else(|| ApiError::new(request_id, "not_found", format!("product {item_id} not found")))
}

pub(super) async fn get_cart<R: ProductRepository + 'static>(
    State(state): State<AppState<R>>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<CartData>> {
    let data = CartData::from_cart(&*state.cart.lock().await);
    Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    })
}

/// Adds the product to the cart, or removes it if already there.
pub(super) async fn toggle_cart<R: ProductRepository + 'static>(
    State(state): State<AppState<R>>,
    Extension(req_id): Extension<RequestId>,
    Path(item_id): Path<String>,
) -> Result<Json<ApiResponse<CartToggled>>, ApiError> {
    let product = find_summary(state.repo.as_ref(), &req_id.0, &item_id).await?;

    let data = {
        let mut cart = state.cart.lock().await;
        cart.handle_cart(&product);
        CartToggled {
            in_cart: cart.is_in_cart(&product),
            cart: CartData::from_cart(&cart),
            item_id,
        }
    };
    tracing::debug!(item_id = %data.item_id, in_cart = data.in_cart, "cart toggled");

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// Sets the quantity of a product already in the cart. Zero removes it.
pub(super) async fn update_quantity<R: ProductRepository + 'static>(
    State(state): State<AppState<R>>,
    Extension(req_id): Extension<RequestId>,
    Path(item_id): Path<String>,
    Json(update): Json<QuantityUpdate>,
) -> Result<Json<ApiResponse<CartData>>, ApiError> {
    let data = {
        let mut cart = state.cart.lock().await;
        if !cart.set_quantity(&item_id, update.quantity) {
            return Err(ApiError::new(
                req_id.0,
                "not_found",
                format!("product {item_id} is not in the cart"),
            ));
        }
        CartData::from_cart(&cart)
    };
    tracing::debug!(%item_id, quantity = update.quantity, "cart quantity updated");

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn get_favorites<R: ProductRepository + 'static>(
    State(state): State<AppState<R>>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<Vec<ProductSummary>>> {
    let data = state.favorites.lock().await.items().to_vec();
    Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    })
}

pub(super) async fn toggle_favorite<R: ProductRepository + 'static>(
    State(state): State<AppState<R>>,
    Extension(req_id): Extension<RequestId>,
    Path(item_id): Path<String>,
) -> Result<Json<ApiResponse<FavoritesToggled>>, ApiError> {
    let product = find_summary(state.repo.as_ref(), &req_id.0, &item_id).await?;

    let data = {
        let mut favorites = state.favorites.lock().await;
        favorites.handle_favorites(&product);
        FavoritesToggled {
            favorited: favorites.is_in_favorites(&product),
            favorites: favorites.items().to_vec(),
            item_id,
        }
    };

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request, StatusCode};
    use axum::Router;
    use tower::ServiceExt;

    use super::super::build_app;
    use super::super::test_support::{fixture_catalog, send, state};

    #[tokio::test]
    async fn cart_toggle_adds_then_removes() {
        let app = build_app(state(fixture_catalog()));

        let (status, json) = send(
            app.clone(),
            Method::POST,
            "/api/v1/cart/apple-iphone-11-64gb-black",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["in_cart"], true);
        assert_eq!(json["data"]["cart"]["total_quantity"], 1);
        assert_eq!(json["data"]["cart"]["total_price"], "880");

        let (_, json) = send(app.clone(), Method::GET, "/api/v1/cart").await;
        assert_eq!(json["data"]["items"].as_array().map(Vec::len), Some(1));

        let (_, json) = send(
            app.clone(),
            Method::POST,
            "/api/v1/cart/apple-iphone-11-64gb-black",
        )
        .await;
        assert_eq!(json["data"]["in_cart"], false);
        assert_eq!(json["data"]["cart"]["total_quantity"], 0);
    }

    async fn put_quantity(app: Router, item_id: &str, body: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::PUT)
                    .uri(format!("/api/v1/cart/{item_id}"))
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_owned()))
                    .expect("request"),
            )
            .await
            .expect("response");
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        (status, serde_json::from_slice(&body).unwrap_or_default())
    }

    #[tokio::test]
    async fn cart_quantity_updates_totals_and_zero_removes() {
        let app = build_app(state(fixture_catalog()));
        send(
            app.clone(),
            Method::POST,
            "/api/v1/cart/apple-iphone-11-128gb-purple",
        )
        .await;

        let (status, json) =
            put_quantity(app.clone(), "apple-iphone-11-128gb-purple", r#"{"quantity":3}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["total_quantity"], 3);
        assert_eq!(json["data"]["total_price"], "2790");

        let (_, json) =
            put_quantity(app.clone(), "apple-iphone-11-128gb-purple", r#"{"quantity":0}"#).await;
        assert_eq!(json["data"]["items"].as_array().map(Vec::len), Some(0));

        let (status, json) =
            put_quantity(app, "apple-iphone-11-128gb-purple", r#"{"quantity":2}"#).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"]["code"], "not_found");
    }

    #[tokio::test]
    async fn cart_quantity_rejects_malformed_body() {
        let app = build_app(state(fixture_catalog()));
        let (status, _) =
            put_quantity(app, "apple-iphone-11-64gb-black", r#"{"quantity":-1}"#).await;
        assert!(status.is_client_error(), "got {status}");
    }

    #[tokio::test]
    async fn cart_state_shows_on_product_page() {
        let app = build_app(state(fixture_catalog()));
        send(
            app.clone(),
            Method::POST,
            "/api/v1/cart/apple-watch-series-6-44mm-silver",
        )
        .await;
        send(
            app.clone(),
            Method::POST,
            "/api/v1/favorites/apple-watch-series-6-44mm-silver",
        )
        .await;

        let (_, json) = send(
            app,
            Method::GET,
            "/api/v1/products/accessories/apple-watch-series-6-44mm-silver",
        )
        .await;
        assert_eq!(json["data"]["detail"]["cart"]["label"], "Added to cart");
        assert_eq!(json["data"]["detail"]["favorite"], true);
    }

    #[tokio::test]
    async fn favorites_toggle_and_list() {
        let app = build_app(state(fixture_catalog()));

        let (_, json) = send(
            app.clone(),
            Method::POST,
            "/api/v1/favorites/apple-ipad-air-4th-gen-256gb-green",
        )
        .await;
        assert_eq!(json["data"]["favorited"], true);

        let (status, json) = send(app, Method::GET, "/api/v1/favorites").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json["data"][0]["itemId"],
            "apple-ipad-air-4th-gen-256gb-green"
        );
    }

    #[tokio::test]
    async fn unknown_product_is_not_found() {
        let app = build_app(state(fixture_catalog()));
        let (status, json) = send(app, Method::POST, "/api/v1/cart/no-such-item").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"]["code"], "not_found");
    }
}
