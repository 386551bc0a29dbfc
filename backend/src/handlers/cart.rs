//! Cart HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::cart::{AddToCartInput, Cart, CartService};
use crate::AppState;

/// Get the current user's cart
pub async fn get_cart(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Cart>> {
    let service = CartService::new(state.db);
    let cart = service.get_cart(current_user.0.user_id).await?;
    Ok(Json(cart))
}

/// Add a product to the cart
pub async fn add_to_cart(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(product_id): Path<Uuid>,
    Json(input): Json<AddToCartInput>,
) -> AppResult<Json<Cart>> {
    let service = CartService::new(state.db);
    let cart = service
        .add_to_cart(current_user.0.user_id, product_id, input)
        .await?;
    Ok(Json(cart))
}

/// Remove a product from the cart
pub async fn remove_from_cart(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(product_id): Path<Uuid>,
) -> AppResult<Json<Cart>> {
    let service = CartService::new(state.db);
    let cart = service
        .remove_from_cart(current_user.0.user_id, product_id)
        .await?;
    Ok(Json(cart))
}

/// Empty the cart
pub async fn clear_cart(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<StatusCode> {
    let service = CartService::new(state.db);
    service.clear_cart(current_user.0.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
