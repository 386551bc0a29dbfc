//! Product management HTTP handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::product::{
    CreateProductInput, ProductDetail, ProductQuery, ProductService, ProductSummary,
    UpdateProductInput,
};
use crate::services::stock::StockService;
use crate::AppState;
use shared::models::StockMovement;

/// List products with optional search and category filter
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> AppResult<Json<Vec<ProductSummary>>> {
    let service = ProductService::new(state.db);
    let products = service.list_products(&query).await?;
    Ok(Json(products))
}

/// List products with stock warnings (low or negative stock)
pub async fn list_product_warnings(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> AppResult<Json<Vec<ProductSummary>>> {
    let service = ProductService::new(state.db);
    let products = service.list_warnings(&query).await?;
    Ok(Json(products))
}

/// Get a product with images and recent movements
pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> AppResult<Json<ProductDetail>> {
    let service = ProductService::new(state.db);
    let product = service.get_product(product_id).await?;
    Ok(Json(product))
}

/// Create a new product
pub async fn create_product(
    State(state): State<AppState>,
    Json(input): Json<CreateProductInput>,
) -> AppResult<(StatusCode, Json<ProductSummary>)> {
    let service = ProductService::new(state.db);
    let product = service.create_product(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Update a product
pub async fn update_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
    Json(input): Json<UpdateProductInput>,
) -> AppResult<Json<ProductSummary>> {
    let service = ProductService::new(state.db);
    let product = service.update_product(product_id, input).await?;
    Ok(Json(product))
}

/// Delete a product
pub async fn delete_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    let service = ProductService::new(state.db);
    service.delete_product(product_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List every stock movement of a product
pub async fn get_product_movements(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> AppResult<Json<Vec<StockMovement>>> {
    let service = StockService::new(state.db);
    let movements = service.list_product_movements(product_id).await?;
    Ok(Json(movements))
}
