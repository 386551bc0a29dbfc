//! Product image HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::image::{AddImageInput, ImageService};
use crate::AppState;
use shared::models::ProductImage;

/// List the images of a product
pub async fn list_images(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> AppResult<Json<Vec<ProductImage>>> {
    let service = ImageService::new(state.db);
    let images = service.list_images(product_id).await?;
    Ok(Json(images))
}

/// Attach an image to a product
pub async fn add_image(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
    Json(input): Json<AddImageInput>,
) -> AppResult<(StatusCode, Json<ProductImage>)> {
    let service = ImageService::new(state.db);
    let image = service.add_image(product_id, input).await?;
    Ok((StatusCode::CREATED, Json(image)))
}

/// Make an image the product's main image
pub async fn set_main_image(
    State(state): State<AppState>,
    Path((product_id, image_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<ProductImage>> {
    let service = ImageService::new(state.db);
    let image = service.set_main_image(product_id, image_id).await?;
    Ok(Json(image))
}

/// Delete an image
pub async fn delete_image(
    State(state): State<AppState>,
    Path((product_id, image_id)): Path<(Uuid, Uuid)>,
) -> AppResult<StatusCode> {
    let service = ImageService::new(state.db);
    service.delete_image(product_id, image_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
