//! Category management HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::category::{
    CategoryDetail, CategoryService, CreateCategoryInput, UpdateCategoryInput,
};
use crate::AppState;
use shared::models::Category;

/// List all categories
pub async fn list_categories(State(state): State<AppState>) -> AppResult<Json<Vec<Category>>> {
    let service = CategoryService::new(state.db);
    let categories = service.list_categories().await?;
    Ok(Json(categories))
}

/// Get a category with its full path and subcategories
pub async fn get_category(
    State(state): State<AppState>,
    Path(category_id): Path<Uuid>,
) -> AppResult<Json<CategoryDetail>> {
    let service = CategoryService::new(state.db);
    let category = service.get_category(category_id).await?;
    Ok(Json(category))
}

/// Create a new category
pub async fn create_category(
    State(state): State<AppState>,
    Json(input): Json<CreateCategoryInput>,
) -> AppResult<(StatusCode, Json<CategoryDetail>)> {
    let service = CategoryService::new(state.db);
    let category = service.create_category(input).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// Update a category
pub async fn update_category(
    State(state): State<AppState>,
    Path(category_id): Path<Uuid>,
    Json(input): Json<UpdateCategoryInput>,
) -> AppResult<Json<CategoryDetail>> {
    let service = CategoryService::new(state.db);
    let category = service.update_category(category_id, input).await?;
    Ok(Json(category))
}

/// Delete a category
pub async fn delete_category(
    State(state): State<AppState>,
    Path(category_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    let service = CategoryService::new(state.db);
    service.delete_category(category_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
