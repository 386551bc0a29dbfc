//! Stock movement HTTP handlers

use axum::{extract::State, http::StatusCode, Json};

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::stock::{
    MovementRecorded, MovementWithProduct, RecordMovementInput, StockService,
};
use crate::AppState;

/// List all stock movements, newest first
pub async fn list_movements(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<MovementWithProduct>>> {
    let service = StockService::new(state.db);
    let movements = service.list_movements().await?;
    Ok(Json(movements))
}

/// Record a stock movement and apply it to the product
pub async fn record_movement(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<RecordMovementInput>,
) -> AppResult<(StatusCode, Json<MovementRecorded>)> {
    let service = StockService::new(state.db);
    let recorded = service.record_movement(current_user.0.user_id, input).await?;
    Ok((StatusCode::CREATED, Json(recorded)))
}
