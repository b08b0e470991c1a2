//! Category API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::catalog::{pricing, service};
use crate::core::ServerState;
use crate::utils::AppResult;
use shared::models::{AveragePrice, Category, CategoryCreate};

/// POST /api/categories
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CategoryCreate>,
) -> AppResult<(StatusCode, Json<Category>)> {
    let category = service::create_category(state.pool(), payload).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// GET /api/categories/{id}/average-price
///
/// Mean price over the category and all its descendants; `null` when the
/// subtree has no products.
pub async fn average_price(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<AveragePrice>> {
    let average_price = pricing::average_price(state.pool(), id).await?;
    Ok(Json(AveragePrice { average_price }))
}
