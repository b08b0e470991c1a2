//! Order API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::core::ServerState;
use crate::orders;
use crate::utils::AppResult;
use shared::models::{Order, OrderCreate};

/// POST /api/orders
///
/// Responds once the order is committed. Notifications run afterwards on a
/// background task and cannot change the response.
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<(StatusCode, Json<Order>)> {
    let placed = orders::place_order(state.pool(), payload).await?;
    let order = placed.order.clone();

    state.notifier.dispatch(placed);

    Ok((StatusCode::CREATED, Json(order)))
}

/// GET /api/orders/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Order>> {
    let order = orders::find_order(state.pool(), id).await?;
    Ok(Json(order))
}
