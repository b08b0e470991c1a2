//! Product API Handlers

use axum::{Json, extract::State, http::StatusCode};

use crate::catalog::service;
use crate::core::ServerState;
use crate::utils::AppResult;
use shared::models::{Product, ProductCreate};

/// POST /api/products - rejects duplicate names
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ProductCreate>,
) -> AppResult<(StatusCode, Json<Product>)> {
    let product = service::create_product(state.pool(), payload).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// POST /api/products/upload - single product upload, no duplicate check
pub async fn upload(
    State(state): State<ServerState>,
    Json(payload): Json<ProductCreate>,
) -> AppResult<(StatusCode, Json<Product>)> {
    let product = service::upload_product(state.pool(), payload).await?;
    Ok((StatusCode::CREATED, Json(product)))
}
