//! Customer API Handlers

use axum::{Json, extract::State, http::StatusCode};

use crate::core::ServerState;
use crate::customers;
use crate::utils::AppResult;
use shared::models::{Customer, CustomerCreate};

/// POST /api/customers
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CustomerCreate>,
) -> AppResult<(StatusCode, Json<Customer>)> {
    let customer = customers::create_customer(state.pool(), payload).await?;
    Ok((StatusCode::CREATED, Json(customer)))
}
