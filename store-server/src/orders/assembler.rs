//! Order Assembler
//!
//! `place_order` runs as one transaction: header, line resolution, items,
//! final total. Any failure rolls everything back.

use super::{LineDraft, OrderError, resolve_line};
use crate::db::begin_write;
use crate::db::repository::{RepoError, customer, order};
use crate::utils::{AppError, AppResult, ErrorCode};
use crate::utils::money::{self, MoneyError};
use crate::utils::validation::MAX_NOTE_LEN;
use shared::models::{Customer, Order, OrderCreate};
use shared::util::now_millis;
use sqlx::SqlitePool;

/// A committed order and the customer it was placed for
#[derive(Debug, Clone)]
pub struct PlacedOrder {
    pub order: Order,
    pub customer: Option<Customer>,
}

/// Place an order atomically
///
/// The stored total is the sum of the stored item subtotals; both are computed
/// from the same drafts in the same transaction.
pub async fn place_order(pool: &SqlitePool, input: OrderCreate) -> Result<PlacedOrder, OrderError> {
    if input.items.is_empty() {
        return Err(OrderError::Empty);
    }
    let note = input.note.as_deref().map(str::trim).unwrap_or_default();
    if note.chars().count() > MAX_NOTE_LEN {
        return Err(OrderError::Validation {
            field: "note",
            message: format!("note is too long (max {MAX_NOTE_LEN} chars)"),
        });
    }

    let mut tx = begin_write(pool).await.map_err(RepoError::from)?;

    let customer = match input.customer_id {
        Some(id) => Some(
            customer::find_by_id(&mut *tx, id)
                .await?
                .ok_or(OrderError::CustomerNotFound(id))?,
        ),
        None => None,
    };

    let order_id = order::create_order(&mut *tx, input.customer_id, note, now_millis()).await?;

    let mut drafts: Vec<LineDraft> = Vec::with_capacity(input.items.len());
    for (index, line) in input.items.iter().enumerate() {
        let draft = resolve_line(&mut tx, line).await.map_err(|source| {
            tracing::warn!(order_id, line = index, error = %source, "Order line rejected");
            OrderError::Line { index, source }
        })?;
        drafts.push(draft);
    }

    let total_cents = drafts
        .iter()
        .try_fold(0i64, |acc, d| acc.checked_add(d.subtotal_cents))
        .ok_or(MoneyError::OutOfRange)?;

    for draft in &drafts {
        order::create_order_item(
            &mut *tx,
            order_id,
            draft.product_id,
            draft.quantity,
            draft.price_cents,
            draft.subtotal_cents,
        )
        .await?;
    }
    order::update_order_total(&mut *tx, order_id, total_cents).await?;

    let placed = order::find_detail(&mut tx, order_id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", order_id)))?;

    tx.commit().await.map_err(RepoError::from)?;

    tracing::info!(
        order_id,
        customer_id = ?input.customer_id,
        items = placed.items.len(),
        total = %money::from_cents(total_cents),
        "Order finalized"
    );

    Ok(PlacedOrder {
        order: placed,
        customer,
    })
}

/// Load a committed order with its items
pub async fn find_order(pool: &SqlitePool, order_id: i64) -> AppResult<Order> {
    let mut conn = pool.acquire().await.map_err(RepoError::from)?;
    let found = order::find_detail(&mut conn, order_id).await?;
    found.ok_or_else(|| {
        AppError::with_message(ErrorCode::OrderNotFound, format!("order {order_id} not found"))
    })
}
