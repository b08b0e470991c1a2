//! Order Repository
//!
//! Orders are written once by the order assembler inside a transaction:
//! header with a zero total, one row per item, then the final total.

use super::{RepoError, RepoResult};
use crate::utils::money;
use shared::models::{Order, OrderItem};
use sqlx::{Executor, FromRow, Sqlite, SqliteConnection};

#[derive(Debug, FromRow)]
struct OrderRow {
    id: i64,
    customer_id: Option<i64>,
    created_at: i64,
    total_cents: i64,
    note: String,
}

#[derive(Debug, FromRow)]
struct OrderItemRow {
    id: i64,
    product_id: i64,
    product_name: String,
    quantity: i64,
    price_cents: i64,
    subtotal_cents: i64,
}

impl From<OrderItemRow> for OrderItem {
    fn from(row: OrderItemRow) -> Self {
        OrderItem {
            id: row.id,
            product_id: row.product_id,
            product_name: row.product_name,
            quantity: row.quantity,
            price: money::from_cents(row.price_cents),
            subtotal: money::from_cents(row.subtotal_cents),
        }
    }
}

/// Insert an order header with `total_cents = 0`, returning its id
pub async fn create_order<'e, E>(
    executor: E,
    customer_id: Option<i64>,
    note: &str,
    created_at: i64,
) -> RepoResult<i64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO orders (customer_id, created_at, total_cents, note) VALUES (?, ?, 0, ?) RETURNING id",
    )
    .bind(customer_id)
    .bind(created_at)
    .bind(note)
    .fetch_one(executor)
    .await?;
    Ok(id)
}

pub async fn create_order_item<'e, E>(
    executor: E,
    order_id: i64,
    product_id: i64,
    quantity: i64,
    price_cents: i64,
    subtotal_cents: i64,
) -> RepoResult<i64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO order_item (order_id, product_id, quantity, price_cents, subtotal_cents) \
         VALUES (?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(order_id)
    .bind(product_id)
    .bind(quantity)
    .bind(price_cents)
    .bind(subtotal_cents)
    .fetch_one(executor)
    .await?;
    Ok(id)
}

pub async fn update_order_total<'e, E>(executor: E, order_id: i64, total_cents: i64) -> RepoResult<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("UPDATE orders SET total_cents = ? WHERE id = ?")
        .bind(total_cents)
        .bind(order_id)
        .execute(executor)
        .await?;
    if result.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Order {} not found", order_id)));
    }
    Ok(())
}

/// Load an order with its items (in insertion order) and product names
pub async fn find_detail(conn: &mut SqliteConnection, order_id: i64) -> RepoResult<Option<Order>> {
    let Some(row) = sqlx::query_as::<_, OrderRow>(
        "SELECT id, customer_id, created_at, total_cents, note FROM orders WHERE id = ?",
    )
    .bind(order_id)
    .fetch_optional(&mut *conn)
    .await?
    else {
        return Ok(None);
    };

    let items = sqlx::query_as::<_, OrderItemRow>(
        "SELECT oi.id, oi.product_id, p.name AS product_name, oi.quantity, oi.price_cents, oi.subtotal_cents \
         FROM order_item oi JOIN product p ON p.id = oi.product_id \
         WHERE oi.order_id = ? ORDER BY oi.id",
    )
    .bind(order_id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(Some(Order {
        id: row.id,
        customer_id: row.customer_id,
        created_at: row.created_at,
        total: money::from_cents(row.total_cents),
        note: row.note,
        items: items.into_iter().map(OrderItem::from).collect(),
    }))
}
