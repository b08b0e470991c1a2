//! Order Line Resolver

use super::LineError;
use crate::db::repository::product::{self, ProductRow};
use crate::utils::money;
use rust_decimal::Decimal;
use shared::models::{OrderLineInput, ProductRef};
use sqlx::SqliteConnection;

/// One resolved order line, priced from the catalog at resolution time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineDraft {
    pub product_id: i64,
    pub product_name: String,
    pub quantity: i64,
    pub price_cents: i64,
    pub subtotal_cents: i64,
}

impl LineDraft {
    pub fn price(&self) -> Decimal {
        money::from_cents(self.price_cents)
    }

    pub fn subtotal(&self) -> Decimal {
        money::from_cents(self.subtotal_cents)
    }
}

/// Resolve a requested line to exactly one product and snapshot its price
///
/// Names match case-insensitively. Zero matches and several matches are both
/// errors; the resolver never picks one of many.
pub async fn resolve_line(
    conn: &mut SqliteConnection,
    line: &OrderLineInput,
) -> Result<LineDraft, LineError> {
    let quantity = line.quantity();
    if quantity < 1 {
        return Err(LineError::InvalidQuantity(quantity));
    }

    let product = find_product(conn, &line.product).await?;
    let subtotal_cents = money::line_subtotal(product.price_cents, quantity)?;

    Ok(LineDraft {
        product_id: product.id,
        product_name: product.name,
        quantity,
        price_cents: product.price_cents,
        subtotal_cents,
    })
}

async fn find_product(
    conn: &mut SqliteConnection,
    reference: &ProductRef,
) -> Result<ProductRow, LineError> {
    match reference {
        ProductRef::Id(id) => product::find_by_id(&mut *conn, *id)
            .await?
            .ok_or_else(|| LineError::ProductNotFound(reference.clone())),
        ProductRef::Name(name) => {
            let mut matches = product::find_by_name_ci(&mut *conn, name).await?;
            match matches.len() {
                0 => Err(LineError::ProductNotFound(reference.clone())),
                1 => Ok(matches.remove(0)),
                n => {
                    tracing::warn!(name = %name, matches = n, "Ambiguous product name in order line");
                    Err(LineError::Ambiguous(name.clone()))
                }
            }
        }
    }
}
