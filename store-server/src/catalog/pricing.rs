//! Pricing Aggregator

use super::{CatalogError, hierarchy};
use crate::db::repository::product;
use crate::utils::money;
use rust_decimal::Decimal;
use sqlx::SqlitePool;

/// Mean current price of the distinct products in a category subtree
///
/// The subtree is `category_id` plus all its descendants. A product linked to
/// several of those categories counts once. `None` when no product matches.
pub async fn average_price(
    pool: &SqlitePool,
    category_id: i64,
) -> Result<Option<Decimal>, CatalogError> {
    let mut category_ids = vec![category_id];
    category_ids.extend(hierarchy::descendants(pool, category_id).await?);

    let products = product::find_by_category_ids(pool, &category_ids).await?;
    let prices: Vec<Decimal> = products.iter().map(|p| p.price()).collect();
    let average = money::mean(&prices);

    match average {
        Some(avg) => tracing::info!(
            category_id,
            categories = category_ids.len(),
            products = prices.len(),
            average = %avg,
            "Computed average price"
        ),
        None => tracing::warn!(
            category_id,
            categories = category_ids.len(),
            "No products found in category subtree"
        ),
    }

    Ok(average)
}
