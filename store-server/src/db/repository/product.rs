//! Product Repository
//!
//! Prices live in `price_cents`; [`ProductRow`] converts to the `Decimal`
//! facing model.

use super::{RepoError, RepoResult, id_list};
use crate::utils::money;
use crate::utils::validation::name_key;
use rust_decimal::Decimal;
use shared::models::{Product, ProductCreate};
use sqlx::{Executor, FromRow, Sqlite, SqliteConnection};

/// Product row as stored
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct ProductRow {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price_cents: i64,
}

impl ProductRow {
    pub fn price(&self) -> Decimal {
        money::from_cents(self.price_cents)
    }

    pub fn into_product(self, categories: Vec<i64>) -> Product {
        Product {
            price: self.price(),
            id: self.id,
            name: self.name,
            description: self.description,
            categories,
        }
    }
}

const COLUMNS: &str = "p.id, p.name, p.description, p.price_cents";

pub async fn find_by_id<'e, E>(executor: E, id: i64) -> RepoResult<Option<ProductRow>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!("SELECT {COLUMNS} FROM product p WHERE p.id = ?");
    let row = sqlx::query_as::<_, ProductRow>(&sql)
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(row)
}

/// Every product whose name equals `name`, ignoring case
pub async fn find_by_name_ci<'e, E>(executor: E, name: &str) -> RepoResult<Vec<ProductRow>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!("SELECT {COLUMNS} FROM product p WHERE p.name_key = ? ORDER BY p.id");
    let rows = sqlx::query_as::<_, ProductRow>(&sql)
        .bind(name_key(name))
        .fetch_all(executor)
        .await?;
    Ok(rows)
}

pub async fn exists_by_name_ci<'e, E>(executor: E, name: &str) -> RepoResult<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM product WHERE name_key = ?)")
            .bind(name_key(name))
            .fetch_one(executor)
            .await?;
    Ok(exists)
}

/// Distinct products linked to any of `category_ids`
///
/// A product tagged with several of the given categories appears once.
pub async fn find_by_category_ids<'e, E>(
    executor: E,
    category_ids: &[i64],
) -> RepoResult<Vec<ProductRow>>
where
    E: Executor<'e, Database = Sqlite>,
{
    if category_ids.is_empty() {
        return Ok(Vec::new());
    }

    let sql = format!(
        "SELECT DISTINCT {COLUMNS} FROM product p \
         JOIN product_category pc ON pc.product_id = p.id \
         WHERE pc.category_id IN (SELECT value FROM json_each(?)) \
         ORDER BY p.id"
    );
    let rows = sqlx::query_as::<_, ProductRow>(&sql)
        .bind(id_list(category_ids))
        .fetch_all(executor)
        .await?;
    Ok(rows)
}

pub async fn find_category_ids<'e, E>(executor: E, product_id: i64) -> RepoResult<Vec<i64>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let ids = sqlx::query_scalar(
        "SELECT category_id FROM product_category WHERE product_id = ? ORDER BY category_id",
    )
    .bind(product_id)
    .fetch_all(executor)
    .await?;
    Ok(ids)
}

/// Insert a product and its category links
///
/// Run inside a transaction so a failed link leaves no product behind.
pub async fn create(
    conn: &mut SqliteConnection,
    data: &ProductCreate,
    price_cents: i64,
) -> RepoResult<Product> {
    let name = data.name.trim();
    let row = sqlx::query_as::<_, ProductRow>(
        "INSERT INTO product (name, name_key, description, price_cents) VALUES (?, ?, ?, ?) \
         RETURNING id, name, description, price_cents",
    )
    .bind(name)
    .bind(name_key(name))
    .bind(data.description.trim())
    .bind(price_cents)
    .fetch_one(&mut *conn)
    .await?;

    let mut categories = data.categories.clone();
    categories.sort_unstable();
    categories.dedup();

    for category_id in &categories {
        sqlx::query("INSERT INTO product_category (product_id, category_id) VALUES (?, ?)")
            .bind(row.id)
            .bind(category_id)
            .execute(&mut *conn)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                    RepoError::NotFound(format!("Category {} not found", category_id))
                }
                other => RepoError::from(other),
            })?;
    }

    Ok(row.into_product(categories))
}
