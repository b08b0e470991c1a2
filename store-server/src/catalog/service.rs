//! Catalog create workflows
//!
//! Validation and duplicate checks in front of the category/product
//! repositories. Errors are field-scoped [`AppError`]s.

use crate::db::begin_write;
use crate::db::repository::{RepoError, category, product};
use crate::utils::validation::{MAX_NAME_LEN, MAX_NOTE_LEN, validate_optional_text, validate_required_text};
use crate::utils::{AppError, AppResult, ErrorCode, money};
use shared::models::{Category, CategoryCreate, Product, ProductCreate};
use sqlx::SqlitePool;

/// Create a category, optionally under an existing parent
///
/// Names are unique among siblings, ignoring case.
pub async fn create_category(pool: &SqlitePool, data: CategoryCreate) -> AppResult<Category> {
    validate_required_text(&data.name, "name", MAX_NAME_LEN)?;
    let name = data.name.trim();

    let parent = match data.parent_id {
        Some(parent_id) => Some(category::find_by_id(pool, parent_id).await?.ok_or_else(|| {
            AppError::with_message(
                ErrorCode::CategoryNotFound,
                format!("parent category {parent_id} not found"),
            )
            .for_field("parent_id")
        })?),
        None => None,
    };

    if category::find_by_name_ci(pool, data.parent_id, name).await?.is_some() {
        tracing::warn!(name = %name, parent_id = ?data.parent_id, "Attempt to create duplicate category");
        return Err(category_exists(name));
    }

    let created = category::create(pool, &data).await.map_err(|e| match e {
        // Lost a race against a concurrent create
        RepoError::Duplicate(_) => category_exists(name),
        other => other.into(),
    })?;

    match parent {
        Some(p) => tracing::info!(
            category_id = created.id,
            name = %created.name,
            parent_id = p.id,
            parent_name = %p.name,
            "New category created"
        ),
        None => tracing::info!(category_id = created.id, name = %created.name, "New root category created"),
    }
    Ok(created)
}

/// Create a product; rejects a name already used by another product
pub async fn create_product(pool: &SqlitePool, data: ProductCreate) -> AppResult<Product> {
    validate_product(&data)?;
    if product::exists_by_name_ci(pool, &data.name).await? {
        tracing::warn!(name = %data.name.trim(), "Attempt to create duplicate product");
        return Err(AppError::with_message(
            ErrorCode::ProductNameExists,
            format!("Product '{}' already exists", data.name.trim()),
        )
        .for_field("name"));
    }

    let created = insert_product(pool, &data).await?;
    tracing::info!(
        product_id = created.id,
        name = %created.name,
        price = %created.price,
        "New product created"
    );
    Ok(created)
}

/// Create a product without the duplicate-name check (bulk upload path)
pub async fn upload_product(pool: &SqlitePool, data: ProductCreate) -> AppResult<Product> {
    validate_product(&data)?;
    let created = insert_product(pool, &data).await?;
    tracing::info!(
        product_id = created.id,
        name = %created.name,
        price = %created.price,
        "Product uploaded"
    );
    Ok(created)
}

fn category_exists(name: &str) -> AppError {
    AppError::with_message(
        ErrorCode::CategoryNameExists,
        format!("Category '{name}' already exists"),
    )
    .for_field("name")
}

fn validate_product(data: &ProductCreate) -> AppResult<()> {
    validate_required_text(&data.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(Some(data.description.as_str()), "description", MAX_NOTE_LEN)?;
    Ok(())
}

async fn insert_product(pool: &SqlitePool, data: &ProductCreate) -> AppResult<Product> {
    let price_cents = money::to_cents(data.price).map_err(|e| {
        AppError::with_message(ErrorCode::ProductInvalidPrice, e.to_string()).for_field("price")
    })?;

    let mut tx = begin_write(pool).await.map_err(RepoError::from)?;

    for category_id in &data.categories {
        if category::find_by_id(&mut *tx, *category_id).await?.is_none() {
            return Err(AppError::with_message(
                ErrorCode::CategoryNotFound,
                format!("category {category_id} not found"),
            )
            .for_field("categories"));
        }
    }

    let created = product::create(&mut *tx, data, price_cents).await?;
    tx.commit().await.map_err(RepoError::from)?;
    Ok(created)
}
