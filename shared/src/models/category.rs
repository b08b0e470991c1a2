//! Category Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Category entity
///
/// Categories form a forest through `parent_id`; a category without a parent
/// is a root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub parent_id: Option<i64>,
}

/// Create category payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryCreate {
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<i64>,
}

/// Average price of the distinct products under a category subtree
///
/// `average_price` is `null` when no product belongs to the subtree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AveragePrice {
    #[serde(with = "rust_decimal::serde::float_option")]
    pub average_price: Option<Decimal>,
}
