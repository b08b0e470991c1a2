//! Order Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Order with its line items
///
/// `total` always equals the sum of the item subtotals; it is written once
/// when the order is placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    /// Nulled when the customer is deleted; the order itself is kept
    pub customer_id: Option<i64>,
    /// Creation time (Unix millis)
    pub created_at: i64,
    pub total: Decimal,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

/// Order line with its price snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub quantity: i64,
    /// Unit price at order time, independent of later catalog changes
    pub price: Decimal,
    /// `price * quantity`
    pub subtotal: Decimal,
}

/// Product reference inside an order line: an id or a name
///
/// Deserializes from a JSON number (id) or a JSON string (name).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductRef {
    Id(i64),
    Name(String),
}

impl fmt::Display for ProductRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductRef::Id(id) => write!(f, "#{id}"),
            ProductRef::Name(name) => write!(f, "'{name}'"),
        }
    }
}

/// One requested order line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLineInput {
    pub product: ProductRef,
    /// Defaults to 1 when omitted
    #[serde(default)]
    pub quantity: Option<i64>,
}

impl OrderLineInput {
    pub fn new(product: ProductRef, quantity: i64) -> Self {
        Self {
            product,
            quantity: Some(quantity),
        }
    }

    /// Requested quantity, 1 when not given
    pub fn quantity(&self) -> i64 {
        self.quantity.unwrap_or(1)
    }
}

/// Place order payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderCreate {
    #[serde(default)]
    pub customer_id: Option<i64>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub items: Vec<OrderLineInput>,
}
