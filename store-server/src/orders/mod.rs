//! Order placement
//!
//! - [`resolver`] - turns one requested line into a priced draft
//! - [`assembler`] - resolves every line and persists the order atomically

pub mod assembler;
pub mod resolver;

pub use assembler::{PlacedOrder, find_order, place_order};
pub use resolver::{LineDraft, resolve_line};

use crate::db::repository::RepoError;
use crate::utils::money::MoneyError;
use shared::error::{AppError, ErrorCode};
use shared::models::ProductRef;
use thiserror::Error;

/// Failure to resolve a single order line
#[derive(Debug, Error)]
pub enum LineError {
    #[error("quantity must be at least 1, got {0}")]
    InvalidQuantity(i64),

    #[error("product {0} not found")]
    ProductNotFound(ProductRef),

    #[error("multiple products found with name '{0}'; use a unique identifier")]
    Ambiguous(String),

    #[error("line amount out of range: {0}")]
    Amount(#[from] MoneyError),

    #[error(transparent)]
    Repo(#[from] RepoError),
}

/// Failure to place an order; nothing is persisted when this is returned
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("must provide at least one product")]
    Empty,

    #[error("customer {0} not found")]
    CustomerNotFound(i64),

    #[error("{message}")]
    Validation { field: &'static str, message: String },

    #[error("{source}")]
    Line { index: usize, source: LineError },

    #[error("order total out of range: {0}")]
    Amount(#[from] MoneyError),

    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        let message = err.to_string();
        match err {
            OrderError::Empty => {
                AppError::with_message(ErrorCode::OrderEmpty, message).for_field("items")
            }
            OrderError::CustomerNotFound(_) => {
                AppError::with_message(ErrorCode::CustomerNotFound, message)
                    .for_field("customer_id")
            }
            OrderError::Validation { field, .. } => AppError::validation(message).for_field(field),
            OrderError::Line { index, source } => {
                let code = match source {
                    LineError::InvalidQuantity(_) => ErrorCode::OrderInvalidQuantity,
                    LineError::ProductNotFound(_) => ErrorCode::ProductNotFound,
                    LineError::Ambiguous(_) => ErrorCode::ProductAmbiguous,
                    LineError::Amount(_) => ErrorCode::ValueOutOfRange,
                    LineError::Repo(e) => return e.into(),
                };
                AppError::with_message(code, message)
                    .for_field("items")
                    .with_detail("line", index)
            }
            OrderError::Amount(_) => {
                AppError::with_message(ErrorCode::ValueOutOfRange, message).for_field("items")
            }
            OrderError::Repo(e) => e.into(),
        }
    }
}
