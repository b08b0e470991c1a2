//! Data models
//!
//! Shared between the server and API clients.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`;
//! money-carrying entities are mapped from integer minor units by the server.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).

pub mod category;
pub mod customer;
pub mod order;
pub mod product;

// Re-exports
pub use category::*;
pub use customer::*;
pub use order::*;
pub use product::*;
