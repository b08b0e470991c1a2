//! Store Server - commerce backend
//!
//! Catalog (category tree, products), customers and order placement over
//! SQLite, served with axum.
//!
//! # Module layout
//!
//! ```text
//! store-server/src/
//! ├── core/          # config, state, server
//! ├── db/            # pool, migrations, repositories
//! ├── catalog/       # hierarchy resolver, pricing aggregator, create workflows
//! ├── customers.rs   # customer create workflow
//! ├── orders/        # line resolver, order assembler
//! ├── notify/        # SMS / email dispatch
//! ├── api/           # HTTP routes and handlers
//! └── utils/         # errors, logging, money, validation
//! ```

pub mod api;
pub mod catalog;
pub mod core;
pub mod customers;
pub mod db;
pub mod notify;
pub mod orders;
pub mod utils;

pub use core::{Config, Server, ServerState};
pub use utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use utils::logger::{init_logger, init_logger_with_file};

/// Load `.env`, then initialize logging from `LOG_LEVEL` / `LOG_DIR`
pub fn setup_environment() {
    let _ = dotenv::dotenv();
    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());
}
