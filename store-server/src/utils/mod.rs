//! Utility module: shared error types, logging, money and input validation
//!
//! - [`AppError`] - application error type (from shared::error)
//! - [`logger`] - tracing subscriber setup
//! - [`money`] - decimal <-> minor unit conversion
//! - [`validation`] - text length checks for create payloads

pub mod logger;
pub mod money;
pub mod validation;

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
