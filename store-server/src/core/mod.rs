//! Core: configuration, shared state and the HTTP server
//!
//! - [`Config`] - environment-driven settings
//! - [`ServerState`] - database pool and notifier shared by handlers
//! - [`Server`] - binds the listener and serves the router
//! - [`ServerError`] - startup failures

pub mod config;
pub mod error;
pub mod server;
pub mod state;

pub use config::Config;
pub use error::{Result, ServerError};
pub use server::Server;
pub use state::ServerState;
