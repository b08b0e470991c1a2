//! Catalog: category tree queries and create workflows
//!
//! - [`hierarchy`] - descendant set of a category (breadth-first)
//! - [`pricing`] - average product price over a category subtree
//! - [`service`] - create category / product / upload product

pub mod hierarchy;
pub mod pricing;
pub mod service;

use crate::db::repository::RepoError;
use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Errors from the category tree read path
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("category {0} not found")]
    CategoryNotFound(i64),

    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::CategoryNotFound(id) => {
                AppError::with_message(ErrorCode::CategoryNotFound, format!("category {id} not found"))
                    .with_detail("category_id", id)
            }
            CatalogError::Repo(e) => e.into(),
        }
    }
}
