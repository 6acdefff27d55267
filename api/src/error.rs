//! Error types shared by the stores, services and routes.

use thiserror::Error;

/// Failures coming from the backing document store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("mongodb error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("bson serialization error: {0}")]
    Bson(#[from] mongodb::bson::ser::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors returned by every café operation.
#[derive(Debug, Error)]
pub enum CafeError {
    /// The table, line or product does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The request was rejected before anything was written.
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl CafeError {
    pub fn table_not_found(table_id: &str) -> Self {
        CafeError::NotFound(format!("Table {} not found", table_id))
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        CafeError::Validation(msg.into())
    }
}

pub type CafeResult<T> = Result<T, CafeError>;
