//! Errors the engine can return.
//!
//! Ownership failures come in two shapes: [`KeyNotFound`] when a record is
//! absent (or when absence and foreign ownership are deliberately
//! conflated), [`Forbidden`] when the record exists but belongs to another
//! user.
//!
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`Forbidden`]: EngineError::Forbidden
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("{0}")]
    Validation(String),
    #[error("insufficient funds: {0}")]
    InsufficientFunds(String),
    #[error("{0} not found")]
    KeyNotFound(String),
    #[error("{0} belongs to another user")]
    Forbidden(String),
    #[error("\"{0}\" already present")]
    ExistingKey(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Validation(a), Self::Validation(b)) => a == b,
            (Self::InsufficientFunds(a), Self::InsufficientFunds(b)) => a == b,
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::Forbidden(a), Self::Forbidden(b)) => a == b,
            (Self::ExistingKey(a), Self::ExistingKey(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
