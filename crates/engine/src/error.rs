//! The module contains the errors the engine can raise.
//!
//! Validation errors ([`InvalidName`], [`InvalidAmount`], [`InvalidDate`],
//! [`KindMismatch`]) are raised before anything is written. [`KeyNotFound`]
//! covers both absent rows and rows owned by someone else, so callers cannot
//! distinguish the two. [`ExistingKey`] reports a duplicate budget.
//!
//! [`InvalidName`]: EngineError::InvalidName
//! [`InvalidAmount`]: EngineError::InvalidAmount
//! [`InvalidDate`]: EngineError::InvalidDate
//! [`KindMismatch`]: EngineError::KindMismatch
//! [`KeyNotFound`]: EngineError::KeyNotFound
//! [`ExistingKey`]: EngineError::ExistingKey
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("\"{0}\" already present!")]
    ExistingKey(String),
    #[error("Invalid name: {0}")]
    InvalidName(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Invalid cursor: {0}")]
    InvalidCursor(String),
    #[error("Kind mismatch: {0}")]
    KindMismatch(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::ExistingKey(a), Self::ExistingKey(b)) => a == b,
            (Self::InvalidName(a), Self::InvalidName(b)) => a == b,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::InvalidDate(a), Self::InvalidDate(b)) => a == b,
            (Self::InvalidCursor(a), Self::InvalidCursor(b)) => a == b,
            (Self::KindMismatch(a), Self::KindMismatch(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
