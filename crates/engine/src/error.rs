//! The module contains the errors the engine can return.
//!
//! Analytics never fail: they degrade to sentinel values. Errors come from
//! building records and from the record store:
//!
//! - [`KeyNotFound`] returned when a record is not in the store.
//! - [`InvalidAmount`] returned when a money amount is negative or out of
//!   range.
//! - [`InvalidRecord`] returned when a record violates a construction rule.
//!
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`InvalidRecord`]: EngineError::InvalidRecord
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}
