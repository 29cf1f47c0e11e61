//! Input errors raised at the calculator boundary.
//!
//! The economics engine itself is total and never fails. Everything here
//! is about rejecting what a user typed before it reaches the engine.

use thiserror::Error;

/// A rejected calculator input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    /// The selected miner model is not in the catalog.
    #[error("Unknown miner model: {0}")]
    UnknownModel(String),

    /// Miner quantity must be a whole number of at least one.
    #[error("Miner quantity must be at least 1 (got {0})")]
    InvalidQuantity(i64),

    #[error("{field} must be >= 0 (got {value})")]
    NegativeValue { field: &'static str, value: f64 },

    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },

    /// The request could not be decoded at all (e.g. `miner_qty=1.5`).
    #[error("Malformed input: {0}")]
    Malformed(String),
}

impl InputError {
    /// Name of the input field the error refers to, if any.
    pub fn field(&self) -> &'static str {
        match self {
            InputError::UnknownModel(_) => "miner_model",
            InputError::InvalidQuantity(_) => "miner_qty",
            InputError::NegativeValue { field, .. } | InputError::NotFinite { field } => field,
            InputError::Malformed(_) => "query",
        }
    }
}
