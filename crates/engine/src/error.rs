//! The module contains the errors the engine can raise.
//!
//! Every error is a synchronous rejection of the proposed operation. The
//! engine never retries internally and never downgrades a rejection to a
//! best-effort correction (a mismatched split is never auto-normalized).
//! Translating an error into a user-visible message is the caller's job.
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum EngineError {
    /// The residual participant's share would be negative.
    #[error("Negative residual: {0}")]
    NegativeResidual(String),
    /// The proposed shares do not sum to the expense total.
    #[error("Split sum mismatch: {0}")]
    SplitSumMismatch(String),
    /// The proposed percentages do not sum to 100%.
    #[error("Percentage sum mismatch: {0}")]
    PercentageSumMismatch(String),
    /// Empty participant list, duplicate ids, or payer missing.
    #[error("Invalid participant set: {0}")]
    InvalidParticipantSet(String),
    /// A settlement was directed while the balance is already settled.
    #[error("No outstanding balance: {0}")]
    NoOutstandingBalance(String),
    /// A relationship removal was attempted with a non-zero balance.
    #[error("Non-zero balance: {0}")]
    NonZeroBalance(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid name: {0}")]
    InvalidName(String),
    #[error("Invalid id: {0}")]
    InvalidId(String),
}
