//! # Error Types
//!
//! Domain-specific error types for debtbook-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                 │
//! │                                                                     │
//! │  debtbook-core errors (this file)                                   │
//! │  └── DebtError         - State-machine violations on the aggregate │
//! │                                                                     │
//! │  debtbook-core contracts (repository.rs)                           │
//! │  └── RepositoryError   - Opaque persistence failures               │
//! │                                                                     │
//! │  debtbook-db errors (separate crate)                                │
//! │  └── DbError           - Database operation failures                │
//! │                                                                     │
//! │  Flow: DebtError/RepositoryError → ServiceResponse envelope        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The `#[error]` strings on `DebtError` are user-facing and part of the
//! service contract: the service surfaces them verbatim in its response
//! envelope. Do not reword them.

use thiserror::Error;

// =============================================================================
// Debt Error
// =============================================================================

/// State-machine violations raised by the Debt aggregate.
///
/// Every variant corresponds to a precondition of a lifecycle operation;
/// the aggregate raises these before touching any state, so a failed
/// operation never leaves a partial mutation behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DebtError {
    /// The debt is not open for the attempted operation.
    #[error("debt is not in pending status")]
    DebtNotPending,

    /// No installment with the given id belongs to this debt.
    #[error("installment not found")]
    InstallmentNotFound,

    /// The targeted installment has already been settled or voided.
    #[error("installment is not in pending status")]
    InstallmentNotPending,

    /// Underpayment: the offered amount is below the installment value.
    /// Overpayment is accepted.
    #[error("amount does not match the installment value")]
    AmountMismatch,

    /// Cancellation is only allowed while nothing has been paid.
    #[error("cannot cancel debt with paid installments")]
    PaidInstallments,

    /// The debt already reached a voided terminal state.
    #[error("debt is already canceled or reversed")]
    AlreadyClosed,

    /// A reversal record is already attached; it is never overwritten.
    #[error("debt has already been reversed")]
    AlreadyReversed,
}

/// Convenience type alias for Results with DebtError.
pub type DebtResult<T> = Result<T, DebtError>;

// =============================================================================
// Unit Tests
// =============================================================================
