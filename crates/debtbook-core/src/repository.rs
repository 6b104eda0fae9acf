//! # Persistence Contracts
//!
//! The abstract capabilities the debt service consumes. Concrete adapters
//! (SQLite in debtbook-db, the in-memory store in [`crate::memory`])
//! implement these traits; the service never learns which one it is
//! talking to.
//!
//! ## Error Opacity
//! `RepositoryError` carries a message for the logs and nothing else.
//! Storage-layer detail must not leak through the contract; the service
//! maps any repository failure to a fixed, generic envelope message.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::debt::{Debt, Installment};
use crate::paginate::SearchQuery;

/// Opaque persistence failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("{0}")]
    Backend(String),
}

impl RepositoryError {
    pub fn backend(message: impl Into<String>) -> Self {
        RepositoryError::Backend(message.into())
    }
}

/// Convenience type alias for repository results.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// One page of debts plus the unpaged total.
#[derive(Debug, Clone)]
pub struct DebtPage {
    pub total_records: i64,
    pub data: Vec<Debt>,
}

/// Persistence contract for the debt aggregate.
///
/// Implementations must treat `save` and `update` as whole-aggregate
/// writes: the debt row, its installments, and any attached cancel or
/// reversal record go together, atomically. At most one concurrent
/// mutating operation per debt id is assumed.
#[async_trait]
pub trait DebtRepository: Send + Sync {
    /// Persists a newly created debt and its installments.
    async fn save(&self, debt: &Debt) -> RepositoryResult<()>;

    /// Persists mutations to an existing debt (status changes, installment
    /// status changes, newly attached cancel/reversal info).
    async fn update(&self, debt: &Debt) -> RepositoryResult<()>;

    /// Loads the full aggregate, or `None` when the id is unknown.
    async fn get_debt(&self, debt_id: Uuid) -> RepositoryResult<Option<Debt>>;

    /// All debts owned by a client.
    async fn client_user_debts(&self, client_id: Uuid) -> RepositoryResult<Vec<Debt>>;

    /// The installments of one debt, ordered by number.
    async fn debt_installments(&self, debt_id: Uuid) -> RepositoryResult<Vec<Installment>>;

    /// One page of debts plus the total record count.
    async fn get_debts(&self, query: &SearchQuery) -> RepositoryResult<DebtPage>;
}

/// Read-only cross-aggregate check: does this client exist?
///
/// Kept separate from [`DebtRepository`] so the debt core stays ignorant
/// of how clients are stored.
#[async_trait]
pub trait ClientReader: Send + Sync {
    async fn client_exists(&self, client_id: Uuid) -> RepositoryResult<bool>;
}
