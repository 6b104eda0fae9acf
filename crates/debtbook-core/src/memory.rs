//! # In-Memory Repositories
//!
//! `Vec`-backed implementations of the persistence contracts. No I/O, no
//! database: they exist for service tests and for consumers that want a
//! storage-free harness.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::debt::{Debt, Installment};
use crate::paginate::SearchQuery;
use crate::repository::{
    ClientReader, DebtPage, DebtRepository, RepositoryError, RepositoryResult,
};

/// In-memory debt store.
///
/// ## Thread Safety
/// A plain `std::sync::Mutex` guards the store. Every operation copies data
/// in or out inside a short critical section and never holds the lock
/// across an await point.
#[derive(Debug, Default)]
pub struct MemoryDebtRepository {
    debts: Mutex<Vec<Debt>>,
}

impl MemoryDebtRepository {
    pub fn new() -> Self {
        MemoryDebtRepository::default()
    }

    /// Number of stored debts (test assertions).
    pub fn len(&self) -> usize {
        self.debts.lock().expect("debt store mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl DebtRepository for MemoryDebtRepository {
    async fn save(&self, debt: &Debt) -> RepositoryResult<()> {
        let mut debts = self.debts.lock().expect("debt store mutex poisoned");
        debts.push(debt.clone());
        Ok(())
    }

    async fn update(&self, debt: &Debt) -> RepositoryResult<()> {
        let mut debts = self.debts.lock().expect("debt store mutex poisoned");

        let stored = debts
            .iter_mut()
            .find(|stored| stored.id == debt.id)
            .ok_or_else(|| RepositoryError::backend("no stored debt with that id"))?;

        *stored = debt.clone();
        Ok(())
    }

    async fn get_debt(&self, debt_id: Uuid) -> RepositoryResult<Option<Debt>> {
        let debts = self.debts.lock().expect("debt store mutex poisoned");
        Ok(debts.iter().find(|debt| debt.id == debt_id).cloned())
    }

    async fn client_user_debts(&self, client_id: Uuid) -> RepositoryResult<Vec<Debt>> {
        let debts = self.debts.lock().expect("debt store mutex poisoned");
        Ok(debts
            .iter()
            .filter(|debt| debt.user_client_id == client_id)
            .cloned()
            .collect())
    }

    async fn debt_installments(&self, debt_id: Uuid) -> RepositoryResult<Vec<Installment>> {
        let debts = self.debts.lock().expect("debt store mutex poisoned");
        Ok(debts
            .iter()
            .filter(|debt| debt.id == debt_id)
            .flat_map(|debt| debt.installments.iter().cloned())
            .collect())
    }

    async fn get_debts(&self, query: &SearchQuery) -> RepositoryResult<DebtPage> {
        let debts = self.debts.lock().expect("debt store mutex poisoned");

        let matching: Vec<&Debt> = debts
            .iter()
            .filter(|debt| {
                query.term_search.is_empty() || debt.description.contains(&query.term_search)
            })
            .collect();

        let total_records = matching.len() as i64;
        let data = matching
            .into_iter()
            .skip(query.offset() as usize)
            .take(query.limit as usize)
            .cloned()
            .collect();

        Ok(DebtPage {
            total_records,
            data,
        })
    }
}

/// In-memory set of known client ids.
#[derive(Debug, Default)]
pub struct MemoryClientReader {
    clients: Mutex<HashSet<Uuid>>,
}

impl MemoryClientReader {
    pub fn new() -> Self {
        MemoryClientReader::default()
    }

    /// Registers a client id as existing.
    pub fn add(&self, client_id: Uuid) {
        self.clients
            .lock()
            .expect("client set mutex poisoned")
            .insert(client_id);
    }
}

#[async_trait]
impl ClientReader for MemoryClientReader {
    async fn client_exists(&self, client_id: Uuid) -> RepositoryResult<bool> {
        let clients = self.clients.lock().expect("client set mutex poisoned");
        Ok(clients.contains(&client_id))
    }
}
