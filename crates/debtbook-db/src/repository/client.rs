//! # Client Repository
//!
//! The minimal client registry backing the client-existence check the debt
//! service depends on. Full client management (addresses, phones, documents)
//! is a separate system; debtbook only needs to know an id is real.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use debtbook_core::repository::{ClientReader, RepositoryError, RepositoryResult};

/// Repository for client database operations.
#[derive(Debug, Clone)]
pub struct ClientRepository {
    pool: SqlitePool,
}

impl ClientRepository {
    /// Creates a new ClientRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ClientRepository { pool }
    }

    /// Registers a client (seed data, tests).
    pub async fn insert(&self, id: Uuid, name: &str) -> DbResult<()> {
        debug!(id = %id, "Inserting client");

        sqlx::query("INSERT INTO clients (id, name, created_at) VALUES (?1, ?2, ?3)")
            .bind(id.to_string())
            .bind(name)
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn exists_inner(&self, client_id: Uuid) -> DbResult<bool> {
        let exists: i64 =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM clients WHERE id = ?1)")
                .bind(client_id.to_string())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists != 0)
    }
}

#[async_trait]
impl ClientReader for ClientRepository {
    async fn client_exists(&self, client_id: Uuid) -> RepositoryResult<bool> {
        self.exists_inner(client_id)
            .await
            .map_err(RepositoryError::from)
    }
}
