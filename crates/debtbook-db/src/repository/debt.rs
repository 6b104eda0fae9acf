//! # Debt Repository
//!
//! SQLite persistence for the debt aggregate.
//!
//! ## Write Discipline
//! `save` and `update` are whole-aggregate writes inside one transaction:
//! the debt row, its installment rows, and any attached outcome record
//! commit together or not at all. `update` replaces the installment rows
//! wholesale and inserts outcome records with `ON CONFLICT DO NOTHING`;
//! once written, a cancel/reversal record is never touched again.

use async_trait::async_trait;
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use debtbook_core::repository::{DebtPage, DebtRepository, RepositoryError, RepositoryResult};
use debtbook_core::{CancelInfo, Debt, DebtStatus, Installment, Money, ReversalInfo, SearchQuery};

/// Repository for debt database operations.
#[derive(Debug, Clone)]
pub struct SqliteDebtRepository {
    pool: SqlitePool,
}

impl SqliteDebtRepository {
    /// Creates a new SqliteDebtRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SqliteDebtRepository { pool }
    }

    // -------------------------------------------------------------------------
    // Writes
    // -------------------------------------------------------------------------

    async fn save_inner(&self, debt: &Debt) -> DbResult<()> {
        debug!(id = %debt.id, installments = debt.installments.len(), "Inserting debt");

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO debts (
                id, description, total_value_cents, due_date,
                installments_quantity, user_client_id,
                product_ids, service_ids,
                status, debt_date, finished_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
        )
        .bind(debt.id.to_string())
        .bind(&debt.description)
        .bind(debt.total_value.cents())
        .bind(debt.due_date)
        .bind(debt.installments_quantity)
        .bind(debt.user_client_id.to_string())
        .bind(encode_ids(&debt.product_ids))
        .bind(encode_ids(&debt.service_ids))
        .bind(debt.status)
        .bind(debt.debt_date)
        .bind(debt.finished_at)
        .execute(tx.as_mut())
        .await?;

        insert_installments(&mut tx, debt).await?;
        insert_outcome_records(&mut tx, debt).await?;

        tx.commit().await?;
        Ok(())
    }

    async fn update_inner(&self, debt: &Debt) -> DbResult<()> {
        debug!(id = %debt.id, status = %debt.status, "Updating debt");

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE debts SET
                description = ?2,
                total_value_cents = ?3,
                due_date = ?4,
                installments_quantity = ?5,
                user_client_id = ?6,
                product_ids = ?7,
                service_ids = ?8,
                status = ?9,
                debt_date = ?10,
                finished_at = ?11
            WHERE id = ?1
            "#,
        )
        .bind(debt.id.to_string())
        .bind(&debt.description)
        .bind(debt.total_value.cents())
        .bind(debt.due_date)
        .bind(debt.installments_quantity)
        .bind(debt.user_client_id.to_string())
        .bind(encode_ids(&debt.product_ids))
        .bind(encode_ids(&debt.service_ids))
        .bind(debt.status)
        .bind(debt.debt_date)
        .bind(debt.finished_at)
        .execute(tx.as_mut())
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Debt", debt.id.to_string()));
        }

        // Replace the schedule wholesale; installments have no life of
        // their own outside the aggregate
        sqlx::query("DELETE FROM installments WHERE debt_id = ?1")
            .bind(debt.id.to_string())
            .execute(tx.as_mut())
            .await?;

        insert_installments(&mut tx, debt).await?;
        insert_outcome_records(&mut tx, debt).await?;

        tx.commit().await?;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    async fn get_debt_inner(&self, debt_id: Uuid) -> DbResult<Option<Debt>> {
        let row: Option<DebtRow> = sqlx::query_as(
            r#"
            SELECT
                id, description, total_value_cents, due_date,
                installments_quantity, user_client_id,
                product_ids, service_ids,
                status, debt_date, finished_at
            FROM debts
            WHERE id = ?1
            "#,
        )
        .bind(debt_id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(self.assemble(row).await?)),
            None => Ok(None),
        }
    }

    async fn client_user_debts_inner(&self, client_id: Uuid) -> DbResult<Vec<Debt>> {
        let rows: Vec<DebtRow> = sqlx::query_as(
            r#"
            SELECT
                id, description, total_value_cents, due_date,
                installments_quantity, user_client_id,
                product_ids, service_ids,
                status, debt_date, finished_at
            FROM debts
            WHERE user_client_id = ?1
            ORDER BY debt_date
            "#,
        )
        .bind(client_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        let mut debts = Vec::with_capacity(rows.len());
        for row in rows {
            debts.push(self.assemble(row).await?);
        }
        Ok(debts)
    }

    async fn debt_installments_inner(&self, debt_id: Uuid) -> DbResult<Vec<Installment>> {
        let rows: Vec<InstallmentRow> = sqlx::query_as(
            r#"
            SELECT
                id, description, value_cents, due_date, deb_date,
                status, payment_date, payment_method, number
            FROM installments
            WHERE debt_id = ?1
            ORDER BY number
            "#,
        )
        .bind(debt_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Installment::try_from).collect()
    }

    async fn get_debts_inner(&self, query: &SearchQuery) -> DbResult<DebtPage> {
        let like = format!("%{}%", query.term_search);

        let total_records: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM debts WHERE description LIKE ?1")
                .bind(&like)
                .fetch_one(&self.pool)
                .await?;

        // Sort column/direction are interpolated, so they go through a
        // whitelist, never straight from the request
        let sql = format!(
            r#"
            SELECT
                id, description, total_value_cents, due_date,
                installments_quantity, user_client_id,
                product_ids, service_ids,
                status, debt_date, finished_at
            FROM debts
            WHERE description LIKE ?1
            ORDER BY {} {}
            LIMIT ?2 OFFSET ?3
            "#,
            sort_column(&query.sort_field),
            sort_direction(&query.sort_direction),
        );

        let rows: Vec<DebtRow> = sqlx::query_as(&sql)
            .bind(&like)
            .bind(query.limit as i64)
            .bind(query.offset() as i64)
            .fetch_all(&self.pool)
            .await?;

        let mut data = Vec::with_capacity(rows.len());
        for row in rows {
            data.push(self.assemble(row).await?);
        }

        Ok(DebtPage {
            total_records,
            data,
        })
    }

    /// Loads the owned parts of the aggregate and converts the row.
    async fn assemble(&self, row: DebtRow) -> DbResult<Debt> {
        let debt_id: Uuid = parse_id("debts", &row.id)?;

        let installments = self.debt_installments_inner(debt_id).await?;

        let cancel_row: Option<CancelInfoRow> = sqlx::query_as(
            "SELECT reason, cancel_date, cancelled_by FROM cancel_info WHERE debt_id = ?1",
        )
        .bind(&row.id)
        .fetch_optional(&self.pool)
        .await?;

        let reversal_row: Option<ReversalInfoRow> = sqlx::query_as(
            r#"
            SELECT reason, reversal_date, reversed_by,
                   reversed_installment_qtd, cancelled_installment_qtd
            FROM reversal_info
            WHERE debt_id = ?1
            "#,
        )
        .bind(&row.id)
        .fetch_optional(&self.pool)
        .await?;

        let mut debt = Debt::try_from(row)?;
        debt.installments = installments;
        debt.cancel_info = cancel_row.map(CancelInfo::try_from).transpose()?;
        debt.reversal_info = reversal_row.map(ReversalInfo::try_from).transpose()?;

        Ok(debt)
    }
}

// =============================================================================
// Contract Implementation
// =============================================================================

#[async_trait]
impl DebtRepository for SqliteDebtRepository {
    async fn save(&self, debt: &Debt) -> RepositoryResult<()> {
        self.save_inner(debt).await.map_err(RepositoryError::from)
    }

    async fn update(&self, debt: &Debt) -> RepositoryResult<()> {
        self.update_inner(debt).await.map_err(RepositoryError::from)
    }

    async fn get_debt(&self, debt_id: Uuid) -> RepositoryResult<Option<Debt>> {
        self.get_debt_inner(debt_id)
            .await
            .map_err(RepositoryError::from)
    }

    async fn client_user_debts(&self, client_id: Uuid) -> RepositoryResult<Vec<Debt>> {
        self.client_user_debts_inner(client_id)
            .await
            .map_err(RepositoryError::from)
    }

    async fn debt_installments(&self, debt_id: Uuid) -> RepositoryResult<Vec<Installment>> {
        self.debt_installments_inner(debt_id)
            .await
            .map_err(RepositoryError::from)
    }

    async fn get_debts(&self, query: &SearchQuery) -> RepositoryResult<DebtPage> {
        self.get_debts_inner(query)
            .await
            .map_err(RepositoryError::from)
    }
}

// =============================================================================
// Write Helpers
// =============================================================================

async fn insert_installments(tx: &mut Transaction<'_, Sqlite>, debt: &Debt) -> DbResult<()> {
    for installment in &debt.installments {
        sqlx::query(
            r#"
            INSERT INTO installments (
                id, debt_id, description, value_cents, due_date,
                deb_date, status, payment_date, payment_method, number
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
        )
        .bind(installment.id.to_string())
        .bind(debt.id.to_string())
        .bind(&installment.description)
        .bind(installment.value.cents())
        .bind(installment.due_date)
        .bind(installment.deb_date)
        .bind(installment.status)
        .bind(installment.payment_date)
        .bind(&installment.payment_method)
        .bind(installment.number)
        .execute(tx.as_mut())
        .await?;
    }

    Ok(())
}

/// Outcome records are insert-once: a row already present for the debt is
/// left exactly as it was written.
async fn insert_outcome_records(tx: &mut Transaction<'_, Sqlite>, debt: &Debt) -> DbResult<()> {
    if let Some(cancel_info) = &debt.cancel_info {
        sqlx::query(
            r#"
            INSERT INTO cancel_info (id, debt_id, reason, cancel_date, cancelled_by)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT (debt_id) DO NOTHING
            "#,
        )
        .bind(Uuid::now_v7().to_string())
        .bind(debt.id.to_string())
        .bind(&cancel_info.reason)
        .bind(cancel_info.cancel_date)
        .bind(cancel_info.cancelled_by.to_string())
        .execute(tx.as_mut())
        .await?;
    }

    if let Some(reversal_info) = &debt.reversal_info {
        sqlx::query(
            r#"
            INSERT INTO reversal_info (
                id, debt_id, reason, reversal_date, reversed_by,
                reversed_installment_qtd, cancelled_installment_qtd
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ON CONFLICT (debt_id) DO NOTHING
            "#,
        )
        .bind(Uuid::now_v7().to_string())
        .bind(debt.id.to_string())
        .bind(&reversal_info.reason)
        .bind(reversal_info.reversal_date)
        .bind(reversal_info.reversed_by.to_string())
        .bind(reversal_info.reversed_installment_qtd)
        .bind(reversal_info.cancelled_installment_qtd)
        .execute(tx.as_mut())
        .await?;
    }

    Ok(())
}

// =============================================================================
// Rows and Conversions
// =============================================================================

#[derive(sqlx::FromRow)]
struct DebtRow {
    id: String,
    description: String,
    total_value_cents: i64,
    due_date: Option<chrono::NaiveDate>,
    installments_quantity: i32,
    user_client_id: String,
    product_ids: String,
    service_ids: String,
    status: DebtStatus,
    debt_date: chrono::DateTime<chrono::Utc>,
    finished_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(sqlx::FromRow)]
struct InstallmentRow {
    id: String,
    description: String,
    value_cents: i64,
    due_date: Option<chrono::NaiveDate>,
    deb_date: chrono::DateTime<chrono::Utc>,
    status: DebtStatus,
    payment_date: Option<chrono::DateTime<chrono::Utc>>,
    payment_method: String,
    number: i32,
}

#[derive(sqlx::FromRow)]
struct CancelInfoRow {
    reason: String,
    cancel_date: chrono::DateTime<chrono::Utc>,
    cancelled_by: String,
}

#[derive(sqlx::FromRow)]
struct ReversalInfoRow {
    reason: String,
    reversal_date: chrono::DateTime<chrono::Utc>,
    reversed_by: String,
    reversed_installment_qtd: i32,
    cancelled_installment_qtd: i32,
}

fn parse_id(entity: &'static str, id: &str) -> DbResult<Uuid> {
    Uuid::parse_str(id).map_err(|_| DbError::corrupt(entity, format!("bad id: {id}")))
}

fn encode_ids(ids: &[Uuid]) -> String {
    let strings: Vec<String> = ids.iter().map(Uuid::to_string).collect();
    serde_json::to_string(&strings).unwrap_or_else(|_| "[]".to_string())
}

fn decode_ids(entity: &'static str, raw: &str) -> DbResult<Vec<Uuid>> {
    let strings: Vec<String> = serde_json::from_str(raw)
        .map_err(|_| DbError::corrupt(entity, format!("bad id list: {raw}")))?;
    strings.iter().map(|id| parse_id(entity, id)).collect()
}

impl TryFrom<DebtRow> for Debt {
    type Error = DbError;

    fn try_from(row: DebtRow) -> DbResult<Self> {
        Ok(Debt {
            id: parse_id("debts", &row.id)?,
            description: row.description,
            total_value: Money::from_cents(row.total_value_cents),
            due_date: row.due_date,
            installments_quantity: row.installments_quantity,
            debt_date: row.debt_date,
            status: row.status,
            user_client_id: parse_id("debts", &row.user_client_id)?,
            product_ids: decode_ids("debts", &row.product_ids)?,
            service_ids: decode_ids("debts", &row.service_ids)?,
            installments: Vec::new(),
            cancel_info: None,
            reversal_info: None,
            finished_at: row.finished_at,
        })
    }
}

impl TryFrom<InstallmentRow> for Installment {
    type Error = DbError;

    fn try_from(row: InstallmentRow) -> DbResult<Self> {
        Ok(Installment {
            id: parse_id("installments", &row.id)?,
            description: row.description,
            value: Money::from_cents(row.value_cents),
            due_date: row.due_date,
            deb_date: row.deb_date,
            status: row.status,
            payment_date: row.payment_date,
            payment_method: row.payment_method,
            number: row.number,
        })
    }
}

impl TryFrom<CancelInfoRow> for CancelInfo {
    type Error = DbError;

    fn try_from(row: CancelInfoRow) -> DbResult<Self> {
        Ok(CancelInfo {
            reason: row.reason,
            cancel_date: row.cancel_date,
            cancelled_by: parse_id("cancel_info", &row.cancelled_by)?,
        })
    }
}

impl TryFrom<ReversalInfoRow> for ReversalInfo {
    type Error = DbError;

    fn try_from(row: ReversalInfoRow) -> DbResult<Self> {
        Ok(ReversalInfo {
            reason: row.reason,
            reversal_date: row.reversal_date,
            reversed_by: parse_id("reversal_info", &row.reversed_by)?,
            reversed_installment_qtd: row.reversed_installment_qtd,
            cancelled_installment_qtd: row.cancelled_installment_qtd,
        })
    }
}

// =============================================================================
// Query Fragments
// =============================================================================

/// Whitelisted ORDER BY columns; anything unknown falls back to debt_date.
fn sort_column(field: &str) -> &'static str {
    match field {
        "due_date" => "due_date",
        "total_value" => "total_value_cents",
        "description" => "description",
        _ => "debt_date",
    }
}

fn sort_direction(direction: &str) -> &'static str {
    if direction.eq_ignore_ascii_case("asc") {
        "ASC"
    } else {
        "DESC"
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
