//! # debtbook-db: Database Layer for debtbook
//!
//! This crate provides database access for debtbook. It uses SQLite for
//! storage with sqlx for async operations, and implements the persistence
//! contracts defined in debtbook-core.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        debtbook Data Flow                               │
//! │                                                                         │
//! │  DebtService (debtbook-core)                                           │
//! │       │  via the DebtRepository / ClientReader contracts               │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    debtbook-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories  │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │   (debt.rs,    │    │  (embedded)  │  │   │
//! │  │   │               │    │   client.rs)   │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ whole-aggregate│    │ 001_initial_ │  │   │
//! │  │   │ WAL, FK on    │    │ transactions   │    │ schema.sql   │  │   │
//! │  │   └───────────────┘    └────────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database file                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (debt, client)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use debtbook_core::DebtService;
//! use debtbook_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/debtbook.db")).await?;
//! let service = DebtService::new(db.debts(), db.clients());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::DbError;
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::client::ClientRepository;
pub use repository::debt::SqliteDebtRepository;
