//! # Repository Module
//!
//! SQLite implementations of the debtbook-core persistence contracts.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  DebtService (debtbook-core)                                        │
//! │       │                                                             │
//! │       │  dyn DebtRepository / dyn ClientReader                      │
//! │       ▼                                                             │
//! │  SqliteDebtRepository / ClientRepository (this module)              │
//! │       │                                                             │
//! │       │  SQL, transactions, row ↔ domain conversion                │
//! │       ▼                                                             │
//! │  SQLite database                                                   │
//! │                                                                     │
//! │  The service sees only the contract; swapping this module for the  │
//! │  in-memory implementation changes nothing above the trait.         │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`debt::SqliteDebtRepository`] - the debt aggregate store
//! - [`client::ClientRepository`] - client registry and existence checks

pub mod client;
pub mod debt;
