//! # debtbook-core: Pure Business Logic for debtbook
//!
//! This crate is the **heart** of debtbook. It contains the debt lifecycle
//! state machine and everything around it as pure logic with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       debtbook Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Transport (external collaborator)               │   │
//! │  │        command DTOs in ──► response envelopes out              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ debtbook-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌────────────┐ │   │
//! │  │   │   debt    │  │   money   │  │  service  │  │ repository │ │   │
//! │  │   │ aggregate │  │   Money   │  │DebtService│  │ contracts  │ │   │
//! │  │   │ lifecycle │  │  (cents)  │  │ envelopes │  │  (traits)  │ │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └────────────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO DATABASE • NO NETWORK • DETERMINISTIC RULES               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 debtbook-db (Database Layer)                    │   │
//! │  │        SQLite implementations of the repository contracts       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  Dependency direction is one-way: the aggregate never calls the        │
//! │  service, the service never learns which repository it talks to.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`debt`] - The Debt aggregate: validation, installment generation, and
//!   all state transitions (payment, cancellation, reversal)
//! - [`money`] - Money type with integer-cents arithmetic (no floating point!)
//! - [`status`] - The closed Pending/Paid/Canceled/Reversed enumeration
//! - [`error`] - Domain error types with the verbatim user-facing messages
//! - [`validation`] - Collected field-level validation failures
//! - [`dto`] - Transport DTOs and the `{status, message, data}` envelope
//! - [`paginate`] - Page requests and derived search queries
//! - [`repository`] - Persistence contracts the service consumes
//! - [`memory`] - In-memory contract implementations (tests, harnesses)
//! - [`service`] - The DebtService orchestrating aggregate and repository

// =============================================================================
// Module Declarations
// =============================================================================

pub mod debt;
pub mod dto;
pub mod error;
pub mod memory;
pub mod money;
pub mod paginate;
pub mod repository;
pub mod service;
pub mod status;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use debtbook_core::Debt` instead of
// `use debtbook_core::debt::Debt`

pub use debt::{
    CancelInfo, CancelRequest, Debt, Installment, PaymentInfo, ReversalInfo, ReversalRequest,
};
pub use dto::{
    CancelInfoDto, DebtDto, InstallmentDto, PageResult, PaymentInfoDto, ResponseData,
    ResponseStatus, ReversalInfoDto, ServiceResponse,
};
pub use error::{DebtError, DebtResult};
pub use money::Money;
pub use paginate::{PageRequest, SearchQuery};
pub use repository::{ClientReader, DebtPage, DebtRepository, RepositoryError, RepositoryResult};
pub use service::DebtService;
pub use status::DebtStatus;
pub use validation::{ValidationError, ValidationErrors};
