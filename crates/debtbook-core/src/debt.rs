//! # Debt Aggregate
//!
//! The aggregate root of the system: a `Debt` together with the
//! `Installment`s it owns and the outcome records attached when it is
//! canceled or reversed. One consistency boundary: every lifecycle rule is
//! enforced here, on in-memory state, with no I/O.
//!
//! ## Lifecycle Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Debt Lifecycle Operations                           │
//! │                                                                         │
//! │  create (service) ──► validate() ──► generate_installments()           │
//! │                                            │                            │
//! │                                            ▼                            │
//! │                                   Debt { Pending }                      │
//! │                                    │       │       │                    │
//! │             pay_installment() ◄────┘       │       └────► reverse()     │
//! │                    │                   cancel()               │         │
//! │                    ▼                       │                  ▼         │
//! │        all paid? ──► Paid              Canceled           Reversed      │
//! │        (finished_at set)           (finished_at set)  (finished_at set) │
//! │                                                                         │
//! │  Every operation checks ALL its preconditions before touching state:   │
//! │  a failed call never leaves a partial mutation behind.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Debts are never deleted. Cancellation and reversal keep the full
//! installment history and record what happened in `CancelInfo` /
//! `ReversalInfo` side-records.

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DebtError, DebtResult};
use crate::money::Money;
use crate::status::DebtStatus;
use crate::validation::{ValidationError, ValidationErrors};

// =============================================================================
// Installment
// =============================================================================

/// One scheduled partial payment of a debt.
///
/// Owned exclusively by its parent `Debt`; it has no lifecycle of its own
/// beyond the sub-state transitions the parent drives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Installment {
    /// Unique identifier (UUID v7).
    pub id: Uuid,

    /// Description carried over from the debt.
    pub description: String,

    /// This installment's share of the debt total.
    pub value: Money,

    /// When this installment falls due. First installment: the debt's due
    /// date; each subsequent one: the previous due date + 30 days.
    pub due_date: Option<NaiveDate>,

    /// Debt creation timestamp, carried for audit.
    pub deb_date: DateTime<Utc>,

    /// Sub-state: Pending → Paid via payment; Pending → Canceled and
    /// Paid → Reversed only via whole-debt cancel/reverse.
    pub status: DebtStatus,

    /// When the installment was paid, if it was.
    pub payment_date: Option<DateTime<Utc>>,

    /// How it was paid (opaque to the core; recorded verbatim).
    pub payment_method: String,

    /// 1-based position in the schedule.
    pub number: i32,
}

// =============================================================================
// Outcome Records
// =============================================================================

/// Immutable record attached when a debt is canceled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CancelInfo {
    pub reason: String,
    pub cancel_date: DateTime<Utc>,
    pub cancelled_by: Uuid,
}

/// Immutable record attached when a debt is reversed.
///
/// The two counters distinguish installments that had already been paid
/// (marked Reversed) from the rest (marked Canceled).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReversalInfo {
    pub reason: String,
    pub reversal_date: DateTime<Utc>,
    pub reversed_by: Uuid,
    pub reversed_installment_qtd: i32,
    pub cancelled_installment_qtd: i32,
}

// =============================================================================
// Operation Inputs
// =============================================================================

/// Payment details for a single installment.
#[derive(Debug, Clone)]
pub struct PaymentInfo {
    pub installment_id: Uuid,
    pub amount: Money,
    pub payment_method: String,
}

/// Cancellation request: why, and on whose authority.
#[derive(Debug, Clone)]
pub struct CancelRequest {
    pub reason: String,
    pub cancelled_by: Uuid,
}

/// Reversal request: why, and on whose authority.
#[derive(Debug, Clone)]
pub struct ReversalRequest {
    pub reason: String,
    pub reversed_by: Uuid,
}

// =============================================================================
// Debt
// =============================================================================

/// A financial obligation owed by a client, split into installments.
///
/// ## Invariants
/// - After generation, installment values sum to `total_value` exactly
///   (integer cents; the final installment absorbs any division remainder)
/// - After generation, installment count equals `installments_quantity`
/// - `cancel_info` / `reversal_info` are set at most once, never rewritten
/// - `finished_at` is set exactly when the debt reaches Paid, Canceled or
///   Reversed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Debt {
    /// Unique identifier (UUID v7: time-ordered, safe to sort as text).
    pub id: Uuid,

    /// What this debt is for.
    pub description: String,

    /// Total amount owed. Must be positive.
    pub total_value: Money,

    /// First due date. Must be strictly in the future at creation.
    pub due_date: Option<NaiveDate>,

    /// Number of installments to split into. Non-positive values are
    /// normalized to 1 by `generate_installments`.
    pub installments_quantity: i32,

    /// When the debt was recorded.
    pub debt_date: DateTime<Utc>,

    /// Lifecycle status.
    pub status: DebtStatus,

    /// The client who owes. Required (non-nil).
    pub user_client_id: Uuid,

    /// Billed products. At least one of product/service ids must be present.
    pub product_ids: Vec<Uuid>,

    /// Billed services.
    pub service_ids: Vec<Uuid>,

    /// The payment schedule, ordered by `number`.
    pub installments: Vec<Installment>,

    /// Set once if the debt is canceled.
    pub cancel_info: Option<CancelInfo>,

    /// Set once if the debt is reversed.
    pub reversal_info: Option<ReversalInfo>,

    /// When the debt reached a terminal outcome (Paid, Canceled, Reversed).
    pub finished_at: Option<DateTime<Utc>>,
}

impl Debt {
    // -------------------------------------------------------------------------
    // Validation
    // -------------------------------------------------------------------------

    /// Runs every field check and collects every failure.
    ///
    /// Does NOT short-circuit: a debt with a non-positive total and a
    /// missing client id reports both problems. An empty result means the
    /// debt is valid.
    pub fn validate(&self) -> ValidationErrors {
        let mut validation_errors = ValidationErrors::new();

        if let Err(error) = self.validate_total_value() {
            validation_errors.push(error);
        }

        if let Err(error) = self.validate_due_date() {
            validation_errors.push(error);
        }

        if let Err(error) = self.validate_service_or_product() {
            validation_errors.push(error);
        }

        if let Err(error) = self.validate_client_id() {
            validation_errors.push(error);
        }

        validation_errors
    }

    fn validate_total_value(&self) -> Result<(), ValidationError> {
        if self.total_value.is_positive() {
            return Ok(());
        }

        Err(ValidationError::new(
            "totalValue",
            "totalValue must be greater than 0",
        ))
    }

    /// Date-only comparison: a due date equal to today's date fails.
    fn validate_due_date(&self) -> Result<(), ValidationError> {
        let Some(due_date) = self.due_date else {
            return Err(ValidationError::new("dueDate", "dueDate is required"));
        };

        if due_date <= Utc::now().date_naive() {
            return Err(ValidationError::new(
                "dueDate",
                "dueDate must be in the future",
            ));
        }

        Ok(())
    }

    fn validate_service_or_product(&self) -> Result<(), ValidationError> {
        if self.product_ids.is_empty() && self.service_ids.is_empty() {
            return Err(ValidationError::new(
                "serviceOrProduct",
                "at least one productId or serviceId is required",
            ));
        }

        Ok(())
    }

    fn validate_client_id(&self) -> Result<(), ValidationError> {
        if self.user_client_id.is_nil() {
            return Err(ValidationError::new(
                "userClientId",
                "userClientId is required",
            ));
        }

        Ok(())
    }

    // -------------------------------------------------------------------------
    // Installment Generation
    // -------------------------------------------------------------------------

    /// Partitions `total_value` into the payment schedule.
    ///
    /// ## Algorithm
    /// 1. A non-positive `installments_quantity` is normalized to 1
    /// 2. Base share = total / quantity in integer cents (floored)
    /// 3. Installment `i` falls due on the debt's due date (`i == 0`) or 30
    ///    calendar days after the previous one
    /// 4. Every installment gets the base share except the LAST, which gets
    ///    `total - sum(previous)` so the schedule sums exactly
    ///
    /// Appends to the schedule, so it must be called exactly once per debt;
    /// the service calls it at creation, after validation.
    pub fn generate_installments(&mut self) {
        if self.installments_quantity <= 0 {
            self.installments_quantity = 1;
        }

        let now = Utc::now();
        let quantity = self.installments_quantity;
        let base_value = self.total_value.split_base(quantity as i64);

        let mut current_due_date = self.due_date;
        let mut total_allocated = Money::zero();

        for i in 0..quantity {
            if i > 0 {
                current_due_date = current_due_date.map(|date| date + Days::new(30));
            }

            let value = if i == quantity - 1 {
                self.total_value - total_allocated
            } else {
                base_value
            };

            self.installments.push(Installment {
                id: Uuid::now_v7(),
                description: self.description.clone(),
                value,
                due_date: current_due_date,
                deb_date: now,
                status: DebtStatus::Pending,
                payment_date: None,
                payment_method: String::new(),
                number: i + 1,
            });

            total_allocated += value;
        }
    }

    // -------------------------------------------------------------------------
    // Payment
    // -------------------------------------------------------------------------

    /// Pays a single installment.
    ///
    /// Preconditions, in order: the debt is Pending; the installment exists;
    /// the installment is Pending; the offered amount covers the installment
    /// value (overpayment is accepted, underpayment is not).
    ///
    /// On success the installment becomes Paid with its payment date and
    /// method recorded, and the debt itself becomes Paid (with `finished_at`
    /// set) once every installment is Paid.
    pub fn pay_installment(&mut self, payment_info: &PaymentInfo) -> DebtResult<()> {
        if self.status != DebtStatus::Pending {
            return Err(DebtError::DebtNotPending);
        }

        // iter_mut: the stored installment is updated in place, never a copy
        let installment = self
            .installments
            .iter_mut()
            .find(|installment| installment.id == payment_info.installment_id)
            .ok_or(DebtError::InstallmentNotFound)?;

        if installment.status != DebtStatus::Pending {
            return Err(DebtError::InstallmentNotPending);
        }

        if payment_info.amount < installment.value {
            return Err(DebtError::AmountMismatch);
        }

        installment.status = DebtStatus::Paid;
        installment.payment_date = Some(Utc::now());
        installment.payment_method = payment_info.payment_method.clone();

        self.refresh_status();

        Ok(())
    }

    // -------------------------------------------------------------------------
    // Cancellation
    // -------------------------------------------------------------------------

    /// Cancels the whole debt before anything was paid.
    ///
    /// Preconditions: the debt is Pending and no installment is Paid. A
    /// single paid installment blocks cancellation (reversal is the
    /// operation for that case).
    ///
    /// On success every installment is forced to Canceled regardless of its
    /// prior state, and the cancellation is recorded in `cancel_info`.
    pub fn cancel(&mut self, request: &CancelRequest) -> DebtResult<()> {
        if self.status != DebtStatus::Pending {
            return Err(DebtError::DebtNotPending);
        }

        if self.has_paid_installment() {
            return Err(DebtError::PaidInstallments);
        }

        let now = Utc::now();

        self.status = DebtStatus::Canceled;
        self.finished_at = Some(now);
        self.cancel_info = Some(CancelInfo {
            reason: request.reason.clone(),
            cancel_date: now,
            cancelled_by: request.cancelled_by,
        });

        for installment in self.installments.iter_mut() {
            installment.status = DebtStatus::Canceled;
        }

        Ok(())
    }

    // -------------------------------------------------------------------------
    // Reversal
    // -------------------------------------------------------------------------

    /// Unwinds the debt after some or all installments were paid.
    ///
    /// Preconditions: the debt is not already Canceled or Reversed, and no
    /// reversal record is attached yet (a second reversal is rejected).
    ///
    /// Each Paid installment becomes Reversed, every other becomes Canceled;
    /// both counts are recorded in `reversal_info`.
    pub fn reverse(&mut self, request: &ReversalRequest) -> DebtResult<()> {
        if self.status == DebtStatus::Canceled || self.status == DebtStatus::Reversed {
            return Err(DebtError::AlreadyClosed);
        }

        if self.reversal_info.is_some() {
            return Err(DebtError::AlreadyReversed);
        }

        let now = Utc::now();

        self.status = DebtStatus::Reversed;
        self.finished_at = Some(now);

        let mut reversed_installment_qtd = 0;
        let mut cancelled_installment_qtd = 0;

        for installment in self.installments.iter_mut() {
            if installment.status == DebtStatus::Paid {
                installment.status = DebtStatus::Reversed;
                reversed_installment_qtd += 1;
                continue;
            }

            installment.status = DebtStatus::Canceled;
            cancelled_installment_qtd += 1;
        }

        self.reversal_info = Some(ReversalInfo {
            reason: request.reason.clone(),
            reversal_date: now,
            reversed_by: request.reversed_by,
            reversed_installment_qtd,
            cancelled_installment_qtd,
        });

        Ok(())
    }

    // -------------------------------------------------------------------------
    // Internal
    // -------------------------------------------------------------------------

    /// After a payment, promotes the debt to Paid once the whole schedule is
    /// settled. A partial schedule leaves the debt Pending.
    fn refresh_status(&mut self) {
        let all_paid = self
            .installments
            .iter()
            .all(|installment| installment.status == DebtStatus::Paid);

        if !all_paid {
            return;
        }

        self.status = DebtStatus::Paid;
        self.finished_at = Some(Utc::now());
    }

    fn has_paid_installment(&self) -> bool {
        self.installments
            .iter()
            .any(|installment| installment.status == DebtStatus::Paid)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
