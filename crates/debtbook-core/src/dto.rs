//! # Data Transfer Objects
//!
//! The field-level contract between the transport layer and the debt
//! service, plus the uniform response envelope every service operation
//! returns.
//!
//! Identifiers and dates travel as strings; monetary values travel as
//! integer cents. The service owns the translation into domain types, and
//! anything unparseable is reported through the envelope; transport code
//! never sees domain types or domain errors.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::debt::{Debt, Installment};
use crate::validation::ValidationErrors;

// =============================================================================
// Inbound / Outbound DTOs
// =============================================================================

/// Debt payload: inbound on creation, outbound on listings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DebtDto {
    /// Set on outbound responses only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub description: String,

    /// Total owed, in cents.
    pub total_value_cents: i64,

    /// Calendar date, `YYYY-MM-DD`.
    pub due_date: String,

    pub installments_quantity: i32,

    pub user_client_id: String,

    #[serde(default)]
    pub product_ids: Vec<String>,

    #[serde(default)]
    pub service_ids: Vec<String>,

    /// Lowercase status string; outbound only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub installments: Vec<InstallmentDto>,

    /// RFC 3339 timestamp; outbound only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debt_date: Option<String>,
}

/// Installment payload, outbound only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallmentDto {
    pub id: String,
    pub description: String,
    /// This installment's share, in cents.
    pub value_cents: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    pub deb_date: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<String>,
    pub payment_method: String,
    pub number: i32,
}

/// Payment command for one installment of one debt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentInfoDto {
    pub debt_id: String,
    pub installment_id: String,
    /// Offered amount, in cents. Must cover the installment value.
    pub amount_cents: i64,
    pub payment_method: String,
}

/// Cancellation command for a whole debt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelInfoDto {
    pub debt_id: String,
    pub reason: String,
    /// Acting party; opaque to the core.
    pub cancelled_by: String,
}

/// Reversal command for a whole debt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReversalInfoDto {
    pub debt_id: String,
    pub reason: String,
    /// Acting party; opaque to the core.
    pub reversed_by: String,
}

// =============================================================================
// Domain → DTO Conversions
// =============================================================================

impl From<&Debt> for DebtDto {
    fn from(debt: &Debt) -> Self {
        DebtDto {
            id: Some(debt.id.to_string()),
            description: debt.description.clone(),
            total_value_cents: debt.total_value.cents(),
            due_date: debt
                .due_date
                .map(|date| date.to_string())
                .unwrap_or_default(),
            installments_quantity: debt.installments_quantity,
            user_client_id: debt.user_client_id.to_string(),
            product_ids: debt.product_ids.iter().map(Uuid::to_string).collect(),
            service_ids: debt.service_ids.iter().map(Uuid::to_string).collect(),
            status: Some(debt.status.to_string()),
            installments: debt.installments.iter().map(InstallmentDto::from).collect(),
            debt_date: Some(debt.debt_date.to_rfc3339()),
        }
    }
}

impl From<&Installment> for InstallmentDto {
    fn from(installment: &Installment) -> Self {
        InstallmentDto {
            id: installment.id.to_string(),
            description: installment.description.clone(),
            value_cents: installment.value.cents(),
            due_date: installment.due_date.map(|date| date.to_string()),
            deb_date: installment.deb_date.to_rfc3339(),
            status: installment.status.to_string(),
            payment_date: installment.payment_date.map(|date| date.to_rfc3339()),
            payment_method: installment.payment_method.clone(),
            number: installment.number,
        }
    }
}

// =============================================================================
// Response Envelope
// =============================================================================

/// Envelope status: exactly "success" or "error" on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

/// Paginated listing payload.
#[derive(Debug, Clone, Serialize)]
pub struct PageResult {
    pub total_records: i64,
    pub data: Vec<DebtDto>,
}

/// The payload a response envelope can carry.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ResponseData {
    Debts(Vec<DebtDto>),
    Installments(Vec<InstallmentDto>),
    Page(PageResult),
    Validation(ValidationErrors),
}

/// Uniform `{status, message, data?}` envelope returned by every service
/// operation. `message` strings are fixed and user-facing: part of the
/// contract, not diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceResponse {
    pub status: ResponseStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ResponseData>,
}

impl ServiceResponse {
    /// Success with no payload.
    pub fn success(message: impl Into<String>) -> Self {
        ServiceResponse {
            status: ResponseStatus::Success,
            message: message.into(),
            data: None,
        }
    }

    /// Success carrying a payload.
    pub fn success_with(message: impl Into<String>, data: ResponseData) -> Self {
        ServiceResponse {
            status: ResponseStatus::Success,
            message: message.into(),
            data: Some(data),
        }
    }

    /// Error with no payload.
    pub fn error(message: impl Into<String>) -> Self {
        ServiceResponse {
            status: ResponseStatus::Error,
            message: message.into(),
            data: None,
        }
    }

    /// Error carrying a payload (structured validation failures).
    pub fn error_with(message: impl Into<String>, data: ResponseData) -> Self {
        ServiceResponse {
            status: ResponseStatus::Error,
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ResponseStatus::Success
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::status::DebtStatus;
    use chrono::{NaiveDate, Utc};

    #[test]
    fn test_envelope_status_serializes_lowercase() {
        let response = ServiceResponse::success("debt created successfully");
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(
            json,
            "{\"status\":\"success\",\"message\":\"debt created successfully\"}"
        );

        let response = ServiceResponse::error("debt not found");
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, "{\"status\":\"error\",\"message\":\"debt not found\"}");
    }

    #[test]
    fn test_debt_dto_from_domain() {
        let mut debt = Debt {
            id: Uuid::now_v7(),
            description: "test debt".to_string(),
            total_value: Money::from_cents(100_000),
            due_date: Some(NaiveDate::from_ymd_opt(2026, 10, 1).unwrap()),
            installments_quantity: 2,
            debt_date: Utc::now(),
            status: DebtStatus::Pending,
            user_client_id: Uuid::now_v7(),
            product_ids: vec![Uuid::now_v7()],
            service_ids: vec![],
            installments: Vec::new(),
            cancel_info: None,
            reversal_info: None,
            finished_at: None,
        };
        debt.generate_installments();

        let dto = DebtDto::from(&debt);
        assert_eq!(dto.id.as_deref(), Some(debt.id.to_string().as_str()));
        assert_eq!(dto.total_value_cents, 100_000);
        assert_eq!(dto.due_date, "2026-10-01");
        assert_eq!(dto.status.as_deref(), Some("pending"));
        assert_eq!(dto.installments.len(), 2);
        assert_eq!(dto.installments[0].number, 1);
        assert_eq!(dto.installments[0].due_date.as_deref(), Some("2026-10-01"));
        assert_eq!(dto.installments[1].due_date.as_deref(), Some("2026-10-31"));
    }

    #[test]
    fn test_validation_errors_travel_under_data() {
        let mut errors = ValidationErrors::new();
        errors.push(crate::validation::ValidationError::new(
            "totalValue",
            "totalValue must be greater than 0",
        ));

        let response =
            ServiceResponse::error_with("validation errors", ResponseData::Validation(errors));
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["status"], "error");
        assert_eq!(json["message"], "validation errors");
        assert_eq!(json["data"]["errors"][0]["field"], "totalValue");
    }
}
