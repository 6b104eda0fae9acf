//! # Debt Status
//!
//! The closed status enumeration shared by debts and their installments.
//!
//! ## Why Strings Across Boundaries?
//! The status crosses two serialization boundaries (JSON and SQL). Both use
//! the stable lowercase string form, never the ordinal value, which would
//! silently change meaning if variants were ever reordered.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lifecycle status of a debt, and independently of each installment.
///
/// ## State Machine
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────┐
/// │  Debt:         Pending ──pay all──► Paid ──reverse──► Reversed     │
/// │                   │  └──reverse───────────────────────────┘        │
/// │                   └──cancel──► Canceled                            │
/// │                                                                     │
/// │  Installment:  Pending ──pay──► Paid ──debt reverse──► Reversed    │
/// │                   └──debt cancel/reverse──► Canceled               │
/// └─────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum DebtStatus {
    /// Open: installments may still be paid.
    Pending,
    /// Every installment has been paid.
    Paid,
    /// Terminated before any payment; all installments voided.
    Canceled,
    /// Unwound after payment; paid installments marked reversed.
    Reversed,
}

impl DebtStatus {
    /// Returns the stable lowercase string form.
    pub const fn as_str(&self) -> &'static str {
        match self {
            DebtStatus::Pending => "pending",
            DebtStatus::Paid => "paid",
            DebtStatus::Canceled => "canceled",
            DebtStatus::Reversed => "reversed",
        }
    }
}

impl Default for DebtStatus {
    fn default() -> Self {
        DebtStatus::Pending
    }
}

impl fmt::Display for DebtStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse error for unknown status strings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid status: {0}")]
pub struct ParseStatusError(pub String);

impl FromStr for DebtStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(DebtStatus::Pending),
            "paid" => Ok(DebtStatus::Paid),
            "canceled" => Ok(DebtStatus::Canceled),
            "reversed" => Ok(DebtStatus::Reversed),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_round_trip() {
        for status in [
            DebtStatus::Pending,
            DebtStatus::Paid,
            DebtStatus::Canceled,
            DebtStatus::Reversed,
        ] {
            assert_eq!(status.as_str().parse::<DebtStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_unknown_string_rejected() {
        let err = "settled".parse::<DebtStatus>().unwrap_err();
        assert_eq!(err.to_string(), "invalid status: settled");
    }

    #[test]
    fn test_json_uses_lowercase_form() {
        let json = serde_json::to_string(&DebtStatus::Canceled).unwrap();
        assert_eq!(json, "\"canceled\"");

        let back: DebtStatus = serde_json::from_str("\"reversed\"").unwrap();
        assert_eq!(back, DebtStatus::Reversed);
    }

    #[test]
    fn test_default_is_pending() {
        assert_eq!(DebtStatus::default(), DebtStatus::Pending);
    }
}
