//! # Validation Module
//!
//! Field-level validation results for the Debt aggregate.
//!
//! ## Validation Strategy
//! `Debt::validate` runs every check and collects every failure instead of
//! short-circuiting on the first one. Callers (form UIs in particular) get
//! the complete picture in a single round trip, so tests assert the full
//! set of failures, not just "an error happened".

use serde::{Deserialize, Serialize};

/// A single failed field check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// The offending field, in the DTO's camelCase spelling.
    pub field: String,
    /// Fixed, user-facing message for this failure.
    pub message: String,
}

impl ValidationError {
    /// Creates a new field error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// The collected outcome of running all validation checks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors {
    pub errors: Vec<ValidationError>,
}

impl ValidationErrors {
    /// Creates an empty (valid) result.
    pub fn new() -> Self {
        ValidationErrors::default()
    }

    /// Records a failed check.
    pub fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// True when every check passed.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of failed checks.
    pub fn len(&self) -> usize {
        self.errors.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collects_in_order() {
        let mut errors = ValidationErrors::new();
        assert!(errors.is_empty());

        errors.push(ValidationError::new("totalValue", "first"));
        errors.push(ValidationError::new("dueDate", "second"));

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.errors[0].field, "totalValue");
        assert_eq!(errors.errors[1].field, "dueDate");
    }

    #[test]
    fn test_serializes_as_field_message_pairs() {
        let mut errors = ValidationErrors::new();
        errors.push(ValidationError::new("userClientId", "userClientId is required"));

        let json = serde_json::to_string(&errors).unwrap();
        assert_eq!(
            json,
            "{\"errors\":[{\"field\":\"userClientId\",\"message\":\"userClientId is required\"}]}"
        );
    }
}
