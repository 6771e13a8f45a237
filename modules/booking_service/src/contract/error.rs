//! Contract error types for the booking service
//!
//! These errors are transport-agnostic; the REST layer decides how each
//! variant is presented.

use super::model::EntityKind;
use std::collections::BTreeMap;

/// Field-level validation failures, keyed by form field name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: BTreeMap<String, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a reason for `field`; the first reason per field wins
    pub fn add(&mut self, field: impl Into<String>, reason: impl Into<String>) {
        self.fields.entry(field.into()).or_insert_with(|| reason.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `Ok(value)` when nothing was recorded
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .fields
            .iter()
            .map(|(field, reason)| format!("{field}: {reason}"))
            .collect();
        f.write_str(&parts.join(", "))
    }
}

/// Booking service domain errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingError {
    /// Requested row does not exist
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: i32 },

    /// Submitted form failed validation
    #[error("Validation error: {0}")]
    Validation(ValidationErrors),

    /// A show referenced a venue or artist that does not exist
    #[error("{kind} {id} referenced by show does not exist")]
    MissingReference { kind: EntityKind, id: i32 },

    /// Storage rejected or failed the operation
    #[error("Persistence error")]
    Persistence,

    /// Internal error
    #[error("Internal error")]
    Internal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_keep_first_reason() {
        let mut errors = ValidationErrors::new();
        errors.add("name", "This field is required.");
        errors.add("name", "Too long.");
        errors.add("phone", "Invalid phone number.");

        assert_eq!(errors.get("name"), Some("This field is required."));
        assert_eq!(errors.iter().count(), 2);
        assert!(errors.into_result(()).is_err());
    }

    #[test]
    fn test_empty_validation_errors_pass_value_through() {
        assert_eq!(ValidationErrors::new().into_result(7), Ok(7));
    }

    #[test]
    fn test_error_display() {
        let err = BookingError::NotFound {
            kind: EntityKind::Venue,
            id: 42,
        };
        assert_eq!(err.to_string(), "Venue not found: 42");
    }
}
