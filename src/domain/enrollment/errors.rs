//! Enrollment-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | NotFound | 404 |
//! | Validation | 400 |

use crate::domain::foundation::{DomainError, EnrollmentId, ErrorCode, ValidationError};

/// Enrollment-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnrollmentError {
    /// Enrollment was not found.
    NotFound(EnrollmentId),

    /// A field failed its constraint.
    Validation(ValidationError),
}

impl EnrollmentError {
    pub fn not_found(id: EnrollmentId) -> Self {
        EnrollmentError::NotFound(id)
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            EnrollmentError::NotFound(_) => ErrorCode::EnrollmentNotFound,
            EnrollmentError::Validation(_) => ErrorCode::ValidationFailed,
        }
    }

    /// Returns a user-friendly error message.
    pub fn message(&self) -> String {
        match self {
            EnrollmentError::NotFound(id) => format!("Enrollment not found: {}", id),
            EnrollmentError::Validation(err) => err.to_string(),
        }
    }
}

impl std::fmt::Display for EnrollmentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for EnrollmentError {}

impl From<ValidationError> for EnrollmentError {
    fn from(err: ValidationError) -> Self {
        EnrollmentError::Validation(err)
    }
}

impl From<EnrollmentError> for DomainError {
    fn from(err: EnrollmentError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_carries_the_enrollment_id() {
        let id = EnrollmentId::new();
        let err = EnrollmentError::not_found(id);
        assert_eq!(err.code(), ErrorCode::EnrollmentNotFound);
        assert!(err.message().contains(&id.to_string()));
    }

    #[test]
    fn validation_errors_convert_in() {
        let err: EnrollmentError = ValidationError::not_positive("amount_paid").into();
        assert_eq!(err.code(), ErrorCode::ValidationFailed);
        assert!(err.message().contains("amount_paid"));
    }

    #[test]
    fn converts_to_domain_error() {
        let err = EnrollmentError::not_found(EnrollmentId::new());
        let domain_err: DomainError = err.clone().into();
        assert_eq!(domain_err.code, err.code());
    }

    #[test]
    fn display_matches_message() {
        let err = EnrollmentError::not_found(EnrollmentId::new());
        assert_eq!(format!("{}", err), err.message());
    }
}
