//! Plan-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | NotFound | 404 |
//! | DuplicateActivePlan | 409 |
//! | InvalidTransition | 409 |
//! | UnknownType | 400 |
//! | Validation | 400 |

use crate::domain::foundation::{DomainError, ErrorCode, PlanId, ValidationError};

use super::catalog::UnknownPlanType;

/// Plan-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    /// Plan was not found.
    NotFound(PlanId),

    /// An active plan already exists for this client email.
    DuplicateActivePlan { client_email: String },

    /// Attempted activation/deactivation that is a no-op.
    InvalidTransition {
        current: &'static str,
        attempted: &'static str,
    },

    /// Plan type is not in the catalog.
    UnknownType(String),

    /// A field failed its constraint.
    Validation(ValidationError),
}

impl PlanError {
    pub fn not_found(id: PlanId) -> Self {
        PlanError::NotFound(id)
    }

    pub fn duplicate_active_plan(client_email: impl Into<String>) -> Self {
        PlanError::DuplicateActivePlan {
            client_email: client_email.into(),
        }
    }

    pub fn invalid_transition(current: &'static str, attempted: &'static str) -> Self {
        PlanError::InvalidTransition { current, attempted }
    }

    pub fn unknown_type(name: impl Into<String>) -> Self {
        PlanError::UnknownType(name.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            PlanError::NotFound(_) => ErrorCode::PlanNotFound,
            PlanError::DuplicateActivePlan { .. } => ErrorCode::DuplicateActivePlan,
            PlanError::InvalidTransition { .. } => ErrorCode::InvalidStateTransition,
            PlanError::UnknownType(_) => ErrorCode::UnknownPlanType,
            PlanError::Validation(_) => ErrorCode::ValidationFailed,
        }
    }

    /// Returns a user-friendly error message.
    pub fn message(&self) -> String {
        match self {
            PlanError::NotFound(id) => format!("Plan not found: {}", id),
            PlanError::DuplicateActivePlan { client_email } => {
                format!("An active plan already exists for {}", client_email)
            }
            PlanError::InvalidTransition { current, attempted } => {
                format!("Cannot {} a plan that is already {}", attempted, current)
            }
            PlanError::UnknownType(name) => format!("Unknown plan type: {}", name),
            PlanError::Validation(err) => err.to_string(),
        }
    }
}

impl std::fmt::Display for PlanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for PlanError {}

impl From<ValidationError> for PlanError {
    fn from(err: ValidationError) -> Self {
        PlanError::Validation(err)
    }
}

impl From<UnknownPlanType> for PlanError {
    fn from(err: UnknownPlanType) -> Self {
        PlanError::UnknownType(err.0)
    }
}

impl From<PlanError> for DomainError {
    fn from(err: PlanError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}
