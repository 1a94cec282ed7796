// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use chargewatch::{CoreError, StoreError};
use chargewatch_domain::DomainError;
use chargewatch_persistence::PersistenceError;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// The actor has the right role but the report belongs to someone else.
    NotAssigned {
        /// The action that was attempted.
        action: String,
        /// The report the actor is not assigned to.
        report_id: i64,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::NotAssigned { action, report_id } => {
                write!(f, "Unauthorized: '{action}' on report {report_id} is reserved for its assignee")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the actor does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// Nobody can take the work right now; the request may succeed later.
    ServiceUnavailable {
        /// A human-readable description of what is missing.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::ServiceUnavailable { message } => {
                write!(f, "Service unavailable: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
            AuthError::NotAssigned { .. } => Self::Unauthorized {
                action: err.to_string(),
                required_role: String::from("assigned"),
            },
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidDescription(msg) => invalid("description", msg),
        DomainError::InvalidSeverity(value) => invalid(
            "severity",
            format!("'{value}' must be one of 'low', 'medium', 'high'"),
        ),
        DomainError::InvalidCategory(value) => invalid(
            "category",
            format!("'{value}' must be one of 'hardware', 'software', 'connectivity'"),
        ),
        DomainError::InvalidReportStatus(value) => {
            invalid("status", format!("Unknown report status '{value}'"))
        }
        DomainError::InvalidStationStatus(value) => {
            invalid("station_status", format!("Unknown station status '{value}'"))
        }
        DomainError::InvalidAssigneeRole(value) => {
            invalid("role", format!("Unknown assignee role '{value}'"))
        }
        DomainError::InvalidPostalCode(msg) => invalid("postal_code", msg),
        DomainError::InvalidUsername(msg) => invalid("username", msg),
        DomainError::InvalidStatusTransition { from, to, reason } => {
            ApiError::DomainRuleViolation {
                rule: String::from("report_lifecycle"),
                message: format!("Cannot move report from '{from}' to '{to}': {reason}"),
            }
        }
        DomainError::NoAssigneeAvailable { role } => ApiError::ServiceUnavailable {
            message: format!("No {role} is available to take the report"),
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::NoAssigneeAvailable { role } => ApiError::ServiceUnavailable {
            message: format!("No {role} is available to take the report"),
        },
        CoreError::Store(store_err) => translate_store_error(store_err),
        CoreError::Timestamp(msg) => ApiError::Internal {
            message: format!("Timestamp error: {msg}"),
        },
    }
}

/// Translates a storage seam error into an API error.
#[must_use]
pub fn translate_store_error(err: StoreError) -> ApiError {
    match err {
        StoreError::NotFound(msg) => ApiError::ResourceNotFound {
            resource_type: String::from("Record"),
            message: msg,
        },
        StoreError::Conflict(_)
        | StoreError::Busy(_)
        | StoreError::Rejected(_)
        | StoreError::Unavailable(_) => ApiError::Internal {
            message: err.to_string(),
        },
    }
}

/// Translates a persistence error raised by seeding or read operations.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::UniqueViolation(msg) => ApiError::DomainRuleViolation {
            rule: String::from("unique_identity"),
            message: msg,
        },
        PersistenceError::CheckViolation(msg) => ApiError::InvalidInput {
            field: String::from("request"),
            message: msg,
        },
        PersistenceError::NotFound(msg) => ApiError::ResourceNotFound {
            resource_type: String::from("Record"),
            message: msg,
        },
        PersistenceError::DatabaseBusy(_) => ApiError::ServiceUnavailable {
            message: err.to_string(),
        },
        _ => ApiError::Internal {
            message: err.to_string(),
        },
    }
}

fn invalid(field: &str, message: String) -> ApiError {
    ApiError::InvalidInput {
        field: field.to_string(),
        message,
    }
}
