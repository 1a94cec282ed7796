// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request-shape validation.
//!
//! Field contents are validated by the domain value objects; this module
//! covers what the domain never sees: identifiers, role names and blank
//! free-text fields.

use std::str::FromStr;

use chargewatch_domain::{
    AssigneeRole, Category, NewReport, PostalCode, ReportDescription, Severity,
};
use thiserror::Error;

use crate::auth::Role;
use crate::error::{ApiError, translate_domain_error};
use crate::request_response::{CreateStationRequest, ReportMalfunctionRequest};

/// Request-shape errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    /// A free-text field is empty or only whitespace.
    #[error("{field} must not be blank")]
    Blank { field: &'static str },

    /// An identifier is zero or negative.
    #[error("{field} must be a positive identifier, got {value}")]
    NonPositiveId { field: &'static str, value: i64 },

    /// The role name is not one of the known roles.
    #[error("Unknown role '{0}': expected user, admin or operator")]
    UnknownRole(String),

    /// The role exists but never owns reports.
    #[error("Role '{0}' does not own reports: expected admin or operator")]
    NotAnAssigneeRole(String),
}

impl RequestError {
    /// The request field the error refers to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::Blank { field } | Self::NonPositiveId { field, .. } => field,
            Self::UnknownRole(_) | Self::NotAnAssigneeRole(_) => "role",
        }
    }
}

impl From<RequestError> for ApiError {
    fn from(err: RequestError) -> Self {
        Self::InvalidInput {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

/// Parses a role name, case-insensitively.
///
/// # Errors
///
/// Returns `RequestError::UnknownRole` for anything but user, admin or
/// operator.
pub fn parse_role(value: &str) -> Result<Role, RequestError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "user" => Ok(Role::User),
        "admin" => Ok(Role::Admin),
        "operator" => Ok(Role::Operator),
        _ => Err(RequestError::UnknownRole(value.to_string())),
    }
}

/// Parses the role of an assignee pool.
///
/// # Errors
///
/// Returns an error if the role is unknown or is `user`.
pub fn parse_assignee_role(value: &str) -> Result<AssigneeRole, RequestError> {
    parse_role(value)?
        .assignee_role()
        .ok_or_else(|| RequestError::NotAnAssigneeRole(value.to_string()))
}

/// Rejects zero and negative identifiers.
///
/// # Errors
///
/// Returns `RequestError::NonPositiveId` if `value` is not positive.
pub const fn require_id(field: &'static str, value: i64) -> Result<i64, RequestError> {
    if value > 0 {
        Ok(value)
    } else {
        Err(RequestError::NonPositiveId { field, value })
    }
}

/// Trims a free-text field and rejects it if nothing is left.
///
/// # Errors
///
/// Returns `RequestError::Blank` if the trimmed value is empty.
pub fn require_text<'a>(field: &'static str, value: &'a str) -> Result<&'a str, RequestError> {
    let trimmed: &str = value.trim();
    if trimmed.is_empty() {
        Err(RequestError::Blank { field })
    } else {
        Ok(trimmed)
    }
}

/// Builds a candidate report from raw request fields.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` naming the first invalid field.
pub fn validate_report_request(
    request: &ReportMalfunctionRequest,
    user_id: i64,
) -> Result<NewReport, ApiError> {
    let station_id: i64 = require_id("station_id", request.station_id)?;
    let description: ReportDescription =
        ReportDescription::new(&request.description).map_err(translate_domain_error)?;
    let severity: Severity = Severity::from_str(&request.severity.trim().to_ascii_lowercase())
        .map_err(translate_domain_error)?;
    let category: Category = Category::from_str(&request.category.trim().to_ascii_lowercase())
        .map_err(translate_domain_error)?;

    Ok(NewReport::new(station_id, description, severity, category, user_id))
}

/// Validated fields of a station registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedStation {
    pub station_id: i64,
    pub postal_code: PostalCode,
    pub street: String,
    pub district: String,
}

/// Validates a station registration.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` naming the first invalid field.
pub fn validate_station_request(
    request: &CreateStationRequest,
) -> Result<ValidatedStation, ApiError> {
    Ok(ValidatedStation {
        station_id: require_id("station_id", request.station_id)?,
        postal_code: PostalCode::new(&request.postal_code).map_err(translate_domain_error)?,
        street: require_text("street", &request.street)?.to_string(),
        district: require_text("district", &request.district)?.to_string(),
    })
}
