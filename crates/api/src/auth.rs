// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization types and services.

use chargewatch_audit::Actor;
use chargewatch_domain::{AssigneeRole, Report};
use chargewatch_persistence::{Persistence, PersistenceError};

use crate::error::AuthError;

/// Actor roles for authorization.
///
/// The role set is closed; each lifecycle transition belongs to exactly one
/// of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// A registered user. Users report malfunctions and read their own
    /// notifications.
    User,
    /// Admins receive new reports, forward them to operators and seed the
    /// system.
    Admin,
    /// Operators repair stations and resolve the reports forwarded to them.
    Operator,
}

impl Role {
    /// Returns the lowercase role name used in requests and audit records.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
            Self::Operator => "operator",
        }
    }

    /// The assignee pool this role draws from, if any.
    #[must_use]
    pub const fn assignee_role(&self) -> Option<AssigneeRole> {
        match self {
            Self::User => None,
            Self::Admin => Some(AssigneeRole::Admin),
            Self::Operator => Some(AssigneeRole::Operator),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An authenticated actor with an associated role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The user id for `User`, the assignee id otherwise.
    pub id: i64,
    /// The role assigned to this actor.
    pub role: Role,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    #[must_use]
    pub const fn new(id: i64, role: Role) -> Self {
        Self { id, role }
    }

    /// Converts this authenticated actor into an audit Actor.
    #[must_use]
    pub fn to_audit_actor(&self) -> Actor {
        self.role.assignee_role().map_or_else(
            || Actor::user(self.id),
            |assignee_role| Actor::assignee(self.id, assignee_role),
        )
    }
}

/// Resolves claimed identities against registered users and assignees.
///
/// There are no credentials; an identity is accepted if a row with that id
/// exists for the claimed role.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Authenticates an actor by id and role.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::AuthenticationFailed` if no matching identity is
    /// registered, or if the lookup itself fails.
    pub fn authenticate(
        persistence: &mut Persistence,
        actor_id: i64,
        role: Role,
    ) -> Result<AuthenticatedActor, AuthError> {
        let known: bool = match role.assignee_role() {
            None => persistence
                .get_user(actor_id)
                .map_err(lookup_failed)?
                .is_some(),
            Some(assignee_role) => persistence
                .get_assignee(actor_id)
                .map_err(lookup_failed)?
                .is_some_and(|assignee| assignee.role == assignee_role),
        };

        if !known {
            return Err(AuthError::AuthenticationFailed {
                reason: format!("No {role} with id {actor_id} is registered"),
            });
        }

        Ok(AuthenticatedActor::new(actor_id, role))
    }
}

fn lookup_failed(err: PersistenceError) -> AuthError {
    AuthError::AuthenticationFailed {
        reason: format!("Identity lookup failed: {err}"),
    }
}

/// Authorization service for enforcing role-based access control.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Only users may submit malfunction reports.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not a user.
    pub fn authorize_report_malfunction(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        require_role(actor, Role::User, "report_malfunction")
    }

    /// Only the admin a report is assigned to may forward it.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an admin, or not the report's admin.
    pub fn authorize_forward(actor: &AuthenticatedActor, report: &Report) -> Result<(), AuthError> {
        require_role(actor, Role::Admin, "forward_malfunction")?;
        require_owner(actor, report.admin_id, report.report_id, "forward_malfunction")
    }

    /// Only the operator a report was forwarded to may resolve it.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an operator, or not the report's
    /// operator.
    pub fn authorize_resolve(actor: &AuthenticatedActor, report: &Report) -> Result<(), AuthError> {
        require_role(actor, Role::Operator, "resolve_malfunction")?;
        require_owner(actor, report.operator_id, report.report_id, "resolve_malfunction")
    }

    /// Seeding, audit and maintenance operations are admin-only.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an admin.
    pub fn authorize_admin_action(actor: &AuthenticatedActor, action: &str) -> Result<(), AuthError> {
        require_role(actor, Role::Admin, action)
    }

    /// Admins may read any assignee's reports; operators only their own.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is a user, or an operator asking about
    /// someone else.
    pub fn authorize_view_assignments(
        actor: &AuthenticatedActor,
        role: AssigneeRole,
        assignee_id: i64,
    ) -> Result<(), AuthError> {
        match actor.role {
            Role::Admin => Ok(()),
            Role::Operator if role == AssigneeRole::Operator && actor.id == assignee_id => Ok(()),
            Role::Operator | Role::User => Err(AuthError::Unauthorized {
                action: String::from("list_reports"),
                required_role: String::from("Admin"),
            }),
        }
    }

    /// Users read their own notifications; admins may read anyone's.
    ///
    /// # Errors
    ///
    /// Returns an error for any other combination.
    pub fn authorize_view_notifications(
        actor: &AuthenticatedActor,
        user_id: i64,
    ) -> Result<(), AuthError> {
        match actor.role {
            Role::Admin => Ok(()),
            Role::User if actor.id == user_id => Ok(()),
            Role::User | Role::Operator => Err(AuthError::Unauthorized {
                action: String::from("list_notifications"),
                required_role: String::from("Admin"),
            }),
        }
    }
}

fn require_role(actor: &AuthenticatedActor, role: Role, action: &str) -> Result<(), AuthError> {
    if actor.role == role {
        Ok(())
    } else {
        Err(AuthError::Unauthorized {
            action: action.to_string(),
            required_role: capitalized(role),
        })
    }
}

fn require_owner(
    actor: &AuthenticatedActor,
    owner: Option<i64>,
    report_id: i64,
    action: &str,
) -> Result<(), AuthError> {
    if owner == Some(actor.id) {
        Ok(())
    } else {
        Err(AuthError::NotAssigned {
            action: action.to_string(),
            report_id,
        })
    }
}

fn capitalized(role: Role) -> String {
    match role {
        Role::User => String::from("User"),
        Role::Admin => String::from("Admin"),
        Role::Operator => String::from("Operator"),
    }
}
