//! Authorization
//!
//! Mutating endpoints call [`require_role`] before touching the body or the
//! store. How a caller's roles are established is up to the [`RoleChecker`].

use axum::http::{header::AUTHORIZATION, HeaderMap};
use tracing::warn;

use crate::error::{ApiError, Result};

/// Roles a caller may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "ROLE_ADMIN",
        }
    }
}

/// Answers whether the caller behind a request holds a role.
pub trait RoleChecker: Send + Sync {
    fn current_user_has_role(&self, headers: &HeaderMap, role: Role) -> bool;
}

// == Token Role Checker ==
/// Grants `Role::Admin` to requests carrying `Authorization: Bearer <token>`
/// with the configured admin token. Without a token nobody is admin.
#[derive(Debug, Clone, Default)]
pub struct TokenRoleChecker {
    admin_token: Option<String>,
}

impl TokenRoleChecker {
    pub fn new(admin_token: Option<String>) -> Self {
        Self {
            admin_token: admin_token.filter(|t| !t.is_empty()),
        }
    }
}

impl RoleChecker for TokenRoleChecker {
    fn current_user_has_role(&self, headers: &HeaderMap, role: Role) -> bool {
        let Some(expected) = self.admin_token.as_deref() else {
            return false;
        };

        let presented = headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim);

        match role {
            Role::Admin => presented == Some(expected),
        }
    }
}

/// Short-circuits with `ApiError::Forbidden` unless the caller holds `role`.
pub fn require_role(checker: &dyn RoleChecker, headers: &HeaderMap, role: Role) -> Result<()> {
    if checker.current_user_has_role(headers, role) {
        Ok(())
    } else {
        warn!(role = role.as_str(), "authorization refused");
        Err(ApiError::Forbidden(format!(
            "{} is required for this operation",
            role.as_str()
        )))
    }
}
