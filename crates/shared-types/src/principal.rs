//! # Authenticated Principal
//!
//! The contract supplied by the external authentication/session provider on
//! every core operation. Unauthenticated calls are rejected before reaching
//! the core, so a principal is always present here.

use crate::entities::Role;
use serde::{Deserialize, Serialize};

/// An authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthPrincipal {
    pub username: String,
    /// Role-group membership, if any was granted.
    pub role: Option<Role>,
    pub is_superuser: bool,
}

impl AuthPrincipal {
    pub fn new(username: impl Into<String>, role: Option<Role>) -> Self {
        Self {
            username: username.into(),
            role,
            is_superuser: false,
        }
    }

    /// A superuser principal, used by admin tooling and tests.
    pub fn superuser(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            role: None,
            is_superuser: true,
        }
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.role == Some(role)
    }
}
