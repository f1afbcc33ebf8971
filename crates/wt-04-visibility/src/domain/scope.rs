//! The capability value object produced by the scoper.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The set of department codes a principal may see and act on.
///
/// Computed once per request by the scoper and consumed uniformly by every
/// query-building and mutation path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessScope {
    /// All departments.
    Unrestricted,
    /// Exactly these department codes.
    Departments(BTreeSet<String>),
    /// No access at all.
    Denied,
}

impl AccessScope {
    pub fn departments<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AccessScope::Departments(codes.into_iter().map(Into::into).collect())
    }

    pub fn is_denied(&self) -> bool {
        matches!(self, AccessScope::Denied)
    }

    /// May the principal see resources owned by this department?
    pub fn allows_department(&self, code: &str) -> bool {
        match self {
            AccessScope::Unrestricted => true,
            AccessScope::Departments(codes) => codes.contains(code),
            AccessScope::Denied => false,
        }
    }

    /// Location codes start with the owning department's code, so visibility
    /// of a location follows from its prefix.
    pub fn allows_location_code(&self, location_code: &str) -> bool {
        match self {
            AccessScope::Unrestricted => true,
            AccessScope::Departments(codes) => {
                codes.iter().any(|code| location_code.starts_with(code.as_str()))
            }
            AccessScope::Denied => false,
        }
    }
}
