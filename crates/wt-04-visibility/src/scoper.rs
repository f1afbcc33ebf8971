//! Visibility Scoper Service
//!
//! Computes an `AccessScope` from the authenticated principal and the user's
//! profile, and offers the filter predicates consumed by query paths.

use crate::domain::errors::VisibilityError;
use crate::domain::scope::AccessScope;
use shared_types::{AuthPrincipal, Role, Roll};
use std::sync::Arc;
use tracing::debug;
use wt_01_entity_store::{StoreError, WarehouseStore};

pub struct VisibilityScoper {
    store: Arc<dyn WarehouseStore>,
}

impl VisibilityScoper {
    pub fn new(store: Arc<dyn WarehouseStore>) -> Self {
        Self { store }
    }

    /// Map a principal to its department scope.
    ///
    /// Scoped roles without a usable home department resolve to `Denied`
    /// rather than an error: an unconfigured profile must not widen access.
    pub fn scope_for(&self, principal: &AuthPrincipal) -> Result<AccessScope, StoreError> {
        if principal.is_superuser
            || matches!(principal.role, Some(Role::FactoryAdmin | Role::ForkliftDriver))
        {
            return Ok(AccessScope::Unrestricted);
        }

        let role = match principal.role {
            Some(role @ (Role::PlantManager | Role::Operator | Role::StockKeeper)) => role,
            _ => return Ok(AccessScope::Denied),
        };

        let Some(profile) = self.store.profile(&principal.username)? else {
            debug!(username = %principal.username, "[wt-04] No profile, access denied");
            return Ok(AccessScope::Denied);
        };
        let home = match profile.department_id {
            Some(dept_id) => self.store.department(dept_id)?.map(|d| d.code),
            None => None,
        };
        let Some(home) = home else {
            debug!(username = %principal.username, "[wt-04] No home department, access denied");
            return Ok(AccessScope::Denied);
        };

        let scope = match role {
            Role::StockKeeper => {
                let mut codes = profile.extra_access_list();
                codes.push(home);
                AccessScope::departments(codes)
            }
            _ => AccessScope::departments([home]),
        };
        Ok(scope)
    }

    /// Department code owning a roll, via batch → material → department.
    pub fn roll_department_code(&self, roll: &Roll) -> Result<Option<String>, StoreError> {
        let Some(batch) = self.store.batch(roll.batch_id)? else {
            return Ok(None);
        };
        let Some(material) = self.store.material(batch.material_id)? else {
            return Ok(None);
        };
        Ok(self.store.department(material.department_id)?.map(|d| d.code))
    }

    /// Filter rolls down to those whose material's department is in scope.
    pub fn scope_rolls(
        &self,
        scope: &AccessScope,
        rolls: Vec<Roll>,
    ) -> Result<Vec<Roll>, StoreError> {
        match scope {
            AccessScope::Unrestricted => Ok(rolls),
            AccessScope::Denied => Ok(Vec::new()),
            AccessScope::Departments(_) => {
                let mut visible = Vec::new();
                for roll in rolls {
                    if let Some(code) = self.roll_department_code(&roll)? {
                        if scope.allows_department(&code) {
                            visible.push(roll);
                        }
                    }
                }
                Ok(visible)
            }
        }
    }

    /// Veto direct access to a department-owned resource. The resource
    /// exists, so an out-of-scope caller gets `PermissionDenied`, not a
    /// misleading not-found.
    pub fn check_department(
        &self,
        principal: &AuthPrincipal,
        scope: &AccessScope,
        department_code: &str,
    ) -> Result<(), VisibilityError> {
        if scope.allows_department(department_code) {
            Ok(())
        } else {
            Err(VisibilityError::denied(
                &principal.username,
                format!("department {department_code}"),
            ))
        }
    }

    /// Resolve the effective department filter for list queries.
    ///
    /// Unrestricted principals may narrow to any requested department (the
    /// admin `?dept=XX` override); scoped principals may only request a
    /// department already in their scope.
    pub fn resolve_department_filter(
        &self,
        principal: &AuthPrincipal,
        scope: &AccessScope,
        requested: Option<&str>,
    ) -> Result<Option<String>, VisibilityError> {
        let Some(requested) = requested.map(str::trim).filter(|s| !s.is_empty()) else {
            return Ok(None);
        };
        let requested = requested.to_uppercase();
        match scope {
            AccessScope::Unrestricted => Ok(Some(requested)),
            _ if scope.allows_department(&requested) => Ok(Some(requested)),
            _ => Err(VisibilityError::denied(
                &principal.username,
                format!("department {requested}"),
            )),
        }
    }
}
