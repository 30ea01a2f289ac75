//! Identity context for authenticated callers
//!
//! This module provides the IdentityContext value that represents the
//! authenticated caller for exactly one request. It is built once from
//! verified credential claims, passed explicitly into every permission
//! and scope check, and discarded when the request completes. Nothing
//! in the catalog reads caller identity from ambient state.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tunewave_rbac::Role;

/// The authenticated caller's identity for one request.
///
/// Immutable for the request's lifetime. `enterprise_id` is present for
/// EnterpriseAdmin callers (the enterprise they administer) and absent
/// for roles without an enterprise affiliation.
///
/// # Examples
///
/// ```
/// use uuid::Uuid;
/// use tunewave_catalog::IdentityContext;
/// use tunewave_rbac::Role;
///
/// let identity = IdentityContext::new(Uuid::now_v7(), Role::EnterpriseAdmin)
///     .with_enterprise(Uuid::now_v7());
/// assert!(identity.enterprise_id.is_some());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IdentityContext {
    /// Authenticated user ID.
    pub user_id: Uuid,

    /// The caller's role.
    pub role: Role,

    /// Enterprise the caller administers, when applicable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enterprise_id: Option<Uuid>,
}

impl IdentityContext {
    /// Creates an identity context with no enterprise affiliation.
    pub fn new(user_id: Uuid, role: Role) -> Self {
        Self {
            user_id,
            role,
            enterprise_id: None,
        }
    }

    /// Set the enterprise this caller administers.
    pub fn with_enterprise(mut self, enterprise_id: Uuid) -> Self {
        self.enterprise_id = Some(enterprise_id);
        self
    }

    /// Check if the caller is the unrestricted platform operator.
    pub fn is_super_admin(&self) -> bool {
        self.role.is_super_admin()
    }

    /// The caller's enterprise affiliation, if any.
    ///
    /// EnterpriseAdmin operations that need an owning enterprise treat
    /// a missing affiliation as a scope failure, not a panic.
    pub fn enterprise(&self) -> Option<Uuid> {
        self.enterprise_id
    }
}
