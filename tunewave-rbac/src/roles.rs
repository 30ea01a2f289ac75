//! Caller roles
//!
//! This module defines the five roles a catalog caller can hold. Roles
//! are deliberately not ordered: grants come from the matrix table, not
//! from a linear hierarchy.

use serde::{Deserialize, Serialize};

/// Role of an authenticated caller.
///
/// Each tier of the catalog hierarchy is administered by a specific
/// role. A caller holds exactly one role for the lifetime of a request.
///
/// # Examples
///
/// ```
/// use tunewave_rbac::Role;
///
/// let role = Role::parse("enterpriseadmin").unwrap();
/// assert_eq!(role, Role::EnterpriseAdmin);
/// assert_eq!(role.as_str(), "enterprise_admin");
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Platform operator; creates enterprises and resolves transfers.
    SuperAdmin,

    /// Administers one enterprise and the labels under it.
    EnterpriseAdmin,

    /// Administers artists and releases under a label.
    LabelAdmin,

    /// Creates releases for themselves.
    Artist,

    /// Regular end user; scoped reads only.
    User,
}

impl Role {
    /// All roles, in grant-table order.
    pub fn all() -> [Role; 5] {
        [
            Role::SuperAdmin,
            Role::EnterpriseAdmin,
            Role::LabelAdmin,
            Role::Artist,
            Role::User,
        ]
    }

    /// Check if this role is the unrestricted platform operator.
    pub fn is_super_admin(&self) -> bool {
        matches!(self, Role::SuperAdmin)
    }

    /// Parse role from string representation.
    ///
    /// Accepts both snake_case and the original CamelCase spellings
    /// (case-insensitive), since stored credentials carry the latter.
    ///
    /// # Examples
    ///
    /// ```
    /// use tunewave_rbac::Role;
    ///
    /// assert_eq!(Role::parse("SuperAdmin"), Some(Role::SuperAdmin));
    /// assert_eq!(Role::parse("label_admin"), Some(Role::LabelAdmin));
    /// assert_eq!(Role::parse("invalid"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('_', "").as_str() {
            "superadmin" => Some(Self::SuperAdmin),
            "enterpriseadmin" => Some(Self::EnterpriseAdmin),
            "labeladmin" => Some(Self::LabelAdmin),
            "artist" => Some(Self::Artist),
            "user" => Some(Self::User),
            _ => None,
        }
    }

    /// Get string representation of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "super_admin",
            Self::EnterpriseAdmin => "enterprise_admin",
            Self::LabelAdmin => "label_admin",
            Self::Artist => "artist",
            Self::User => "user",
        }
    }

    /// Get a human-readable display name for the role.
    ///
    /// # Examples
    ///
    /// ```
    /// use tunewave_rbac::Role;
    ///
    /// assert_eq!(Role::EnterpriseAdmin.display_name(), "Enterprise Admin");
    /// ```
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "Super Admin",
            Self::EnterpriseAdmin => "Enterprise Admin",
            Self::LabelAdmin => "Label Admin",
            Self::Artist => "Artist",
            Self::User => "User",
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Self::User
    }
}
