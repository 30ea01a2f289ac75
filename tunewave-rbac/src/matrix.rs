//! # Role-permission matrix
//!
//! The single grant table mapping (role, operation) to allowed/denied.
//! Policy lives here as data so a reviewer can audit it in one place.

use serde::{Deserialize, Serialize};

use crate::operations::Operation;
use crate::roles::Role;

/// Grant rows: each role paired with the operations it may perform.
///
/// SuperAdmin is handled by `allowed` directly (every operation) so the
/// table only lists restricted roles.
const GRANTS: &[(Role, &[Operation])] = &[
    (
        Role::EnterpriseAdmin,
        &[
            Operation::CreateLabel,
            Operation::UpdateLabel,
            Operation::UpdateEnterprise,
            Operation::RequestLabelTransfer,
            Operation::ChangeLabelStatus,
            Operation::ReadOwnScope,
        ],
    ),
    (
        Role::LabelAdmin,
        &[
            Operation::CreateArtist,
            Operation::CreateRelease,
            Operation::ReadOwnScope,
        ],
    ),
    (
        Role::Artist,
        &[Operation::CreateRelease, Operation::ReadOwnScope],
    ),
    (Role::User, &[Operation::ReadOwnScope]),
];

/// The role-permission matrix.
///
/// A pure lookup: `allowed(role, operation) -> bool`. The matrix is
/// immutable after startup and shared read-only across requests.
///
/// # Examples
///
/// ```
/// use tunewave_rbac::{Operation, Role, RolePermissionMatrix};
///
/// let matrix = RolePermissionMatrix::platform();
/// assert!(matrix.allowed(Role::EnterpriseAdmin, Operation::CreateLabel));
/// assert!(!matrix.allowed(Role::LabelAdmin, Operation::CreateLabel));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RolePermissionMatrix;

impl RolePermissionMatrix {
    /// The platform grant table.
    pub fn platform() -> Self {
        Self
    }

    /// Check whether `role` may ever perform `operation`.
    ///
    /// This is the coarse gate only; row-level visibility is the scope
    /// resolver's job and is always a narrowing of this grant.
    pub fn allowed(&self, role: Role, operation: Operation) -> bool {
        if role.is_super_admin() {
            return true;
        }
        GRANTS
            .iter()
            .find(|(r, _)| *r == role)
            .map(|(_, ops)| ops.contains(&operation))
            .unwrap_or(false)
    }

    /// Fail-fast guard: `Ok(())` when allowed, `PermissionDenied` otherwise.
    ///
    /// Handlers call this before touching any state so that denied
    /// requests never reach the repository.
    pub fn require(&self, role: Role, operation: Operation) -> Result<(), PermissionDenied> {
        if self.allowed(role, operation) {
            Ok(())
        } else {
            Err(PermissionDenied { role, operation })
        }
    }

    /// All operations granted to `role`, in table order.
    pub fn operations_for(&self, role: Role) -> Vec<Operation> {
        if role.is_super_admin() {
            return Operation::all().to_vec();
        }
        GRANTS
            .iter()
            .find(|(r, _)| *r == role)
            .map(|(_, ops)| ops.to_vec())
            .unwrap_or_default()
    }
}

/// A (role, operation) pair the matrix denies.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PermissionDenied {
    /// Role that attempted the operation.
    pub role: Role,
    /// Operation that was denied.
    pub operation: Operation,
}

impl std::fmt::Display for PermissionDenied {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "role {} is not permitted to {}",
            self.role.as_str(),
            self.operation.as_str()
        )
    }
}

impl std::error::Error for PermissionDenied {}

#[cfg(test)]
mod tests {
    use super::*;

    /// The expected grant for every (role, operation) pair. Kept as an
    /// independent enumeration so a table edit must be mirrored here.
    fn expected(role: Role, op: Operation) -> bool {
        use Operation::*;
        match role {
            Role::SuperAdmin => true,
            Role::EnterpriseAdmin => matches!(
                op,
                CreateLabel
                    | UpdateLabel
                    | UpdateEnterprise
                    | RequestLabelTransfer
                    | ChangeLabelStatus
                    | ReadOwnScope
            ),
            Role::LabelAdmin => matches!(op, CreateArtist | CreateRelease | ReadOwnScope),
            Role::Artist => matches!(op, CreateRelease | ReadOwnScope),
            Role::User => matches!(op, ReadOwnScope),
        }
    }

    #[test]
    fn test_every_role_operation_pair() {
        let matrix = RolePermissionMatrix::platform();
        for role in Role::all() {
            for op in Operation::all() {
                assert_eq!(
                    matrix.allowed(role, op),
                    expected(role, op),
                    "mismatch for {:?} / {:?}",
                    role,
                    op
                );
            }
        }
    }

    #[test]
    fn test_super_admin_unrestricted() {
        let matrix = RolePermissionMatrix::platform();
        for op in Operation::all() {
            assert!(matrix.allowed(Role::SuperAdmin, op));
        }
        assert_eq!(
            matrix.operations_for(Role::SuperAdmin).len(),
            Operation::all().len()
        );
    }

    #[test]
    fn test_require_denied() {
        let matrix = RolePermissionMatrix::platform();
        let err = matrix
            .require(Role::LabelAdmin, Operation::UpdateEnterpriseStatus)
            .unwrap_err();
        assert_eq!(err.role, Role::LabelAdmin);
        assert_eq!(err.operation, Operation::UpdateEnterpriseStatus);
        assert!(err.to_string().contains("label_admin"));
    }

    #[test]
    fn test_only_super_admin_resolves_transfers() {
        let matrix = RolePermissionMatrix::platform();
        for role in Role::all() {
            assert_eq!(
                matrix.allowed(role, Operation::ApproveLabelTransfer),
                role == Role::SuperAdmin
            );
            assert_eq!(
                matrix.allowed(role, Operation::TransferLabelDirect),
                role == Role::SuperAdmin
            );
        }
    }

    #[test]
    fn test_read_any_is_super_admin_only() {
        let matrix = RolePermissionMatrix::platform();
        for role in Role::all() {
            assert_eq!(
                matrix.allowed(role, Operation::ReadAny),
                role == Role::SuperAdmin
            );
        }
    }

    #[test]
    fn test_operations_for_user() {
        let matrix = RolePermissionMatrix::platform();
        assert_eq!(
            matrix.operations_for(Role::User),
            vec![Operation::ReadOwnScope]
        );
    }
}
