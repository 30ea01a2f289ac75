//! # Operations
//!
//! Defines the coarse-grained operations callers can perform on catalog
//! entities. Operations are the columns of the role-permission matrix.

use serde::{Deserialize, Serialize};

/// Operations that can be performed on catalog entities.
///
/// These are deliberately coarse: one variant per endpoint-level
/// capability, not per row. Which rows an allowed caller may touch is
/// decided separately by the scope resolver.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Create a new enterprise (top-level tenant).
    CreateEnterprise,

    /// Update enterprise details (domain, revenue share, QC flag).
    UpdateEnterprise,

    /// Move an enterprise through its status workflow.
    UpdateEnterpriseStatus,

    /// Create a label under an enterprise.
    CreateLabel,

    /// Update label details.
    UpdateLabel,

    /// Reassign a label to another enterprise in one step.
    TransferLabelDirect,

    /// Open a transfer request for a label.
    RequestLabelTransfer,

    /// Approve or reject an open transfer request.
    ApproveLabelTransfer,

    /// Move a label through its status workflow.
    ChangeLabelStatus,

    /// Create an artist under a label.
    CreateArtist,

    /// Create a release under a label and/or artist.
    CreateRelease,

    /// Read any row of any entity, unscoped.
    ReadAny,

    /// Read rows within the caller's own scope.
    ReadOwnScope,
}

impl Operation {
    /// All operations, for exhaustive matrix enumeration.
    pub fn all() -> [Operation; 13] {
        [
            Operation::CreateEnterprise,
            Operation::UpdateEnterprise,
            Operation::UpdateEnterpriseStatus,
            Operation::CreateLabel,
            Operation::UpdateLabel,
            Operation::TransferLabelDirect,
            Operation::RequestLabelTransfer,
            Operation::ApproveLabelTransfer,
            Operation::ChangeLabelStatus,
            Operation::CreateArtist,
            Operation::CreateRelease,
            Operation::ReadAny,
            Operation::ReadOwnScope,
        ]
    }

    /// Get the string representation of the operation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::CreateEnterprise => "create_enterprise",
            Operation::UpdateEnterprise => "update_enterprise",
            Operation::UpdateEnterpriseStatus => "update_enterprise_status",
            Operation::CreateLabel => "create_label",
            Operation::UpdateLabel => "update_label",
            Operation::TransferLabelDirect => "transfer_label_direct",
            Operation::RequestLabelTransfer => "request_label_transfer",
            Operation::ApproveLabelTransfer => "approve_label_transfer",
            Operation::ChangeLabelStatus => "change_label_status",
            Operation::CreateArtist => "create_artist",
            Operation::CreateRelease => "create_release",
            Operation::ReadAny => "read_any",
            Operation::ReadOwnScope => "read_own_scope",
        }
    }

    /// Parse operation from string representation.
    ///
    /// # Examples
    ///
    /// ```
    /// use tunewave_rbac::Operation;
    ///
    /// assert_eq!(Operation::parse("create_label"), Some(Operation::CreateLabel));
    /// assert_eq!(Operation::parse("invalid"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        Operation::all()
            .into_iter()
            .find(|op| op.as_str() == s.to_lowercase())
    }

    /// Check if this operation mutates catalog state.
    ///
    /// Read operations are the only class eligible for caller-invisible
    /// retry on transient persistence failures.
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Operation::ReadAny | Operation::ReadOwnScope)
    }
}
