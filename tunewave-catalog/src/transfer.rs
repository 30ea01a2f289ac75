//! Label transfer requests
//!
//! This module provides the TransferRequest entity of the
//! request-then-approve transfer path: an EnterpriseAdmin opens a
//! request for a label they own, and a SuperAdmin later approves or
//! rejects it. At most one request per label may be Pending at a time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Resolution state of a transfer request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TransferState {
    /// Open, awaiting a SuperAdmin decision.
    Pending,

    /// Approved; the label was reassigned.
    Approved,

    /// Rejected; ownership unchanged.
    Rejected,
}

impl TransferState {
    /// Get string representation of the state.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Check if the request is still open.
    pub fn is_open(&self) -> bool {
        matches!(self, TransferState::Pending)
    }
}

/// The SuperAdmin's decision on a pending request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TransferDecision {
    /// Reassign the label to the target enterprise.
    Approve,

    /// Leave ownership unchanged.
    Reject,
}

impl TransferDecision {
    /// The terminal state this decision resolves a request into.
    pub fn resolved_state(&self) -> TransferState {
        match self {
            TransferDecision::Approve => TransferState::Approved,
            TransferDecision::Reject => TransferState::Rejected,
        }
    }
}

/// A pending proposal to move a label between enterprises.
///
/// Created by an EnterpriseAdmin who owns the source label; resolved
/// only by a SuperAdmin. While a request is Pending, the label sits in
/// PendingTransfer and no second request may be opened for it.
///
/// # Examples
///
/// ```
/// use uuid::Uuid;
/// use tunewave_catalog::{TransferRequest, TransferState};
///
/// let req = TransferRequest::new(
///     Uuid::now_v7(),
///     Uuid::now_v7(),
///     Uuid::now_v7(),
///     "roster consolidation",
///     Uuid::now_v7(),
/// );
/// assert_eq!(req.state, TransferState::Pending);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferRequest {
    /// Unique identifier.
    pub id: Uuid,

    /// Label being transferred.
    pub label_id: Uuid,

    /// Enterprise the label belongs to when the request opens.
    pub source_enterprise_id: Uuid,

    /// Enterprise the label would move to.
    pub target_enterprise_id: Uuid,

    /// Why the transfer is requested.
    pub reason: String,

    /// EnterpriseAdmin who opened the request.
    pub requested_by: Uuid,

    /// Resolution state.
    pub state: TransferState,

    /// When the request was opened.
    pub requested_at: DateTime<Utc>,

    /// SuperAdmin who resolved the request, once resolved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_by: Option<Uuid>,

    /// When the request was resolved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,
}

impl TransferRequest {
    /// Creates a new request in Pending state.
    pub fn new(
        label_id: Uuid,
        source_enterprise_id: Uuid,
        target_enterprise_id: Uuid,
        reason: impl Into<String>,
        requested_by: Uuid,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            label_id,
            source_enterprise_id,
            target_enterprise_id,
            reason: reason.into(),
            requested_by,
            state: TransferState::Pending,
            requested_at: Utc::now(),
            resolved_by: None,
            resolved_at: None,
        }
    }

    /// Mark the request resolved with the given decision.
    pub fn resolve(&mut self, decision: TransferDecision, resolved_by: Uuid) {
        self.state = decision.resolved_state();
        self.resolved_by = Some(resolved_by);
        self.resolved_at = Some(Utc::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_starts_pending() {
        let req = TransferRequest::new(
            Uuid::now_v7(),
            Uuid::now_v7(),
            Uuid::now_v7(),
            "roster consolidation",
            Uuid::now_v7(),
        );

        assert_eq!(req.state, TransferState::Pending);
        assert!(req.state.is_open());
        assert!(req.resolved_by.is_none());
        assert!(req.resolved_at.is_none());
    }

    #[test]
    fn test_resolve_approve() {
        let mut req = TransferRequest::new(
            Uuid::now_v7(),
            Uuid::now_v7(),
            Uuid::now_v7(),
            "r",
            Uuid::now_v7(),
        );
        let admin = Uuid::now_v7();
        req.resolve(TransferDecision::Approve, admin);

        assert_eq!(req.state, TransferState::Approved);
        assert!(!req.state.is_open());
        assert_eq!(req.resolved_by, Some(admin));
        assert!(req.resolved_at.is_some());
    }

    #[test]
    fn test_resolve_reject() {
        let mut req = TransferRequest::new(
            Uuid::now_v7(),
            Uuid::now_v7(),
            Uuid::now_v7(),
            "r",
            Uuid::now_v7(),
        );
        req.resolve(TransferDecision::Reject, Uuid::now_v7());
        assert_eq!(req.state, TransferState::Rejected);
    }

    #[test]
    fn test_decision_resolved_states() {
        assert_eq!(
            TransferDecision::Approve.resolved_state(),
            TransferState::Approved
        );
        assert_eq!(
            TransferDecision::Reject.resolved_state(),
            TransferState::Rejected
        );
    }
}
