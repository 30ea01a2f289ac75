//! Label domain model
//!
//! This module provides the Label entity, the mid-tier of the catalog
//! hierarchy, and its status state machine. A label belongs to exactly
//! one enterprise at a time; PendingTransfer is reachable and leavable
//! only through the transfer workflow, never through the generic status
//! endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CatalogError, CatalogResult};

/// Lifecycle status of a label.
///
/// ```text
/// Active → PendingTransfer → Active   (transfer workflow only)
/// Active ↔ Suspended                  (generic status change)
/// {Active, Suspended} → Closed        (terminal)
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum LabelStatus {
    /// Operating normally.
    Active,

    /// An ownership transfer request is open for this label.
    PendingTransfer,

    /// Temporarily disabled; may be reactivated.
    Suspended,

    /// Permanently shut down. Terminal.
    Closed,
}

impl LabelStatus {
    /// Check whether the *generic* status endpoint may move this state
    /// to `next`.
    ///
    /// PendingTransfer is excluded on both sides: only the transfer
    /// workflow may enter or leave it, so the two mechanisms cannot
    /// corrupt each other. Self-transitions are rejected.
    pub fn can_change_to(&self, next: LabelStatus) -> bool {
        use LabelStatus::*;
        matches!(
            (self, next),
            (Active, Suspended) | (Suspended, Active) | (Active, Closed) | (Suspended, Closed)
        )
    }

    /// Validate a generic status change, producing the taxonomy error
    /// on failure.
    pub fn change_to(&self, next: LabelStatus) -> CatalogResult<LabelStatus> {
        if self.can_change_to(next) {
            Ok(next)
        } else {
            Err(CatalogError::InvalidStateTransition(format!(
                "label cannot move from {} to {}",
                self.as_str(),
                next.as_str()
            )))
        }
    }

    /// Check if this state accepts no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, LabelStatus::Closed)
    }

    /// Get string representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::PendingTransfer => "pending_transfer",
            Self::Suspended => "suspended",
            Self::Closed => "closed",
        }
    }

    /// Parse status from string representation (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('_', "").as_str() {
            "active" => Some(Self::Active),
            "pendingtransfer" => Some(Self::PendingTransfer),
            "suspended" => Some(Self::Suspended),
            "closed" => Some(Self::Closed),
            _ => None,
        }
    }
}

impl Default for LabelStatus {
    fn default() -> Self {
        Self::Active
    }
}

/// A label under an enterprise, owning artists and releases.
///
/// Invariant: `enterprise_id` references an existing, non-Closed
/// enterprise; the service validates this at creation, and only the
/// transfer workflow may reassign it afterwards.
///
/// # Examples
///
/// ```
/// use uuid::Uuid;
/// use tunewave_catalog::{Label, LabelStatus};
///
/// let label = Label::new(Uuid::now_v7(), "Northside Records", Uuid::now_v7(), 60.0, false);
/// assert_eq!(label.status, LabelStatus::Active);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Label {
    /// Unique identifier.
    pub id: Uuid,

    /// Enterprise that currently owns this label.
    pub enterprise_id: Uuid,

    /// Human-readable name.
    pub name: String,

    /// Optional web domain.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,

    /// Optional subscription plan name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_type: Option<String>,

    /// Revenue share percentage retained by the label.
    pub revenue_share: f64,

    /// Whether releases under this label require quality control.
    pub qc_required: bool,

    /// Lifecycle status.
    pub status: LabelStatus,

    /// User who created the label.
    pub created_by: Uuid,

    /// When the label was created.
    pub created_at: DateTime<Utc>,
}

impl Label {
    /// Creates a new label in Active status under the given enterprise.
    pub fn new(
        enterprise_id: Uuid,
        name: impl Into<String>,
        created_by: Uuid,
        revenue_share: f64,
        qc_required: bool,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            enterprise_id,
            name: name.into(),
            domain: None,
            plan_type: None,
            revenue_share,
            qc_required,
            status: LabelStatus::Active,
            created_by,
            created_at: Utc::now(),
        }
    }

    /// Set the web domain.
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// Set the plan type.
    pub fn with_plan_type(mut self, plan: impl Into<String>) -> Self {
        self.plan_type = Some(plan.into());
        self
    }

    /// Check whether a transfer request may be opened for this label.
    ///
    /// Only an Active label is eligible: PendingTransfer already has an
    /// open request, and Suspended/Closed labels are not in the
    /// transfer diagram at all.
    pub fn transfer_eligibility(&self) -> CatalogResult<()> {
        match self.status {
            LabelStatus::Active => Ok(()),
            LabelStatus::PendingTransfer => Err(CatalogError::Conflict(
                "label already has a pending transfer request".to_string(),
            )),
            LabelStatus::Suspended | LabelStatus::Closed => {
                Err(CatalogError::InvalidStateTransition(format!(
                    "label cannot enter transfer workflow from {}",
                    self.status.as_str()
                )))
            }
        }
    }
}

/// Fields an update may change on a label.
///
/// Enterprise assignment and status are excluded: the former moves only
/// through the transfer workflow, the latter through the state machine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LabelUpdate {
    /// New name, if changing.
    pub name: Option<String>,

    /// New web domain, if changing.
    pub domain: Option<String>,

    /// New plan type, if changing.
    pub plan_type: Option<String>,

    /// New revenue share, if changing.
    pub revenue_share: Option<f64>,

    /// New QC flag, if changing.
    pub qc_required: Option<bool>,
}
