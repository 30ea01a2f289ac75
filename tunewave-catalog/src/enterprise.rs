//! Enterprise domain model
//!
//! This module provides the Enterprise entity, the top-level tenant of
//! the catalog hierarchy, together with its status state machine.
//! Enterprises are created by a SuperAdmin and own labels.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CatalogError, CatalogResult};

/// Lifecycle status of an enterprise.
///
/// Transitions (SuperAdmin only):
///
/// ```text
/// Active ↔ Suspended
/// {Active, Suspended} → Closed   (terminal)
/// ```
///
/// A Closed enterprise accepts no further transitions and is excluded
/// from label-creation validation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EnterpriseStatus {
    /// Operating normally; labels may be created under it.
    Active,

    /// Temporarily disabled; may be reactivated.
    Suspended,

    /// Permanently shut down. Terminal.
    Closed,
}

impl EnterpriseStatus {
    /// Check whether a transition to `next` is legal from this state.
    ///
    /// Re-asserting the current status is not a transition and is
    /// rejected, so every accepted call changes observable state.
    pub fn can_transition_to(&self, next: EnterpriseStatus) -> bool {
        use EnterpriseStatus::*;
        matches!(
            (self, next),
            (Active, Suspended) | (Suspended, Active) | (Active, Closed) | (Suspended, Closed)
        )
    }

    /// Validate a transition, producing the taxonomy error on failure.
    pub fn transition_to(&self, next: EnterpriseStatus) -> CatalogResult<EnterpriseStatus> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(CatalogError::InvalidStateTransition(format!(
                "enterprise cannot move from {} to {}",
                self.as_str(),
                next.as_str()
            )))
        }
    }

    /// Check if this state accepts no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, EnterpriseStatus::Closed)
    }

    /// Get string representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Suspended => "suspended",
            Self::Closed => "closed",
        }
    }

    /// Parse status from string representation (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "active" => Some(Self::Active),
            "suspended" => Some(Self::Suspended),
            "closed" => Some(Self::Closed),
            _ => None,
        }
    }
}

impl Default for EnterpriseStatus {
    fn default() -> Self {
        Self::Active
    }
}

/// An enterprise: the top-level tenant that owns labels.
///
/// Exactly one user owns an enterprise at any time. `owner_user_id` is
/// assigned at creation and changes only through an explicit ownership
/// transfer path not exposed to other roles.
///
/// # Examples
///
/// ```
/// use uuid::Uuid;
/// use tunewave_catalog::{Enterprise, EnterpriseStatus};
///
/// let owner = Uuid::now_v7();
/// let creator = Uuid::now_v7();
/// let ent = Enterprise::new("Starlight Media", owner, creator, 70.0, true);
/// assert_eq!(ent.status, EnterpriseStatus::Active);
/// assert_eq!(ent.track_code.len(), 3);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enterprise {
    /// Unique identifier.
    pub id: Uuid,

    /// Human-readable name.
    pub name: String,

    /// Short human-facing code derived from the name (e.g. "S1F").
    pub track_code: String,

    /// Optional web domain.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,

    /// Revenue share percentage retained by the enterprise.
    pub revenue_share: f64,

    /// Whether releases under this enterprise require quality control.
    pub qc_required: bool,

    /// Lifecycle status.
    pub status: EnterpriseStatus,

    /// The single owning user.
    pub owner_user_id: Uuid,

    /// SuperAdmin who created the enterprise.
    pub created_by: Uuid,

    /// When the enterprise was created.
    pub created_at: DateTime<Utc>,

    /// When the enterprise was last updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Enterprise {
    /// Creates a new enterprise in Active status.
    ///
    /// The owner is assigned at creation and a track code is generated
    /// from the name.
    ///
    /// # Arguments
    ///
    /// * `name` - Enterprise name (must be non-empty)
    /// * `owner_user_id` - The single owning user
    /// * `created_by` - The SuperAdmin creating the enterprise
    /// * `revenue_share` - Revenue share percentage
    /// * `qc_required` - Whether QC applies to releases
    pub fn new(
        name: impl Into<String>,
        owner_user_id: Uuid,
        created_by: Uuid,
        revenue_share: f64,
        qc_required: bool,
    ) -> Self {
        let name = name.into();
        let track_code = generate_track_code(&name);
        Self {
            id: Uuid::now_v7(),
            name,
            track_code,
            domain: None,
            revenue_share,
            qc_required,
            status: EnterpriseStatus::Active,
            owner_user_id,
            created_by,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    /// Set the web domain.
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// Check whether labels may currently be created under this
    /// enterprise (it must reference an existing, non-Closed tenant).
    pub fn accepts_labels(&self) -> bool {
        !self.status.is_terminal()
    }
}

/// Generate a short track code from an enterprise name: the first
/// letter uppercased followed by two random alphanumerics.
///
/// The code is a human-facing label, not an identifier; uniqueness is
/// not required.
pub fn generate_track_code(name: &str) -> String {
    const CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
    let first = name
        .chars()
        .next()
        .map(|c| c.to_ascii_uppercase())
        .unwrap_or('X');
    let mut rng = rand::thread_rng();
    let mut code = String::with_capacity(3);
    code.push(first);
    for _ in 0..2 {
        code.push(CHARS[rng.gen_range(0..CHARS.len())] as char);
    }
    code
}

/// Fields an update may change on an enterprise.
///
/// Name, owner and status are excluded: status moves only through the
/// state machine and ownership only through its transfer path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnterpriseUpdate {
    /// New web domain, if changing.
    pub domain: Option<String>,

    /// New revenue share, if changing.
    pub revenue_share: Option<f64>,

    /// New QC flag, if changing.
    pub qc_required: Option<bool>,
}
