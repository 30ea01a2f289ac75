//! Release domain model
//!
//! A release references at most one label and one artist; at least one
//! of the two must be present, since releases are created by either an
//! artist or a label admin.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CatalogError, CatalogResult};

/// Review status of a release.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ReleaseStatus {
    /// Submitted, not yet reviewed.
    Draft,

    /// Waiting on quality control.
    PendingQc,

    /// Cleared for distribution.
    Approved,

    /// Rejected by quality control.
    Rejected,
}

impl ReleaseStatus {
    /// Get string representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::PendingQc => "pending_qc",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Parse status from string representation (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('_', "").as_str() {
            "draft" => Some(Self::Draft),
            "pendingqc" => Some(Self::PendingQc),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }
}

/// A release (album, EP or single) in the catalog.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use uuid::Uuid;
/// use tunewave_catalog::Release;
///
/// let date = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
/// let release = Release::new(
///     "Midnight Transit",
///     date,
///     Some(Uuid::now_v7()),
///     None,
///     Uuid::now_v7(),
/// ).unwrap();
/// assert!(release.label_id.is_some());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Release {
    /// Unique identifier.
    pub id: Uuid,

    /// Owning label, if released through one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_id: Option<Uuid>,

    /// Owning artist, if released by one directly.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist_id: Option<Uuid>,

    /// Release title.
    pub title: String,

    /// Planned or actual release date.
    pub release_date: NaiveDate,

    /// Universal Product Code, once assigned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upc: Option<String>,

    /// Review status, once submitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ReleaseStatus>,

    /// User who created the release.
    pub created_by: Uuid,

    /// When the release was created.
    pub created_at: DateTime<Utc>,
}

impl Release {
    /// Creates a new release.
    ///
    /// # Errors
    ///
    /// Fails `Validation` when the title is blank or when neither a
    /// label nor an artist is referenced.
    pub fn new(
        title: impl Into<String>,
        release_date: NaiveDate,
        label_id: Option<Uuid>,
        artist_id: Option<Uuid>,
        created_by: Uuid,
    ) -> CatalogResult<Self> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(CatalogError::Validation(
                "release title is required".to_string(),
            ));
        }
        if label_id.is_none() && artist_id.is_none() {
            return Err(CatalogError::Validation(
                "a release must reference a label or an artist".to_string(),
            ));
        }
        Ok(Self {
            id: Uuid::now_v7(),
            label_id,
            artist_id,
            title,
            release_date,
            upc: None,
            status: None,
            created_by,
            created_at: Utc::now(),
        })
    }

    /// Set the UPC.
    pub fn with_upc(mut self, upc: impl Into<String>) -> Self {
        self.upc = Some(upc.into());
        self
    }

    /// Set the review status.
    pub fn with_status(mut self, status: ReleaseStatus) -> Self {
        self.status = Some(status);
        self
    }
}
