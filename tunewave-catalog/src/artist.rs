//! Artist domain model
//!
//! An artist belongs to exactly one label.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An artist signed to a label.
///
/// # Examples
///
/// ```
/// use uuid::Uuid;
/// use tunewave_catalog::Artist;
///
/// let artist = Artist::new(Uuid::now_v7(), "Nova Reyes", Uuid::now_v7(), 80.0)
///     .with_genre("synthpop");
/// assert_eq!(artist.genre.as_deref(), Some("synthpop"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artist {
    /// Unique identifier.
    pub id: Uuid,

    /// Label this artist is signed to.
    pub label_id: Uuid,

    /// Artist or act name.
    pub name: String,

    /// Contact email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Country of residence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    /// Primary genre.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,

    /// Revenue share percentage retained by the artist.
    pub revenue_share: f64,

    /// User who created the artist record.
    pub created_by: Uuid,

    /// When the artist was created.
    pub created_at: DateTime<Utc>,
}

impl Artist {
    /// Creates a new artist under the given label.
    pub fn new(
        label_id: Uuid,
        name: impl Into<String>,
        created_by: Uuid,
        revenue_share: f64,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            label_id,
            name: name.into(),
            email: None,
            country: None,
            genre: None,
            revenue_share,
            created_by,
            created_at: Utc::now(),
        }
    }

    /// Set the contact email.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Set the country.
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    /// Set the primary genre.
    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }
}
