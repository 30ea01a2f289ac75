//! JWT claims for Tunewave access tokens
//!
//! This module defines the claims carried by every access token and
//! their conversion into the per-request identity the catalog consumes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::error::{AuthError, AuthResult};
use tunewave_catalog::IdentityContext;
use tunewave_rbac::Role;

/// Standard JWT claims with Tunewave-specific extensions.
///
/// # Example
///
/// ```rust,no_run
/// use tunewave_auth::claims::AccessClaims;
/// use tunewave_rbac::Role;
/// use uuid::Uuid;
///
/// let claims = AccessClaims::new(
///     Uuid::now_v7(),
///     "admin@example.com",
///     Role::EnterpriseAdmin,
///     chrono::Duration::minutes(120),
/// );
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    // Standard JWT claims (RFC 7519)
    /// Subject (user ID)
    pub sub: String,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// JWT ID (unique identifier for this token)
    pub jti: String,

    // Tunewave-specific claims
    /// User email
    pub email: String,

    /// User display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// The user's platform role
    pub role: Role,

    /// Enterprise the user administers, when applicable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enterprise_id: Option<Uuid>,

    /// Custom claims for extensibility
    #[serde(default, flatten)]
    pub custom: HashMap<String, serde_json::Value>,
}

impl AccessClaims {
    /// Create new access claims for a user.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user's unique identifier
    /// * `email` - The user's email address
    /// * `role` - The user's platform role
    /// * `duration` - Token validity duration
    pub fn new(
        user_id: Uuid,
        email: impl Into<String>,
        role: Role,
        duration: chrono::Duration,
    ) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id.to_string(),
            iss: "tunewave-platform".to_string(),
            aud: "tunewave-api".to_string(),
            exp: (now + duration).timestamp(),
            iat: now.timestamp(),
            jti: Uuid::now_v7().to_string(),
            email: email.into(),
            name: None,
            role,
            enterprise_id: None,
            custom: HashMap::new(),
        }
    }

    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the issuer.
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.iss = issuer.into();
        self
    }

    /// Set the audience.
    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.aud = audience.into();
        self
    }

    /// Set the enterprise affiliation.
    pub fn with_enterprise(mut self, enterprise_id: Uuid) -> Self {
        self.enterprise_id = Some(enterprise_id);
        self
    }

    /// Parse the subject claim into a user ID.
    pub fn user_id(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.sub).ok()
    }

    /// Get expiration as DateTime.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }

    /// Check if the token has expired.
    pub fn is_expired(&self) -> bool {
        self.exp < Utc::now().timestamp()
    }

    /// Build the per-request identity the catalog operates on.
    ///
    /// # Errors
    ///
    /// Fails `MissingClaim` when the subject is not a valid UUID.
    pub fn identity(&self) -> AuthResult<IdentityContext> {
        let user_id = self
            .user_id()
            .ok_or_else(|| AuthError::MissingClaim("sub".to_string()))?;
        let mut identity = IdentityContext::new(user_id, self.role);
        if let Some(enterprise_id) = self.enterprise_id {
            identity = identity.with_enterprise(enterprise_id);
        }
        Ok(identity)
    }
}
