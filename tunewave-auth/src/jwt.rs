//! JWT token generation and validation
//!
//! This module provides access-token operations using the jsonwebtoken
//! crate. Tokens are HMAC-signed; the default validity is 120 minutes.

use chrono::Duration;
use uuid::Uuid;

use crate::claims::AccessClaims;
use crate::error::{AuthError, AuthResult};
use tunewave_rbac::Role;

#[cfg(feature = "jwt")]
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

/// JWT configuration for token generation and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Secret key for HMAC signing
    pub secret: String,

    /// Token issuer
    pub issuer: String,

    /// Token audience
    pub audience: String,

    /// Access token duration
    pub access_token_duration: Duration,
}

impl JwtConfig {
    /// Creates a configuration with the given secret and the standard
    /// 120-minute token lifetime.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            issuer: "tunewave-platform".to_string(),
            audience: "tunewave-api".to_string(),
            access_token_duration: Duration::minutes(120),
        }
    }

    /// Override the token lifetime.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.access_token_duration = duration;
        self
    }

    /// Override the issuer.
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    /// Override the audience.
    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = audience.into();
        self
    }
}

/// JWT service for token operations.
pub struct JwtService {
    config: JwtConfig,
    #[cfg(feature = "jwt")]
    encoding_key: EncodingKey,
    #[cfg(feature = "jwt")]
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("issuer", &self.config.issuer)
            .field("audience", &self.config.audience)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

impl JwtService {
    /// Create a new JWT service with the given configuration.
    ///
    /// # Errors
    ///
    /// Fails `ConfigError` when the secret is empty.
    #[cfg(feature = "jwt")]
    pub fn new(config: JwtConfig) -> AuthResult<Self> {
        if config.secret.is_empty() {
            return Err(AuthError::ConfigError(
                "JWT secret must not be empty".to_string(),
            ));
        }
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Ok(Self {
            config,
            encoding_key,
            decoding_key,
        })
    }

    /// Create with a simple secret and default settings.
    #[cfg(feature = "jwt")]
    pub fn with_secret(secret: impl Into<String>) -> AuthResult<Self> {
        Self::new(JwtConfig::new(secret))
    }

    /// Issue an access token for a user.
    ///
    /// The issuer and audience claims come from this service's
    /// configuration, so a token validates against the same config
    /// that issued it.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user's unique identifier
    /// * `email` - The user's email address
    /// * `name` - The user's display name
    /// * `role` - The user's platform role
    /// * `enterprise_id` - Enterprise affiliation, when applicable
    ///
    /// # Returns
    ///
    /// Encoded JWT token string
    #[cfg(feature = "jwt")]
    pub fn issue(
        &self,
        user_id: Uuid,
        email: impl Into<String>,
        name: impl Into<String>,
        role: Role,
        enterprise_id: Option<Uuid>,
    ) -> AuthResult<String> {
        let mut claims = AccessClaims::new(user_id, email, role, self.config.access_token_duration)
            .with_name(name)
            .with_issuer(self.config.issuer.clone())
            .with_audience(self.config.audience.clone());
        if let Some(id) = enterprise_id {
            claims = claims.with_enterprise(id);
        }
        self.encode_claims(&claims)
    }

    /// Encode existing claims into a token.
    #[cfg(feature = "jwt")]
    pub fn encode_claims(&self, claims: &AccessClaims) -> AuthResult<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("Token encoding failed: {}", e)))
    }

    /// Validate and decode a token.
    ///
    /// # Returns
    ///
    /// Decoded claims if valid
    #[cfg(feature = "jwt")]
    pub fn validate(&self, token: &str) -> AuthResult<AccessClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_audience(&[&self.config.audience]);

        let token_data = decode::<AccessClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                jsonwebtoken::errors::ErrorKind::InvalidToken => {
                    AuthError::InvalidToken("Malformed token".to_string())
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AuthError::InvalidToken("Invalid signature".to_string())
                }
                jsonwebtoken::errors::ErrorKind::InvalidIssuer => {
                    AuthError::InvalidToken("Invalid issuer".to_string())
                }
                jsonwebtoken::errors::ErrorKind::InvalidAudience => {
                    AuthError::InvalidToken("Invalid audience".to_string())
                }
                _ => AuthError::InvalidToken(e.to_string()),
            })?;

        Ok(token_data.claims)
    }

    /// Get the configuration.
    pub fn config(&self) -> &JwtConfig {
        &self.config
    }
}

#[cfg(all(test, feature = "jwt"))]
mod tests {
    use super::*;

    fn test_secret() -> String {
        "test-secret-key-for-jwt-signing-minimum-32-chars".to_string()
    }

    #[test]
    fn test_service_rejects_empty_secret() {
        let result = JwtService::with_secret("");
        assert!(matches!(result, Err(AuthError::ConfigError(_))));
    }

    #[test]
    fn test_issue_and_validate() {
        let service = JwtService::with_secret(test_secret()).unwrap();
        let user_id = Uuid::now_v7();
        let enterprise_id = Uuid::now_v7();

        let token = service
            .issue(
                user_id,
                "admin@example.com",
                "Avery Admin",
                Role::EnterpriseAdmin,
                Some(enterprise_id),
            )
            .unwrap();
        let claims = service.validate(&token).unwrap();

        assert_eq!(claims.user_id(), Some(user_id));
        assert_eq!(claims.email, "admin@example.com");
        assert_eq!(claims.name.as_deref(), Some("Avery Admin"));
        assert_eq!(claims.role, Role::EnterpriseAdmin);
        assert_eq!(claims.enterprise_id, Some(enterprise_id));
    }

    #[test]
    fn test_custom_issuer_and_audience_round_trip() {
        let config = JwtConfig::new(test_secret())
            .with_issuer("billing-portal")
            .with_audience("billing-api");
        let service = JwtService::new(config).unwrap();

        let token = service
            .issue(Uuid::now_v7(), "a@b.c", "A B", Role::User, None)
            .unwrap();
        let claims = service.validate(&token).unwrap();
        assert_eq!(claims.iss, "billing-portal");
        assert_eq!(claims.aud, "billing-api");

        // A service on the default issuer must not accept it.
        let default_service = JwtService::with_secret(test_secret()).unwrap();
        assert!(matches!(
            default_service.validate(&token),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_invalid_token() {
        let service = JwtService::with_secret(test_secret()).unwrap();
        let result = service.validate("not-a-token");
        assert!(matches!(result, Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn test_wrong_secret_fails_validation() {
        let issuer = JwtService::with_secret(test_secret()).unwrap();
        let verifier = JwtService::with_secret("another-secret-also-32-chars-long!!").unwrap();

        let token = issuer
            .issue(Uuid::now_v7(), "a@b.c", "A B", Role::User, None)
            .unwrap();
        assert!(verifier.validate(&token).is_err());
    }

    #[test]
    fn test_expired_token() {
        let config = JwtConfig::new(test_secret()).with_duration(Duration::minutes(-5));
        let service = JwtService::new(config).unwrap();

        let token = service
            .issue(Uuid::now_v7(), "a@b.c", "A B", Role::User, None)
            .unwrap();
        let result = service.validate(&token);
        assert!(matches!(result, Err(AuthError::TokenExpired)));
    }

    #[test]
    fn test_default_lifetime_is_two_hours() {
        let config = JwtConfig::new(test_secret());
        assert_eq!(config.access_token_duration, Duration::minutes(120));
    }
}
