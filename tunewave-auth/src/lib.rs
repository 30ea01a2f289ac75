//! # Tunewave Auth
//!
//! Authentication for the Tunewave platform: an API key gateway that
//! fronts every request, and HMAC-signed JWT access tokens whose claims
//! convert into the per-request identity the catalog consumes.
//!
//! ## Request flow
//!
//! 1. [`ApiKeyGuard`](gateway::ApiKeyGuard) checks the `x-api-key`
//!    header (auth, health and docs paths are exempt)
//! 2. [`JwtService`](jwt::JwtService) validates the bearer token into
//!    [`AccessClaims`](claims::AccessClaims)
//! 3. [`AccessClaims::identity`](claims::AccessClaims::identity) builds
//!    the `IdentityContext` every catalog operation takes
//!
//! ## Example
//!
//! ```rust,no_run
//! use tunewave_auth::{JwtService, gateway::ApiKeyGuard};
//! use tunewave_rbac::Role;
//! use uuid::Uuid;
//!
//! # fn example() -> Result<(), tunewave_auth::AuthError> {
//! let jwt = JwtService::with_secret("a-long-signing-secret-for-hs256!")?;
//! let token = jwt.issue(Uuid::now_v7(), "admin@example.com", "Ada Admin", Role::SuperAdmin, None)?;
//!
//! let claims = jwt.validate(&token)?;
//! let identity = claims.identity()?;
//! assert!(identity.is_super_admin());
//! # Ok(())
//! # }
//! ```

pub mod claims;
pub mod error;
pub mod gateway;
#[cfg(feature = "jwt")]
pub mod jwt;

pub use claims::AccessClaims;
pub use error::{AuthError, AuthResult};
pub use gateway::{generate_api_key, ApiKeyGuard, API_KEY_HEADER};
#[cfg(feature = "jwt")]
pub use jwt::{JwtConfig, JwtService};
