//! API key gateway
//!
//! This module provides the outermost credential check: every request
//! must carry a recognized `x-api-key` header before any token
//! validation runs, except requests to the exempt path prefixes (the
//! auth endpoints themselves, health and docs).
//!
//! Keys are never stored in the clear; the guard holds SHA-256 digests
//! and compares digests, so a presented key of any length takes the
//! same comparison path.

use sha2::{Digest, Sha256};
use std::collections::HashSet;
use tracing::debug;
use uuid::Uuid;

use crate::error::{AuthError, AuthResult};

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Path prefixes that bypass the API key check.
const EXEMPT_PREFIXES: &[&str] = &["/api/auth", "/health", "/docs"];

/// Generate a fresh API key: two UUIDs without separators, 64 hex
/// characters.
pub fn generate_api_key() -> String {
    format!(
        "{}{}",
        Uuid::now_v7().simple(),
        Uuid::now_v7().simple()
    )
}

/// Hash an API key for storage or comparison.
pub fn hash_api_key(key: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    hasher.finalize().into()
}

/// Validates the `x-api-key` header on incoming requests.
///
/// # Examples
///
/// ```
/// use tunewave_auth::gateway::{generate_api_key, ApiKeyGuard};
///
/// let key = generate_api_key();
/// let guard = ApiKeyGuard::new([key.as_str()]);
///
/// assert!(guard.check("/api/labels", Some(&key)).is_ok());
/// assert!(guard.check("/api/auth/login", None).is_ok());
/// assert!(guard.check("/api/labels", None).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ApiKeyGuard {
    key_digests: HashSet<[u8; 32]>,
}

impl ApiKeyGuard {
    /// Creates a guard recognizing the given keys.
    pub fn new<'a>(keys: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            key_digests: keys.into_iter().map(hash_api_key).collect(),
        }
    }

    /// Register an additional key.
    pub fn add_key(&mut self, key: &str) {
        self.key_digests.insert(hash_api_key(key));
    }

    /// Check whether a request path is exempt from the key check.
    pub fn is_exempt(&self, path: &str) -> bool {
        let path = path.to_lowercase();
        EXEMPT_PREFIXES.iter().any(|p| path.starts_with(p))
    }

    /// Validate a request's API key.
    ///
    /// # Arguments
    ///
    /// * `path` - The request path, used for the exemption check
    /// * `presented` - The `x-api-key` header value, if present
    ///
    /// # Errors
    ///
    /// Fails `InvalidApiKey` when the path is not exempt and the key is
    /// missing or unrecognized.
    pub fn check(&self, path: &str, presented: Option<&str>) -> AuthResult<()> {
        if self.is_exempt(path) {
            return Ok(());
        }
        match presented {
            Some(key) if self.key_digests.contains(&hash_api_key(key)) => Ok(()),
            Some(_) => {
                debug!(path, "unrecognized API key");
                Err(AuthError::InvalidApiKey)
            }
            None => {
                debug!(path, "missing API key");
                Err(AuthError::InvalidApiKey)
            }
        }
    }
}
