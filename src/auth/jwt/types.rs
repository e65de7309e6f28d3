//! JWT types and data structures

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// JWT handler for token operations
#[derive(Clone)]
pub struct JwtHandler {
    /// Encoding key for signing tokens
    pub(super) encoding_key: EncodingKey,
    /// Decoding key for verifying tokens
    pub(super) decoding_key: DecodingKey,
    /// JWT algorithm
    pub(super) algorithm: Algorithm,
    /// Token expiration time in seconds
    pub(super) expiration: u64,
    /// Token issuer
    pub(super) issuer: String,
}

impl std::fmt::Debug for JwtHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtHandler")
            .field("algorithm", &self.algorithm)
            .field("expiration", &self.expiration)
            .field("issuer", &self.issuer)
            .field("encoding_key", &"[REDACTED]")
            .field("decoding_key", &"[REDACTED]")
            .finish()
    }
}

/// JWT claims structure
///
/// Roles and tenant are denormalized into the token so authorization never
/// needs a storage round trip. The trade-off: role or tenant changes only
/// take effect when the token is reissued at the next login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,
    /// Issued at timestamp
    pub iat: u64,
    /// Expiration timestamp
    pub exp: u64,
    /// Issuer
    pub iss: String,
    /// Role names held at issue time
    pub roles: Vec<String>,
    /// User ID
    #[serde(rename = "userId")]
    pub user_id: i64,
    /// Tenant ID; absent for platform-level actors
    #[serde(rename = "plazaId", skip_serializing_if = "Option::is_none")]
    pub plaza_id: Option<i64>,
    /// Tenant display name
    #[serde(rename = "plazaName", skip_serializing_if = "Option::is_none")]
    pub plaza_name: Option<String>,
}

/// Token validation failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// The token's expiry has passed
    #[error("token has expired")]
    Expired,
    /// The signature does not match the configured secret
    #[error("token signature is invalid")]
    InvalidSignature,
    /// The token is not a well-formed JWT or carries unexpected claims
    #[error("token is malformed")]
    Malformed,
    /// The token was signed with an algorithm this gateway does not accept
    #[error("token algorithm is not supported")]
    UnsupportedAlgorithm,
    /// The token is not valid yet
    #[error("token is not yet valid")]
    Immature,
}
