//! Core JWT handler implementation

use super::types::{Claims, JwtHandler, TokenError};
use crate::auth::principal::Principal;
use crate::config::AuthConfig;
use crate::utils::error::{PlazaError, Result};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};

impl JwtHandler {
    /// Create a new JWT handler from auth configuration
    pub fn new(config: &AuthConfig) -> Result<Self> {
        let secret = config.jwt_secret.as_bytes();

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            expiration: config.jwt_expiration,
            issuer: "plaza-gateway".to_string(),
        })
    }

    /// Issue a signed access token for a principal
    ///
    /// Roles and tenant are baked into the claims as they stand now; they are
    /// refreshed only at the next login.
    pub fn issue_token(&self, principal: &Principal) -> Result<String> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| PlazaError::internal(format!("System time error: {}", e)))?
            .as_secs();

        let claims = Claims {
            sub: principal.username.clone(),
            iat: now,
            exp: now + self.expiration,
            iss: self.issuer.clone(),
            roles: principal.roles.clone(),
            user_id: principal.user_id,
            plaza_id: principal.plaza_id,
            plaza_name: principal.plaza_name.clone(),
        };

        let header = Header::new(self.algorithm);
        let token = encode(&header, &claims, &self.encoding_key)
            .map_err(|e| PlazaError::internal(format!("Failed to sign token: {}", e)))?;

        debug!("Issued access token for user: {}", principal.username);
        Ok(token)
    }

    /// Verify a token's signature and expiry and return its claims
    ///
    /// The signature is verified before any claim is trusted.
    pub fn parse_token(&self, token: &str) -> std::result::Result<Claims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.set_issuer(&[&self.issuer]);

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                warn!("Token verification failed: {}", e);
                classify_error(&e)
            })?;

        debug!("Token verified for user: {}", token_data.claims.sub);
        Ok(token_data.claims)
    }

    /// Check whether a token parses and has not expired
    pub fn is_valid(&self, token: &str) -> bool {
        self.parse_token(token).is_ok()
    }

    /// Configured token lifetime in seconds
    pub fn expiration(&self) -> u64 {
        self.expiration
    }
}

fn classify_error(error: &jsonwebtoken::errors::Error) -> TokenError {
    use jsonwebtoken::errors::ErrorKind;

    match error.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        ErrorKind::InvalidSignature => TokenError::InvalidSignature,
        ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
            TokenError::UnsupportedAlgorithm
        }
        ErrorKind::ImmatureSignature => TokenError::Immature,
        _ => TokenError::Malformed,
    }
}
