//! Token codec
//!
//! Issues and parses the signed tokens that carry a user's identity, roles
//! and tenant between requests. Tokens are stateless: validity is determined
//! purely by signature and expiry, never revoked server-side.

mod handler;
mod types;

#[cfg(test)]
mod tests;

pub use types::{Claims, JwtHandler, TokenError};
