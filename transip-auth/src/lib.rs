//! # TransIP Auth
//!
//! Request-signing core for the TransIP REST API.
//!
//! This crate covers the credential side of the authentication handshake and
//! has no networking dependencies:
//!
//! - Loading and normalizing PEM private keys ([`PrivateKeyMaterial`])
//! - Building the canonical token-request body ([`AuthRequest`])
//! - RSA/SHA-512 signing of that body ([`sign`])
//!
//! The TransIP authentication endpoint verifies the signature over the exact
//! bytes of the request body, so the body serialization here is canonical:
//! compact JSON with a fixed field order and no whitespace after separators.

mod error;
mod keys;
mod sign;

pub use error::AuthError;
pub use keys::PrivateKeyMaterial;
pub use sign::{fresh_nonce, sign, AuthRequest};
