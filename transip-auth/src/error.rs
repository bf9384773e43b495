use thiserror::Error;

/// Errors produced while loading key material or signing a request body.
#[derive(Error, Debug)]
pub enum AuthError {
    /// The key content does not match the PEM private-key envelope grammar.
    /// This is permanent for the given file; there is nothing to retry.
    #[error("key is not a valid PEM private key block")]
    InvalidKeyFormat,

    #[error("failed to read key file: {0}")]
    Io(#[from] std::io::Error),

    #[error("signing failed: {0}")]
    Signing(String),
}
