//! Session token failures.

use thiserror::Error;

/// Why a session token could not be issued or accepted.
///
/// Decode failures never reach clients; the dispatcher downgrades them to an
/// anonymous caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// The token was valid once but `exp` has passed.
    #[error("session token has expired")]
    Expired,
    /// The signature does not match the payload under the configured secret.
    #[error("session token signature is invalid")]
    InvalidSignature,
    /// The token could not be split, base64-decoded, or deserialized.
    #[error("session token is malformed")]
    Malformed,
    /// Serializing or signing the claims failed while issuing a token.
    #[error("failed to encode session token: {0}")]
    Encoding(String),
}
