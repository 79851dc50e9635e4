//! Error types for key decoding and signing.
//!
//! Verification has no error type: every verification failure is reported as
//! `false` by [`crate::verifier`].

use std::time::Duration;

/// Armored public key text could not be turned into a usable key.
#[derive(Debug, thiserror::Error)]
pub enum MalformedKeyError {
    /// The `-----BEGIN PUBLIC KEY-----` line is not the first text.
    #[error("missing public key header")]
    MissingHeader,

    /// The `-----END PUBLIC KEY-----` line is not the last text.
    #[error("missing public key footer")]
    MissingFooter,

    /// The armored body is not valid base64.
    #[error("invalid base64 in key body: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    /// The decoded bytes are not an RSA SubjectPublicKeyInfo.
    #[error("invalid RSA public key: {0}")]
    InvalidKey(#[from] rsa::pkcs8::spki::Error),

    /// The key is RSA but outside the fixed profile.
    #[error("unsupported key size: expected 2048 bits, got {bits}")]
    UnsupportedKeySize { bits: usize },
}

/// Errors from key generation and signing.
#[derive(Debug, thiserror::Error)]
pub enum SigningError {
    /// The session holds no key pair.
    #[error("no key pair has been generated")]
    NoKeyPair,

    /// The RSA primitive failed to produce a key.
    #[error("key generation failed: {0}")]
    KeyGeneration(#[source] rsa::Error),

    /// A freshly generated public key could not be encoded.
    #[error("public key encoding failed: {0}")]
    KeyEncoding(#[from] rsa::pkcs8::spki::Error),

    /// The PSS signing primitive failed.
    #[error("signing failed: {0}")]
    Signing(#[from] rsa::signature::Error),

    /// The payload could not be read in full.
    #[error("failed to read payload: {0}")]
    Payload(#[from] std::io::Error),

    /// A background operation exceeded the configured timeout.
    #[error("operation timed out after {0:?}")]
    TimedOut(Duration),

    /// A background task panicked or was cancelled.
    #[error("background task failed: {0}")]
    Worker(String),
}
