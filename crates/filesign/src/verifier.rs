//! Signature verification.
//!
//! Every failure, whether a tampered payload, the wrong key, or text that is
//! not a signature at all, is reported as `false`. The reason is only visible
//! in debug logs.

use rsa::pss;
use rsa::signature::Verifier;
use rsa::traits::PublicKeyParts;

use crate::armor::decode_public_key;
use crate::error::MalformedKeyError;
use crate::keys::PublicKey;
use crate::profile::ProfileHash;
use crate::profile::SALT_LEN;
use crate::signature::Signature;

#[derive(Debug, thiserror::Error)]
enum Rejection {
    #[error("malformed public key: {0}")]
    Key(MalformedKeyError),
    #[error("signature is not base64: {0}")]
    Encoding(base64::DecodeError),
    #[error("signature length {actual}, expected {expected}")]
    Length { expected: usize, actual: usize },
    #[error("signature is not a valid PSS signature")]
    Structure,
    #[error("signature does not match payload and key")]
    Mismatch,
}

/// Check `signature` over `payload` under `public_key`.
///
/// Returns `true` only when the signature was made by the matching private
/// key over exactly these bytes.
pub fn verify(public_key: &PublicKey, payload: &[u8], signature: &Signature) -> bool {
    report(check(public_key, payload, signature))
}

/// Like [`verify`], taking the public key as armored text and the signature
/// as base64 text. A key that fails to decode yields `false`.
pub fn verify_armored(armored_key: &str, payload: &[u8], signature: &str) -> bool {
    let outcome = decode_public_key(armored_key)
        .map_err(Rejection::Key)
        .and_then(|key| check(&key, payload, &Signature::from(signature)));
    report(outcome)
}

fn check(public_key: &PublicKey, payload: &[u8], signature: &Signature) -> Result<(), Rejection> {
    let bytes = signature.to_bytes().map_err(Rejection::Encoding)?;

    let expected = public_key.as_rsa().size();
    if bytes.len() != expected {
        return Err(Rejection::Length {
            expected,
            actual: bytes.len(),
        });
    }

    let pss_signature = pss::Signature::try_from(bytes.as_slice()).map_err(|_| Rejection::Structure)?;
    let verifying_key = pss::VerifyingKey::<ProfileHash>::new_with_salt_len(public_key.as_rsa().clone(), SALT_LEN);
    verifying_key.verify(payload, &pss_signature).map_err(|_| Rejection::Mismatch)
}

fn report(outcome: Result<(), Rejection>) -> bool {
    match outcome {
        Ok(()) => true,
        Err(reason) => {
            tracing::debug!(%reason, "signature rejected");
            false
        }
    }
}
