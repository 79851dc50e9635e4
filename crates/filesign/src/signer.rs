//! RSASSA-PSS signing with SHA-256 and a 32-byte salt.

use std::io::Read;

use rand_core::OsRng;
use rsa::pss;
use rsa::pss::BlindedSigningKey;
use rsa::signature::RandomizedSigner;
use rsa::signature::SignatureEncoding;

use crate::error::SigningError;
use crate::keys::PrivateKey;
use crate::profile::ProfileHash;
use crate::profile::SALT_LEN;
use crate::signature::Signature;

/// Sign a payload.
///
/// The salt is fresh per call, so signing the same bytes twice yields two
/// different signatures that both verify.
pub fn sign(private_key: &PrivateKey, payload: &[u8]) -> Result<Signature, SigningError> {
    let signing_key = BlindedSigningKey::<ProfileHash>::new_with_salt_len(private_key.as_rsa().clone(), SALT_LEN);
    let signature: pss::Signature = signing_key.try_sign_with_rng(&mut OsRng, payload)?;

    tracing::debug!(payload_len = payload.len(), "signed payload");

    Ok(Signature::from_bytes(&signature.to_bytes()))
}

/// Read a payload to the end, then sign it.
pub fn sign_reader<R: Read>(private_key: &PrivateKey, mut reader: R) -> Result<Signature, SigningError> {
    let mut payload = Vec::new();
    reader.read_to_end(&mut payload)?;
    sign(private_key, &payload)
}
