//! RSA key pair generation and key types.

use std::fmt;

use rand_core::OsRng;
use rsa::BigUint;
use rsa::RsaPrivateKey;
use rsa::RsaPublicKey;
use rsa::pkcs8::EncodePublicKey;
use rsa::traits::PublicKeyParts;
use sha2::Digest;
use sha2::Sha256;

use crate::error::SigningError;
use crate::profile::MODULUS_BITS;
use crate::profile::PUBLIC_EXPONENT;

/// The signing half of a [`KeyPair`].
///
/// Never serialized. Key material is zeroized when dropped.
pub struct PrivateKey {
    inner: RsaPrivateKey,
}

impl PrivateKey {
    pub(crate) fn as_rsa(&self) -> &RsaPrivateKey {
        &self.inner
    }

    /// Modulus size in bits.
    pub fn bits(&self) -> usize {
        self.inner.n().bits()
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey").field("bits", &self.bits()).finish_non_exhaustive()
    }
}

/// The verification half of a [`KeyPair`], safe to disclose.
///
/// Carries its SubjectPublicKeyInfo DER encoding alongside the parsed key so
/// that exporting it never fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    inner: RsaPublicKey,
    spki_der: Vec<u8>,
}

impl PublicKey {
    pub(crate) fn from_rsa(inner: RsaPublicKey) -> Result<Self, rsa::pkcs8::spki::Error> {
        let spki_der = inner.to_public_key_der()?.as_bytes().to_vec();
        Ok(Self { inner, spki_der })
    }

    pub(crate) fn as_rsa(&self) -> &RsaPublicKey {
        &self.inner
    }

    /// DER-encoded SubjectPublicKeyInfo.
    pub fn spki_der(&self) -> &[u8] {
        &self.spki_der
    }

    /// Modulus size in bits.
    pub fn bits(&self) -> usize {
        self.inner.n().bits()
    }

    /// Lowercase hex SHA-256 of the SubjectPublicKeyInfo (64 chars).
    pub fn fingerprint(&self) -> String {
        hex::encode(Sha256::digest(&self.spki_der))
    }
}

/// A private key and the public key derived from it.
///
/// Only [`generate_keypair`] creates one, so the halves are always linked.
#[derive(Debug)]
pub struct KeyPair {
    private_key: PrivateKey,
    public_key: PublicKey,
}

impl KeyPair {
    pub fn private_key(&self) -> &PrivateKey {
        &self.private_key
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }
}

/// Generate a fresh 2048-bit RSA key pair with exponent 65537.
///
/// Entropy always comes from the operating system; there is no seeded variant.
pub fn generate_keypair() -> Result<KeyPair, SigningError> {
    let exponent = BigUint::from(PUBLIC_EXPONENT);
    let inner = RsaPrivateKey::new_with_exp(&mut OsRng, MODULUS_BITS, &exponent).map_err(SigningError::KeyGeneration)?;
    let public_key = PublicKey::from_rsa(inner.to_public_key())?;

    tracing::debug!(fingerprint = %public_key.fingerprint(), "generated RSA key pair");

    Ok(KeyPair {
        private_key: PrivateKey { inner },
        public_key,
    })
}
