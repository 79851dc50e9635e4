//! A signing session holding at most one key pair.

use std::sync::Arc;

use crate::armor::ArmoredPublicKey;
use crate::armor::encode_public_key;
use crate::error::SigningError;
use crate::keys::KeyPair;
use crate::keys::PublicKey;
use crate::keys::generate_keypair;
use crate::signature::Signature;
use crate::signer;

/// Owns the current key pair for one signing session.
///
/// [`generate`](Self::generate) replaces the pair as a whole. Anyone holding
/// the `Arc` returned by [`current`](Self::current) keeps signing with the
/// old pair until they drop it.
#[derive(Debug, Default)]
pub struct SigningSession {
    current: Option<Arc<KeyPair>>,
}

impl SigningSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a fresh key pair and make it current.
    ///
    /// If generation fails the previous pair stays in place.
    pub fn generate(&mut self) -> Result<Arc<KeyPair>, SigningError> {
        let pair = Arc::new(generate_keypair()?);
        self.current = Some(Arc::clone(&pair));
        Ok(pair)
    }

    /// Install a pair produced elsewhere, e.g. by [`crate::worker::Worker::generate`].
    pub fn replace(&mut self, pair: KeyPair) -> Arc<KeyPair> {
        let pair = Arc::new(pair);
        self.current = Some(Arc::clone(&pair));
        pair
    }

    pub fn current(&self) -> Option<Arc<KeyPair>> {
        self.current.clone()
    }

    pub fn public_key(&self) -> Option<&PublicKey> {
        self.current.as_deref().map(KeyPair::public_key)
    }

    /// Armored public half of the current pair.
    pub fn export_public_key(&self) -> Option<ArmoredPublicKey> {
        self.public_key().map(encode_public_key)
    }

    /// Sign with the current pair. Fails with [`SigningError::NoKeyPair`] if
    /// nothing has been generated yet.
    pub fn sign(&self, payload: &[u8]) -> Result<Signature, SigningError> {
        let pair = self.current.as_deref().ok_or(SigningError::NoKeyPair)?;
        signer::sign(pair.private_key(), payload)
    }

    /// Drop the current pair.
    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn has_key_pair(&self) -> bool {
        self.current.is_some()
    }
}
