//! The fixed algorithm profile.
//!
//! Signer and verifier must agree on every value here out of band; nothing in
//! the armored key or the signature text records them. Changing any constant
//! is a breaking protocol change.

/// RSA modulus size in bits.
pub const MODULUS_BITS: usize = 2048;

/// RSA public exponent (F4).
pub const PUBLIC_EXPONENT: u64 = 65537;

/// RSASSA-PSS salt length in bytes. Equal to the SHA-256 output size.
pub const SALT_LEN: usize = 32;

/// Signature size in bytes for a [`MODULUS_BITS`] key.
pub const SIGNATURE_LEN: usize = MODULUS_BITS / 8;

/// Hash used for both the message digest and MGF1.
pub type ProfileHash = sha2::Sha256;
