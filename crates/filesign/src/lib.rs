//! RSA-PSS signing and verification of file payloads.
//!
//! One party generates a key pair, publishes the armored public key, and signs
//! files with the private half. Anyone holding the armored key, the file, and
//! the base64 signature can check authenticity.
//!
//! The algorithm profile is fixed (see [`profile`]): RSA 2048 with exponent
//! 65537, RSASSA-PSS over SHA-256 with a 32-byte salt. Nothing in the key or
//! signature text identifies the algorithm.
//!
//! # Signing
//!
//! ```
//! use filesign::armor;
//! use filesign::keys;
//! use filesign::signer;
//! use filesign::verifier;
//!
//! let pair = keys::generate_keypair().unwrap();
//! let armored = armor::encode_public_key(pair.public_key());
//! let sig = signer::sign(pair.private_key(), b"hello world").unwrap();
//!
//! assert!(verifier::verify_armored(armored.as_str(), b"hello world", sig.as_str()));
//! assert!(!verifier::verify_armored(armored.as_str(), b"hello world!", sig.as_str()));
//! ```
//!
//! # Sessions
//!
//! [`SigningSession`] keeps the current key pair for an interactive host and
//! replaces it whole on each `generate()`. [`worker::Worker`] runs the same
//! operations on tokio's blocking pool.

pub mod armor;
pub mod error;
pub mod keys;
pub mod profile;
pub mod session;
pub mod signature;
pub mod signer;
pub mod verifier;
pub mod worker;

pub use armor::ArmoredPublicKey;
pub use error::MalformedKeyError;
pub use error::SigningError;
pub use keys::KeyPair;
pub use keys::PrivateKey;
pub use keys::PublicKey;
pub use session::SigningSession;
pub use signature::Signature;
