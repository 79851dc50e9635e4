//! Public key armor: PEM-style text around a base64 SubjectPublicKeyInfo.
//!
//! ```text
//! -----BEGIN PUBLIC KEY-----
//! <base64, 64 chars per line>
//! -----END PUBLIC KEY-----
//! ```

use std::fmt;
use std::str::FromStr;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use rsa::RsaPublicKey;
use rsa::pkcs8::DecodePublicKey;
use serde::Deserialize;
use serde::Serialize;

use crate::error::MalformedKeyError;
use crate::keys::PublicKey;
use crate::profile::MODULUS_BITS;

pub const PUBLIC_KEY_HEADER: &str = "-----BEGIN PUBLIC KEY-----";
pub const PUBLIC_KEY_FOOTER: &str = "-----END PUBLIC KEY-----";

const LINE_WIDTH: usize = 64;

/// Armored text form of a [`PublicKey`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArmoredPublicKey(String);

impl ArmoredPublicKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Parse the armor back into a key.
    pub fn decode(&self) -> Result<PublicKey, MalformedKeyError> {
        decode_public_key(&self.0)
    }
}

impl fmt::Display for ArmoredPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ArmoredPublicKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Export a public key as armored text. Deterministic for a given key.
pub fn encode_public_key(key: &PublicKey) -> ArmoredPublicKey {
    let body = STANDARD.encode(key.spki_der());

    let mut out = String::with_capacity(body.len() + body.len() / LINE_WIDTH + 64);
    out.push_str(PUBLIC_KEY_HEADER);
    out.push('\n');
    // base64 output is ASCII, so byte chunks are char boundaries.
    for line in body.as_bytes().chunks(LINE_WIDTH) {
        out.extend(line.iter().map(|&b| b as char));
        out.push('\n');
    }
    out.push_str(PUBLIC_KEY_FOOTER);
    out.push('\n');

    ArmoredPublicKey(out)
}

/// Parse armored text into a public key.
///
/// Whitespace around the armor and anywhere inside the body is ignored. The
/// delimiters are matched literally.
pub fn decode_public_key(armored: &str) -> Result<PublicKey, MalformedKeyError> {
    let text = armored.trim();
    let rest = text.strip_prefix(PUBLIC_KEY_HEADER).ok_or(MalformedKeyError::MissingHeader)?;
    let body = rest.strip_suffix(PUBLIC_KEY_FOOTER).ok_or(MalformedKeyError::MissingFooter)?;

    let compact: String = body.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let der = STANDARD.decode(compact)?;

    let rsa_key = RsaPublicKey::from_public_key_der(&der)?;
    let key = PublicKey::from_rsa(rsa_key)?;
    if key.bits() != MODULUS_BITS {
        return Err(MalformedKeyError::UnsupportedKeySize { bits: key.bits() });
    }
    Ok(key)
}

impl FromStr for PublicKey {
    type Err = MalformedKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_public_key(s)
    }
}

#[cfg(test)]
mod tests {
    use rand_core::OsRng;
    use rsa::RsaPrivateKey;
    use rsa::pkcs8::EncodePublicKey;
    use rsa::pkcs8::LineEnding;

    use super::*;
    use crate::keys::test_support::shared_keypair;

    #[test]
    fn encode_layout() {
        let armored = encode_public_key(shared_keypair().public_key());
        let text = armored.as_str();

        assert!(text.starts_with("-----BEGIN PUBLIC KEY-----\n"));
        assert!(text.ends_with("-----END PUBLIC KEY-----\n"));

        let lines: Vec<&str> = text.lines().collect();
        let body = &lines[1..lines.len() - 1];
        assert!(!body.is_empty());
        for line in &body[..body.len() - 1] {
            assert_eq!(line.len(), LINE_WIDTH);
        }
        assert!(body[body.len() - 1].len() <= LINE_WIDTH);
    }

    #[test]
    fn encode_matches_conventional_pem() {
        let key = shared_keypair().public_key();
        let pem = key.as_rsa().to_public_key_pem(LineEnding::LF).unwrap();
        assert_eq!(encode_public_key(key).as_str(), pem);
    }

    #[test]
    fn encode_is_deterministic() {
        let key = shared_keypair().public_key();
        assert_eq!(encode_public_key(key), encode_public_key(key));
    }

    #[test]
    fn decode_roundtrip() {
        let key = shared_keypair().public_key();
        let decoded = encode_public_key(key).decode().unwrap();
        assert_eq!(&decoded, key);
        assert_eq!(decoded.fingerprint(), key.fingerprint());
    }

    #[test]
    fn decode_tolerates_crlf_and_surrounding_whitespace() {
        let key = shared_keypair().public_key();
        let armored = encode_public_key(key).into_string().replace('\n', "\r\n");
        let padded = format!("\n\n  {armored}  \n");
        assert_eq!(&decode_public_key(&padded).unwrap(), key);
    }

    #[test]
    fn decode_accepts_unwrapped_body() {
        let key = shared_keypair().public_key();
        let one_line = format!("{PUBLIC_KEY_HEADER}{}{PUBLIC_KEY_FOOTER}", STANDARD.encode(key.spki_der()));
        assert_eq!(&one_line.parse::<PublicKey>().unwrap(), key);
    }

    #[test]
    fn missing_header() {
        let err = decode_public_key("garbage text").unwrap_err();
        assert!(matches!(err, MalformedKeyError::MissingHeader));

        let armored = encode_public_key(shared_keypair().public_key());
        let headless = armored.as_str().replace(PUBLIC_KEY_HEADER, "");
        assert!(matches!(decode_public_key(&headless).unwrap_err(), MalformedKeyError::MissingHeader));
    }

    #[test]
    fn missing_footer() {
        let armored = encode_public_key(shared_keypair().public_key());
        let footless = armored.as_str().replace(PUBLIC_KEY_FOOTER, "");
        assert!(matches!(decode_public_key(&footless).unwrap_err(), MalformedKeyError::MissingFooter));
    }

    #[test]
    fn rejects_other_armor_types() {
        let text = "-----BEGIN RSA PUBLIC KEY-----\nAAAA\n-----END RSA PUBLIC KEY-----\n";
        assert!(matches!(decode_public_key(text).unwrap_err(), MalformedKeyError::MissingHeader));
    }

    #[test]
    fn invalid_base64_body() {
        let text = format!("{PUBLIC_KEY_HEADER}\nnot-base64!!\n{PUBLIC_KEY_FOOTER}\n");
        assert!(matches!(decode_public_key(&text).unwrap_err(), MalformedKeyError::InvalidBase64(_)));
    }

    #[test]
    fn valid_base64_but_not_a_key() {
        let body = STANDARD.encode(b"definitely not DER");
        let text = format!("{PUBLIC_KEY_HEADER}\n{body}\n{PUBLIC_KEY_FOOTER}\n");
        assert!(matches!(decode_public_key(&text).unwrap_err(), MalformedKeyError::InvalidKey(_)));

        let empty = format!("{PUBLIC_KEY_HEADER}\n{PUBLIC_KEY_FOOTER}\n");
        assert!(matches!(decode_public_key(&empty).unwrap_err(), MalformedKeyError::InvalidKey(_)));
    }

    #[test]
    fn truncated_key_is_rejected() {
        let der = shared_keypair().public_key().spki_der();
        let body = STANDARD.encode(&der[..der.len() / 2]);
        let text = format!("{PUBLIC_KEY_HEADER}\n{body}\n{PUBLIC_KEY_FOOTER}\n");
        assert!(matches!(decode_public_key(&text).unwrap_err(), MalformedKeyError::InvalidKey(_)));
    }

    #[test]
    fn wrong_modulus_size_is_rejected() {
        let small = RsaPrivateKey::new(&mut OsRng, 1024).unwrap();
        let pem = small.to_public_key().to_public_key_pem(LineEnding::LF).unwrap();
        let err = decode_public_key(&pem).unwrap_err();
        assert!(matches!(err, MalformedKeyError::UnsupportedKeySize { bits: 1024 }));
    }

    #[test]
    fn serde_is_transparent() {
        let armored = encode_public_key(shared_keypair().public_key());
        let json = serde_json::to_string(&armored).unwrap();
        assert_eq!(json, serde_json::to_string(armored.as_str()).unwrap());
        let back: ArmoredPublicKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, armored);
    }
}
