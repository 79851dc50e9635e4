//! `filesign fingerprint` — validate an armored public key.

use std::path::Path;

use anyhow::Context;
use filesign::armor::decode_public_key;

pub fn run(public_key: &Path) -> anyhow::Result<()> {
    let armored =
        std::fs::read_to_string(public_key).with_context(|| format!("failed to read {}", public_key.display()))?;
    let key = decode_public_key(&armored)
        .with_context(|| format!("{} is not a usable public key", public_key.display()))?;

    println!("{}", key.fingerprint());
    println!("  RSA {} bits, RSA-PSS / SHA-256 / salt 32", key.bits());
    Ok(())
}
