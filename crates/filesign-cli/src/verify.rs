//! `filesign verify` — check a file against an armored key and a signature.

use std::path::Path;

use anyhow::Context;
use filesign::Signature;
use filesign::armor::decode_public_key;
use filesign::worker::Worker;

pub async fn run(worker: &Worker, file: &Path, public_key: &Path, signature: &Path) -> anyhow::Result<()> {
    if !check(worker, file, public_key, signature).await? {
        anyhow::bail!("signature invalid for {}", file.display());
    }

    println!("✓ Signature valid");
    println!("  File: {}", file.display());
    Ok(())
}

/// Read the three inputs and verify. Unreadable files are errors; anything
/// wrong with their contents is just an invalid signature.
async fn check(worker: &Worker, file: &Path, public_key: &Path, signature: &Path) -> anyhow::Result<bool> {
    let payload = std::fs::read(file).with_context(|| format!("failed to read {}", file.display()))?;
    let armored = std::fs::read(public_key).with_context(|| format!("failed to read {}", public_key.display()))?;
    let signature_bytes =
        std::fs::read(signature).with_context(|| format!("failed to read {}", signature.display()))?;

    let (armored, signature_text) = match (String::from_utf8(armored), String::from_utf8(signature_bytes)) {
        (Ok(armored), Ok(signature_text)) => (armored, signature_text),
        _ => {
            tracing::debug!("public key or signature is not UTF-8 text");
            return Ok(false);
        }
    };

    let key = match decode_public_key(&armored) {
        Ok(key) => key,
        Err(e) => {
            tracing::debug!(error = %e, "public key did not decode");
            return Ok(false);
        }
    };

    tracing::debug!(fingerprint = %key.fingerprint(), payload_len = payload.len(), "verifying");
    Ok(worker.verify(key, payload, Signature::from(signature_text.trim())).await)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use filesign::armor::encode_public_key;
    use filesign::keys::generate_keypair;
    use filesign::signer::sign;

    use super::*;

    struct Fixture {
        _dir: tempfile::TempDir,
        file: PathBuf,
        public_key: PathBuf,
        signature: PathBuf,
    }

    fn fixture(content: &[u8]) -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let pair = generate_keypair().unwrap();

        let file = dir.path().join("data.bin");
        let public_key = dir.path().join("data.bin.pub.pem");
        let signature = dir.path().join("data.bin.sig");
        std::fs::write(&file, content).unwrap();
        std::fs::write(&public_key, encode_public_key(pair.public_key()).as_str()).unwrap();
        std::fs::write(&signature, format!("{}\n", sign(pair.private_key(), content).unwrap())).unwrap();

        Fixture {
            _dir: dir,
            file,
            public_key,
            signature,
        }
    }

    #[tokio::test]
    async fn valid_and_tampered() {
        let fx = fixture(b"hello world");
        let worker = Worker::default();

        assert!(check(&worker, &fx.file, &fx.public_key, &fx.signature).await.unwrap());
        run(&worker, &fx.file, &fx.public_key, &fx.signature).await.unwrap();

        std::fs::write(&fx.file, b"hello world!").unwrap();
        assert!(!check(&worker, &fx.file, &fx.public_key, &fx.signature).await.unwrap());
        let err = run(&worker, &fx.file, &fx.public_key, &fx.signature).await.unwrap_err();
        assert!(err.to_string().contains("signature invalid"));
    }

    #[tokio::test]
    async fn garbage_contents_are_invalid() {
        let fx = fixture(b"payload");
        let worker = Worker::default();

        std::fs::write(&fx.signature, "not-base64!!").unwrap();
        assert!(!check(&worker, &fx.file, &fx.public_key, &fx.signature).await.unwrap());

        std::fs::write(&fx.signature, "").unwrap();
        assert!(!check(&worker, &fx.file, &fx.public_key, &fx.signature).await.unwrap());

        std::fs::write(&fx.public_key, "garbage text").unwrap();
        assert!(!check(&worker, &fx.file, &fx.public_key, &fx.signature).await.unwrap());
    }

    #[tokio::test]
    async fn non_utf8_contents_are_invalid() {
        let fx = fixture(b"payload");
        let worker = Worker::default();
        let good_signature = std::fs::read(&fx.signature).unwrap();

        std::fs::write(&fx.signature, [0xff, 0xfe, 0x00]).unwrap();
        assert!(!check(&worker, &fx.file, &fx.public_key, &fx.signature).await.unwrap());

        std::fs::write(&fx.signature, good_signature).unwrap();
        assert!(check(&worker, &fx.file, &fx.public_key, &fx.signature).await.unwrap());

        std::fs::write(&fx.public_key, [0xff, 0xfe]).unwrap();
        assert!(!check(&worker, &fx.file, &fx.public_key, &fx.signature).await.unwrap());
    }

    #[tokio::test]
    async fn missing_file_is_an_error() {
        let fx = fixture(b"payload");
        let missing = fx.file.with_file_name("nope");
        let err = check(&Worker::default(), &fx.file, &missing, &fx.signature).await.unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}
