//! `filesign sign` — generate a key pair, sign a file, write the public half.

use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use filesign::armor::encode_public_key;
use filesign::worker::Worker;

use crate::paths::with_suffix;

/// Resolved output files for one signing run.
#[derive(Debug)]
pub struct Outputs {
    pub public_key: PathBuf,
    pub signature: PathBuf,
}

impl Outputs {
    /// Fill in defaults and refuse to clobber existing files unless `force`.
    pub fn resolve(
        file: &Path,
        public_key: Option<PathBuf>,
        signature: Option<PathBuf>,
        force: bool,
    ) -> anyhow::Result<Self> {
        let outputs = Self {
            public_key: public_key.unwrap_or_else(|| with_suffix(file, "pub.pem")),
            signature: signature.unwrap_or_else(|| with_suffix(file, "sig")),
        };

        if outputs.public_key == outputs.signature {
            anyhow::bail!("public key and signature cannot both be written to {}", outputs.signature.display());
        }
        if !force {
            for path in [&outputs.public_key, &outputs.signature] {
                if path.exists() {
                    anyhow::bail!("{} already exists. Remove it first or use --force.", path.display());
                }
            }
        }

        Ok(outputs)
    }
}

pub async fn run(worker: &Worker, file: &Path, outputs: &Outputs, json: bool) -> anyhow::Result<()> {
    let payload = std::fs::read(file).with_context(|| format!("failed to read {}", file.display()))?;
    let payload_len = payload.len();

    let pair = Arc::new(worker.generate().await?);
    let armored = encode_public_key(pair.public_key());
    let fingerprint = pair.public_key().fingerprint();

    let signature = worker.sign(Arc::clone(&pair), payload).await?;
    drop(pair);

    write_outputs(outputs, armored.as_str(), &format!("{signature}\n"))?;

    tracing::info!(file = %file.display(), payload_len, %fingerprint, "signed file");

    if json {
        let out = serde_json::json!({
            "public_key": armored,
            "signature": signature,
            "fingerprint": fingerprint,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("✓ Signed {} ({} bytes)", file.display(), payload_len);
        println!("  Key fingerprint: {}", &fingerprint[..16]);
        println!("  Public key: {}", outputs.public_key.display());
        println!("  Signature:  {}", outputs.signature.display());
        println!();
        println!("  Share the public key and signature with the file. Others can check it with:");
        println!(
            "    filesign verify {} --public-key {} --signature {}",
            file.display(),
            outputs.public_key.display(),
            outputs.signature.display()
        );
    }

    Ok(())
}

/// Write both outputs, or neither: a lone public key would block the next
/// run without `--force`.
fn write_outputs(outputs: &Outputs, armored: &str, signature: &str) -> anyhow::Result<()> {
    std::fs::write(&outputs.public_key, armored)
        .with_context(|| format!("failed to write {}", outputs.public_key.display()))?;
    if let Err(e) = std::fs::write(&outputs.signature, signature) {
        let _ = std::fs::remove_file(&outputs.public_key);
        return Err(e).with_context(|| format!("failed to write {}", outputs.signature.display()));
    }
    Ok(())
}
