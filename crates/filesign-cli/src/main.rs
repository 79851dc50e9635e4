//! `filesign` — sign files with a fresh RSA key and verify detached signatures.

mod fingerprint;
mod paths;
mod sign;
mod verify;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use clap::Subcommand;
use filesign::worker::Worker;
use filesign::worker::WorkerConfig;

/// Sign and verify files with RSA-PSS (SHA-256, salt 32, 2048-bit keys).
#[derive(Parser)]
#[command(name = "filesign", version)]
struct Cli {
    /// Give up on any single key generation, signing, or verification after this many seconds.
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a fresh key pair and sign a file with it.
    ///
    /// The public key and signature are written next to the file. The private
    /// key is never written anywhere.
    Sign {
        /// File to sign.
        file: PathBuf,
        /// Where to write the armored public key (defaults to <FILE>.pub.pem).
        #[arg(long)]
        public_key_out: Option<PathBuf>,
        /// Where to write the base64 signature (defaults to <FILE>.sig).
        #[arg(long)]
        signature_out: Option<PathBuf>,
        /// Overwrite existing output files.
        #[arg(long)]
        force: bool,
        /// Print the public key, signature, and fingerprint as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Check a file against a public key and signature.
    Verify {
        /// File to verify.
        file: PathBuf,
        /// Armored public key file.
        #[arg(long)]
        public_key: PathBuf,
        /// Base64 signature file.
        #[arg(long)]
        signature: PathBuf,
    },

    /// Validate an armored public key and print its fingerprint.
    Fingerprint {
        /// Armored public key file.
        public_key: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let worker = Worker::new(WorkerConfig {
        timeout: cli.timeout_secs.map(Duration::from_secs),
    });

    match cli.command {
        Command::Sign {
            file,
            public_key_out,
            signature_out,
            force,
            json,
        } => {
            let outputs = sign::Outputs::resolve(&file, public_key_out, signature_out, force)?;
            sign::run(&worker, &file, &outputs, json).await
        }
        Command::Verify {
            file,
            public_key,
            signature,
        } => verify::run(&worker, &file, &public_key, &signature).await,
        Command::Fingerprint { public_key } => fingerprint::run(&public_key),
    }
}
