//! Run key generation, signing, and verification off the async executor.
//!
//! RSA operations are CPU-bound, so each one runs on tokio's blocking pool.
//! Dropping a returned future abandons the result; the blocking task runs to
//! completion in the background but has no side effects.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;

use crate::error::SigningError;
use crate::keys::KeyPair;
use crate::keys::PublicKey;
use crate::keys::generate_keypair;
use crate::signature::Signature;
use crate::signer;
use crate::verifier;

/// Worker settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WorkerConfig {
    /// Upper bound on a single operation. `None` waits indefinitely.
    #[serde(with = "timeout_secs")]
    pub timeout: Option<Duration>,
}

mod timeout_secs {
    use std::time::Duration;

    use serde::Deserialize;
    use serde::Deserializer;
    use serde::de::Error;

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Duration>, D::Error> {
        Option::<f64>::deserialize(deserializer)?
            .map(|secs| Duration::try_from_secs_f64(secs).map_err(D::Error::custom))
            .transpose()
    }
}

/// Async front end to the signing primitives.
#[derive(Debug, Clone, Default)]
pub struct Worker {
    config: WorkerConfig,
}

impl Worker {
    pub fn new(config: WorkerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WorkerConfig {
        &self.config
    }

    pub async fn generate(&self) -> Result<KeyPair, SigningError> {
        self.run(generate_keypair).await?
    }

    /// Sign with a snapshot of a key pair, typically from
    /// [`crate::session::SigningSession::current`].
    pub async fn sign(&self, pair: Arc<KeyPair>, payload: Vec<u8>) -> Result<Signature, SigningError> {
        self.run(move || signer::sign(pair.private_key(), &payload)).await?
    }

    /// Verify in the background. Timeouts and task failures yield `false`.
    pub async fn verify(&self, public_key: PublicKey, payload: Vec<u8>, signature: Signature) -> bool {
        match self.run(move || verifier::verify(&public_key, &payload, &signature)).await {
            Ok(valid) => valid,
            Err(e) => {
                tracing::warn!(error = %e, "background verification did not complete");
                false
            }
        }
    }

    async fn run<F, T>(&self, op: F) -> Result<T, SigningError>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let handle = tokio::task::spawn_blocking(op);
        let joined = match self.config.timeout {
            Some(limit) => with_timeout(limit, handle).await?,
            None => handle.await,
        };
        joined.map_err(|e| SigningError::Worker(e.to_string()))
    }
}

async fn with_timeout<T>(limit: Duration, fut: impl Future<Output = T>) -> Result<T, SigningError> {
    tokio::time::timeout(limit, fut).await.map_err(|_| {
        tracing::warn!(?limit, "background operation timed out");
        SigningError::TimedOut(limit)
    })
}
