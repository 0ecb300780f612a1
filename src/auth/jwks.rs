use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use jsonwebtoken::DecodingKey;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info};
use url::Url;

/// One entry of a published JSON Web Key Set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Jwk {
    pub kty: String,
    #[serde(default)]
    pub kid: Option<String>,
    #[serde(rename = "use", default)]
    pub key_use: Option<String>,
    #[serde(default)]
    pub alg: Option<String>,
    #[serde(default)]
    pub n: Option<String>,
    #[serde(default)]
    pub e: Option<String>,
}

impl Jwk {
    /// RSA verification key built from the modulus and exponent; `None` for other key types
    pub fn decoding_key(&self) -> Option<DecodingKey> {
        if self.kty != "RSA" {
            return None;
        }
        let (n, e) = (self.n.as_deref()?, self.e.as_deref()?);
        DecodingKey::from_rsa_components(n, e).ok()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JwkSet {
    pub keys: Vec<Jwk>,
}

impl JwkSet {
    pub fn find(&self, kid: &str) -> Option<&Jwk> {
        self.keys.iter().find(|k| k.kid.as_deref() == Some(kid))
    }
}

#[derive(Debug, Error)]
pub enum KeySourceError {
    #[error("key discovery request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid key discovery URL '{0}'")]
    InvalidUrl(String),

    #[error("failed to read key set from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid key set: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Somewhere the issuer's public signing keys can be obtained from
#[async_trait]
pub trait KeySource: Send + Sync {
    async fn fetch(&self) -> Result<JwkSet, KeySourceError>;
}

/// Fetches the key set from the issuer's well-known discovery endpoint
pub struct RemoteKeySource {
    client: reqwest::Client,
    url: Url,
}

impl RemoteKeySource {
    pub fn new(url: &str) -> Result<Self, KeySourceError> {
        let url = Url::parse(url).map_err(|_| KeySourceError::InvalidUrl(url.to_string()))?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self { client, url })
    }
}

#[async_trait]
impl KeySource for RemoteKeySource {
    async fn fetch(&self) -> Result<JwkSet, KeySourceError> {
        debug!("Fetching signing keys from {}", self.url);
        let keys = self
            .client
            .get(self.url.clone())
            .send()
            .await?
            .error_for_status()?
            .json::<JwkSet>()
            .await?;
        Ok(keys)
    }
}

/// Fixed key set, e.g. loaded from a file for offline deployments
pub struct StaticKeySource {
    keys: JwkSet,
}

impl StaticKeySource {
    pub fn new(keys: JwkSet) -> Self {
        Self { keys }
    }

    pub fn from_json(json: &str) -> Result<Self, KeySourceError> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    pub fn from_file(path: &Path) -> Result<Self, KeySourceError> {
        let json = std::fs::read_to_string(path).map_err(|source| KeySourceError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }
}

#[async_trait]
impl KeySource for StaticKeySource {
    async fn fetch(&self) -> Result<JwkSet, KeySourceError> {
        Ok(self.keys.clone())
    }
}

struct CachedKeys {
    keys: JwkSet,
    fetched_at: Instant,
}

/// Process-wide key cache, refreshed lazily when a key id is not known yet
pub struct KeyCache {
    source: Arc<dyn KeySource>,
    cached: RwLock<Option<CachedKeys>>,
    min_refresh: Duration,
}

impl KeyCache {
    /// `min_refresh` bounds how often unknown key ids may trigger a refetch
    pub fn new(source: Arc<dyn KeySource>, min_refresh: Duration) -> Self {
        Self {
            source,
            cached: RwLock::new(None),
            min_refresh,
        }
    }

    pub async fn key_for(&self, kid: &str) -> Result<Option<Jwk>, KeySourceError> {
        // Fast path: try read lock
        if let Some(found) = self.lookup(self.cached.read().await.as_ref(), kid) {
            return Ok(found);
        }

        // Slow path: one refetch at a time, re-checked after waiting for the lock
        let mut cached = self.cached.write().await;
        if let Some(found) = self.lookup(cached.as_ref(), kid) {
            return Ok(found);
        }

        let keys = self.source.fetch().await?;
        info!("Loaded {} signing keys", keys.keys.len());
        let found = keys.find(kid).cloned();

        *cached = Some(CachedKeys {
            keys,
            fetched_at: Instant::now(),
        });

        Ok(found)
    }

    /// `Some` when the cached set answers for `kid`, `None` when a refetch is due
    fn lookup(&self, cached: Option<&CachedKeys>, kid: &str) -> Option<Option<Jwk>> {
        let cached = cached?;
        if let Some(key) = cached.keys.find(kid) {
            return Some(Some(key.clone()));
        }
        if cached.fetched_at.elapsed() < self.min_refresh {
            return Some(None);
        }
        None
    }
}
