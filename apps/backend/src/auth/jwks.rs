//! Signing keys published by the token issuer as a JSON Web Key Set.
//!
//! Keys are cached by `kid` with a TTL. A cache miss triggers one refresh of
//! the whole set; concurrent misses wait on the same refresh instead of each
//! hitting the issuer. Only RSA keys with a `kid` are accepted.

use std::fmt;
use std::time::Duration;

use jsonwebtoken::jwk::{AlgorithmParameters, JwkSet};
use jsonwebtoken::DecodingKey;
use moka::future::Cache;
use tokio::sync::Mutex;
use tracing::{debug, error, warn};

use crate::error::AppError;

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

pub struct JwksKeyStore {
    /// `None` for a fixed key set that is never refreshed
    url: Option<String>,
    client: reqwest::Client,
    keys: Cache<String, DecodingKey>,
    refresh_lock: Mutex<()>,
}

impl fmt::Debug for JwksKeyStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwksKeyStore")
            .field("url", &self.url)
            .field("cached_keys", &self.keys.entry_count())
            .finish()
    }
}

impl JwksKeyStore {
    /// Key store backed by a remote JWKS endpoint. Nothing is fetched until
    /// the first token needs a key.
    pub fn new(url: impl Into<String>, ttl: Duration) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| AppError::config(format!("failed to build JWKS HTTP client: {e}")))?;

        Ok(Self {
            url: Some(url.into()),
            client,
            keys: Cache::builder().max_capacity(64).time_to_live(ttl).build(),
            refresh_lock: Mutex::new(()),
        })
    }

    /// Key store over a fixed set of keys, e.g. a pinned set shipped with the
    /// deployment or one built by tests.
    pub async fn from_jwk_set(set: &JwkSet) -> Self {
        let store = Self {
            url: None,
            client: reqwest::Client::new(),
            keys: Cache::builder().max_capacity(64).build(),
            refresh_lock: Mutex::new(()),
        };
        store.load(set).await;
        store
    }

    /// Look up the decoding key for `kid`, refreshing the set on a miss.
    ///
    /// An unknown `kid` is an invalid token; an unreachable issuer is an
    /// internal error.
    pub async fn get_key(&self, kid: &str) -> Result<DecodingKey, AppError> {
        if let Some(key) = self.keys.get(kid).await {
            return Ok(key);
        }

        let Some(url) = self.url.as_deref() else {
            debug!(kid, "kid not in fixed key set");
            return Err(AppError::unauthorized_invalid_jwt());
        };

        let _guard = self.refresh_lock.lock().await;

        // Another waiter may have refreshed while we queued.
        if let Some(key) = self.keys.get(kid).await {
            return Ok(key);
        }

        self.refresh(url).await?;

        self.keys.get(kid).await.ok_or_else(|| {
            warn!(kid, "kid not found in issuer JWKS");
            AppError::unauthorized_invalid_jwt()
        })
    }

    async fn refresh(&self, url: &str) -> Result<(), AppError> {
        debug!(url, "fetching JWKS");

        let set = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|resp| resp.error_for_status())
            .map_err(|e| {
                error!(url, error = %e, "JWKS fetch failed");
                AppError::internal(format!("failed to fetch JWKS: {e}"))
            })?
            .json::<JwkSet>()
            .await
            .map_err(|e| {
                error!(url, error = %e, "JWKS response was not a key set");
                AppError::internal(format!("invalid JWKS response: {e}"))
            })?;

        let loaded = self.load(&set).await;
        debug!(url, loaded, "JWKS refreshed");
        Ok(())
    }

    /// Insert every usable key from `set`; returns how many were accepted.
    async fn load(&self, set: &JwkSet) -> usize {
        let mut loaded = 0;
        for jwk in &set.keys {
            let Some(kid) = jwk.common.key_id.clone() else {
                debug!("skipping JWK without kid");
                continue;
            };
            if !matches!(jwk.algorithm, AlgorithmParameters::RSA(_)) {
                debug!(kid = %kid, "skipping non-RSA JWK");
                continue;
            }
            match DecodingKey::from_jwk(jwk) {
                Ok(key) => {
                    self.keys.insert(kid, key).await;
                    loaded += 1;
                }
                Err(e) => warn!(kid = %kid, error = %e, "skipping unusable JWK"),
            }
        }
        loaded
    }
}
