//! Single-slot bearer-token cache for the client-credentials grant.

use std::future::Future;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;

use abflug_core::provider::ProviderError;

/// Remaining lifetime below which a cached token is treated as expired,
/// so it cannot lapse while the outer request is still in flight.
const EXPIRY_MARGIN_SECS: i64 = 60;

#[derive(Debug, Clone)]
pub struct CachedToken {
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

impl CachedToken {
    pub fn new(access_token: String, expires_in_secs: i64) -> Self {
        Self {
            access_token,
            expires_at: Utc::now() + Duration::seconds(expires_in_secs),
        }
    }

    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(EXPIRY_MARGIN_SECS) < self.expires_at
    }
}

/// One shared slot, constructed once and owned by the provider client.
/// The mutex is held across a refresh, so concurrent cold-cache callers
/// trigger a single exchange.
#[derive(Debug, Default)]
pub struct TokenCache {
    slot: Mutex<Option<CachedToken>>,
}

impl TokenCache {
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    /// Return the cached token while it is fresh; otherwise run `refresh`,
    /// store its result and return the new token. A failed refresh leaves
    /// the slot untouched so the next caller retries cleanly.
    pub async fn get_or_refresh<F, Fut>(&self, refresh: F) -> Result<String, ProviderError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<CachedToken, ProviderError>>,
    {
        let mut slot = self.slot.lock().await;

        if let Some(token) = slot.as_ref() {
            if token.is_fresh(Utc::now()) {
                return Ok(token.access_token.clone());
            }
        }

        let token = refresh().await?;
        tracing::debug!(expires_at = %token.expires_at, "cached new access token");
        let value = token.access_token.clone();
        *slot = Some(token);
        Ok(value)
    }
}
