//! Public key retrieval with a whole-set cache
//!
//! Google publishes the certificates used to sign Firebase ID tokens as a JSON
//! object mapping key ids to PEM certificates. The response carries a
//! `cache-control: max-age=N` header; the whole set is trusted for that long
//! and then fetched again on the next lookup.
//!
//! Refreshes are serialized: the caller that finds the set expired holds the
//! write lock for the duration of the fetch, and callers arriving meanwhile wait
//! and then reuse the fresh set. The mapping and its expiry are replaced under
//! the same lock, so no reader sees one without the other.
//!
//! A failed refresh is reported as [`KeyFetchError::KeyServerUnavailable`] and
//! previously cached certificates are not served in its place.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use rsa::RsaPublicKey;
use tokio::sync::RwLock;

use crate::certificate::rsa_public_key_from_pem;
use crate::clock::{Clock, SystemClock};
use crate::error::KeyFetchError;
use crate::http::{HttpClient, HttpResponse, ReqwestHttpClient};

/// Where Google publishes the Firebase ID token signing certificates
pub const KEY_SERVER_URL: &str =
    "https://www.googleapis.com/robot/v1/metadata/x509/securetoken@system.gserviceaccount.com";

/// Source of the public key matching a token's key id
#[async_trait]
pub trait KeyFetcher: Send + Sync {
    /// # Errors
    ///
    /// Returns [`KeyFetchError`] if no usable key is available for `kid`.
    async fn fetch_key(&self, kid: &str) -> Result<RsaPublicKey, KeyFetchError>;
}

#[derive(Debug, Default)]
struct KeyCache {
    certificates: HashMap<String, String>,
    // None until a response with a usable max-age has been seen
    expires_at: Option<DateTime<Utc>>,
}

impl KeyCache {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at {
            Some(expires_at) => now > expires_at,
            None => true,
        }
    }

    fn lookup(&self, kid: &str) -> Result<RsaPublicKey, KeyFetchError> {
        let Some(pem) = self.certificates.get(kid) else {
            warn!("🔑 Key '{kid}' is not among the published certificates");
            return Err(KeyFetchError::NoSuchKey(kid.to_string()));
        };

        rsa_public_key_from_pem(pem).map_err(|reason| {
            warn!("🔑 Published certificate for key '{kid}' is unusable: {reason}");
            KeyFetchError::InvalidCertificate {
                kid: kid.to_string(),
                reason,
            }
        })
    }
}

/// [`KeyFetcher`] that caches the key server's certificate set
pub struct CachedKeyFetcher {
    http_client: Arc<dyn HttpClient>,
    clock: Arc<dyn Clock>,
    key_server_url: String,
    cache: RwLock<KeyCache>,
}

impl Default for CachedKeyFetcher {
    fn default() -> Self {
        Self::new(Arc::new(ReqwestHttpClient::new()))
    }
}

impl CachedKeyFetcher {
    /// Fetcher against [`KEY_SERVER_URL`] on the system clock
    #[must_use]
    pub fn new(http_client: Arc<dyn HttpClient>) -> Self {
        Self::with_clock(http_client, Arc::new(SystemClock))
    }

    #[must_use]
    pub fn with_clock(http_client: Arc<dyn HttpClient>, clock: Arc<dyn Clock>) -> Self {
        Self {
            http_client,
            clock,
            key_server_url: KEY_SERVER_URL.to_string(),
            cache: RwLock::new(KeyCache::default()),
        }
    }

    /// Fetch certificates from `url` instead of [`KEY_SERVER_URL`]
    #[must_use]
    pub fn with_key_server_url(mut self, url: impl Into<String>) -> Self {
        self.key_server_url = url.into();
        self
    }

    #[must_use]
    pub fn key_server_url(&self) -> &str {
        &self.key_server_url
    }

    /// Instant after which the cached set will be refetched, if any
    pub async fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.cache.read().await.expires_at
    }

    /// Key ids currently cached, sorted
    pub async fn cached_key_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.cache.read().await.certificates.keys().cloned().collect();
        ids.sort();
        ids
    }

    async fn refresh(&self, cache: &mut KeyCache) -> Result<(), KeyFetchError> {
        info!("🔄 Refreshing public keys from {}", self.key_server_url);

        let response = self
            .http_client
            .get(&self.key_server_url)
            .await
            .map_err(|e| {
                warn!("❌ Unable to connect to the key server: {e}");
                KeyFetchError::KeyServerUnavailable(e.to_string())
            })?;

        if !response.is_ok() {
            warn!(
                "❌ Key server at {} responded with status {}",
                self.key_server_url, response.status
            );
            return Err(KeyFetchError::KeyServerUnavailable(format!(
                "key server responded with status {}",
                response.status
            )));
        }

        let certificates: HashMap<String, String> = serde_json::from_slice(&response.body)
            .map_err(|e| {
                warn!("❌ Unable to parse key server response: {e}");
                KeyFetchError::KeyServerUnavailable(format!("invalid key server response: {e}"))
            })?;

        let now = self.clock.now();
        cache.certificates = certificates;
        match cache_expiration(&response, now) {
            Some(expires_at) => cache.expires_at = Some(expires_at),
            None => warn!(
                "⚠️  Key server response has no usable cache-control max-age, keys will be refetched on next use"
            ),
        }

        debug!(
            "💾 Cached {} keys, expiring at {:?}",
            cache.certificates.len(),
            cache.expires_at
        );
        Ok(())
    }
}

#[async_trait]
impl KeyFetcher for CachedKeyFetcher {
    async fn fetch_key(&self, kid: &str) -> Result<RsaPublicKey, KeyFetchError> {
        {
            let cache = self.cache.read().await;
            if !cache.is_expired(self.clock.now()) {
                debug!("🎯 Serving key '{kid}' from cache");
                return cache.lookup(kid);
            }
        }

        let mut cache = self.cache.write().await;
        // Another caller may have refreshed while we waited for the lock
        if cache.is_expired(self.clock.now()) {
            self.refresh(&mut cache).await?;
        }
        cache.lookup(kid)
    }
}

/// Expiry derived from the `cache-control` header of a key server response
fn cache_expiration(response: &HttpResponse, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let max_age = parse_max_age(response.header("cache-control")?)?;
    let max_age = chrono::Duration::try_seconds(i64::try_from(max_age).ok()?)?;
    now.checked_add_signed(max_age)
}

/// Value of the `max-age` directive of a `cache-control` header.
///
/// `None` if the directive is absent or its value is not a whole number of seconds.
pub fn parse_max_age(cache_control: &str) -> Option<u64> {
    let (_, value) = cache_control
        .split(',')
        .filter_map(|directive| directive.split_once('='))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("max-age"))?;

    value.trim().trim_matches('"').parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ManualClock, MockHttpClient, TestKeyPair};
    use chrono::Duration;

    fn fetcher(http: &Arc<MockHttpClient>, clock: &Arc<ManualClock>) -> CachedKeyFetcher {
        CachedKeyFetcher::with_clock(http.clone(), clock.clone())
    }

    #[test]
    fn test_parse_max_age() {
        assert_eq!(
            parse_max_age("public, max-age=19302, must-revalidate, no-transform"),
            Some(19302)
        );
        assert_eq!(parse_max_age("max-age=3"), Some(3));
        assert_eq!(parse_max_age("public,MAX-AGE = 60 "), Some(60));
        assert_eq!(parse_max_age("s-maxage=10, max-age=\"20\""), Some(20));
    }

    #[test]
    fn test_parse_max_age_rejects_malformed() {
        assert_eq!(parse_max_age(""), None);
        assert_eq!(parse_max_age("public, no-cache"), None);
        assert_eq!(parse_max_age("max-age=soon"), None);
        assert_eq!(parse_max_age("max-age=-5"), None);
        assert_eq!(parse_max_age("max-age"), None);
    }

    #[tokio::test]
    async fn test_first_fetch_refreshes_from_key_server() {
        let key_pair = TestKeyPair::generate();
        let http = Arc::new(MockHttpClient::with_keys(&[("k1", &key_pair)], Some("max-age=3")));
        let clock = Arc::new(ManualClock::at_timestamp(1_000));
        let fetcher = fetcher(&http, &clock);

        assert_eq!(fetcher.expires_at().await, None);
        let key = fetcher.fetch_key("k1").await.unwrap();

        assert_eq!(key, key_pair.public_key());
        assert_eq!(http.call_count(), 1);
        assert_eq!(http.last_url().as_deref(), Some(KEY_SERVER_URL));
        assert_eq!(
            fetcher.expires_at().await,
            Some(clock.now() + Duration::seconds(3))
        );
        assert_eq!(fetcher.cached_key_ids().await, vec!["k1".to_string()]);
    }

    #[tokio::test]
    async fn test_fetches_within_max_age_use_cache() {
        let key_pair = TestKeyPair::generate();
        let http = Arc::new(MockHttpClient::with_keys(&[("k1", &key_pair)], Some("max-age=3")));
        let clock = Arc::new(ManualClock::at_timestamp(1_000));
        let fetcher = fetcher(&http, &clock);

        fetcher.fetch_key("k1").await.unwrap();
        clock.advance(Duration::seconds(3));
        fetcher.fetch_key("k1").await.unwrap();

        assert_eq!(http.call_count(), 1);
    }

    #[tokio::test]
    async fn test_fetch_after_max_age_refreshes_again() {
        let key_pair = TestKeyPair::generate();
        let http = Arc::new(MockHttpClient::with_keys(&[("k1", &key_pair)], Some("max-age=2")));
        let clock = Arc::new(ManualClock::at_timestamp(1_000));
        let fetcher = fetcher(&http, &clock);

        fetcher.fetch_key("k1").await.unwrap();
        clock.advance(Duration::seconds(3));
        fetcher.fetch_key("k1").await.unwrap();

        assert_eq!(http.call_count(), 2);
    }

    #[tokio::test]
    async fn test_unknown_kid_is_no_such_key() {
        let key_pair = TestKeyPair::generate();
        let http = Arc::new(MockHttpClient::with_keys(&[("k1", &key_pair)], Some("max-age=3")));
        let clock = Arc::new(ManualClock::at_timestamp(1_000));
        let fetcher = fetcher(&http, &clock);

        let err = fetcher.fetch_key("DummyKid").await.unwrap_err();
        assert_eq!(err, KeyFetchError::NoSuchKey("DummyKid".to_string()));
        // A miss on a fresh set does not trigger another refresh
        let err = fetcher.fetch_key("DummyKid").await.unwrap_err();
        assert!(matches!(err, KeyFetchError::NoSuchKey(_)));
        assert_eq!(http.call_count(), 1);
    }

    #[tokio::test]
    async fn test_server_error_is_key_server_unavailable() {
        let http = Arc::new(MockHttpClient::with_status(500));
        let clock = Arc::new(ManualClock::at_timestamp(1_000));
        let fetcher = fetcher(&http, &clock);

        let err = fetcher.fetch_key("k1").await.unwrap_err();
        assert!(matches!(err, KeyFetchError::KeyServerUnavailable(_)));
    }

    #[tokio::test]
    async fn test_non_200_success_status_is_key_server_unavailable() {
        let key_pair = TestKeyPair::generate();
        let mut response = MockHttpClient::keys_response(&[("k1", &key_pair)], Some("max-age=60"));
        response.status = 203;
        let http = Arc::new(MockHttpClient::new(Ok(response)));
        let clock = Arc::new(ManualClock::at_timestamp(1_000));
        let fetcher = fetcher(&http, &clock);

        let err = fetcher.fetch_key("k1").await.unwrap_err();
        assert!(matches!(err, KeyFetchError::KeyServerUnavailable(msg) if msg.contains("203")));
        assert!(fetcher.cached_key_ids().await.is_empty());
    }

    #[tokio::test]
    async fn test_missing_max_age_keeps_previous_expiry() {
        let key_pair = TestKeyPair::generate();
        let http = Arc::new(MockHttpClient::with_keys(&[("k1", &key_pair)], Some("max-age=10")));
        let clock = Arc::new(ManualClock::at_timestamp(1_000));
        let fetcher = fetcher(&http, &clock);

        fetcher.fetch_key("k1").await.unwrap();
        let first_expiry = fetcher.expires_at().await;
        assert_eq!(first_expiry, Some(clock.now() + Duration::seconds(10)));

        clock.set_timestamp(1_011);
        http.set_response(MockHttpClient::keys_response(&[("k1", &key_pair)], Some("no-cache")));
        fetcher.fetch_key("k1").await.unwrap();
        assert_eq!(http.call_count(), 2);
        assert_eq!(fetcher.expires_at().await, first_expiry);

        // Still past the kept expiry, so the next lookup goes back to the server
        fetcher.fetch_key("k1").await.unwrap();
        assert_eq!(http.call_count(), 3);
        assert_eq!(fetcher.expires_at().await, first_expiry);
    }

    #[tokio::test]
    async fn test_transport_failure_is_key_server_unavailable() {
        let http = Arc::new(MockHttpClient::failing("connection refused"));
        let clock = Arc::new(ManualClock::at_timestamp(1_000));
        let fetcher = fetcher(&http, &clock);

        let err = fetcher.fetch_key("k1").await.unwrap_err();
        assert!(matches!(err, KeyFetchError::KeyServerUnavailable(msg) if msg.contains("connection refused")));
    }

    #[tokio::test]
    async fn test_unparseable_body_is_key_server_unavailable() {
        let http = Arc::new(MockHttpClient::with_body(200, "<html>oops</html>", Some("max-age=60")));
        let clock = Arc::new(ManualClock::at_timestamp(1_000));
        let fetcher = fetcher(&http, &clock);

        let err = fetcher.fetch_key("k1").await.unwrap_err();
        assert!(matches!(err, KeyFetchError::KeyServerUnavailable(_)));
        assert_eq!(fetcher.expires_at().await, None);
    }

    #[tokio::test]
    async fn test_missing_max_age_refreshes_on_every_call() {
        let key_pair = TestKeyPair::generate();
        let http = Arc::new(MockHttpClient::with_keys(&[("k1", &key_pair)], Some("no-cache")));
        let clock = Arc::new(ManualClock::at_timestamp(1_000));
        let fetcher = fetcher(&http, &clock);

        fetcher.fetch_key("k1").await.unwrap();
        fetcher.fetch_key("k1").await.unwrap();

        assert_eq!(http.call_count(), 2);
        assert_eq!(fetcher.expires_at().await, None);
    }

    #[tokio::test]
    async fn test_invalid_certificate_is_reported() {
        let http = Arc::new(MockHttpClient::with_body(
            200,
            r#"{"k1":"-----BEGIN CERTIFICATE-----\nbm90IGEgY2VydA==\n-----END CERTIFICATE-----\n"}"#,
            Some("max-age=60"),
        ));
        let clock = Arc::new(ManualClock::at_timestamp(1_000));
        let fetcher = fetcher(&http, &clock);

        let err = fetcher.fetch_key("k1").await.unwrap_err();
        assert!(matches!(err, KeyFetchError::InvalidCertificate { kid, .. } if kid == "k1"));
    }

    #[tokio::test]
    async fn test_refresh_replaces_whole_key_set() {
        let first = TestKeyPair::generate();
        let second = TestKeyPair::generate();
        let http = Arc::new(MockHttpClient::with_keys(&[("k1", &first)], Some("max-age=10")));
        let clock = Arc::new(ManualClock::at_timestamp(1_000));
        let fetcher = fetcher(&http, &clock);

        fetcher.fetch_key("k1").await.unwrap();

        http.set_response(MockHttpClient::keys_response(&[("k2", &second)], Some("max-age=10")));
        clock.advance(Duration::seconds(11));

        assert_eq!(fetcher.fetch_key("k2").await.unwrap(), second.public_key());
        assert!(matches!(
            fetcher.fetch_key("k1").await,
            Err(KeyFetchError::NoSuchKey(_))
        ));
        assert_eq!(fetcher.cached_key_ids().await, vec!["k2".to_string()]);
        assert_eq!(http.call_count(), 2);
    }
}
