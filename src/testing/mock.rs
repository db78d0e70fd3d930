//! Mock objects and fake implementations for testing
//!
//! Stand-ins for the key server transport, the clock, the key fetcher and the
//! individual validation stages, so each part can be tested in isolation.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use rsa::RsaPublicKey;

use super::builders::TestKeyPair;
use crate::clock::Clock;
use crate::error::{KeyFetchError, TransportError};
use crate::http::{HttpClient, HttpResponse};
use crate::key_fetcher::KeyFetcher;
use crate::validator::SegmentValidator;

/// Scripted key server
///
/// Every request gets the currently configured response; requests are counted
/// and the last requested URL is kept.
pub struct MockHttpClient {
    response: Mutex<Result<HttpResponse, TransportError>>,
    calls: AtomicUsize,
    last_url: Mutex<Option<String>>,
}

impl MockHttpClient {
    #[must_use]
    pub fn new(response: Result<HttpResponse, TransportError>) -> Self {
        Self {
            response: Mutex::new(response),
            calls: AtomicUsize::new(0),
            last_url: Mutex::new(None),
        }
    }

    /// Serves the certificates of `keys` under their key ids
    #[must_use]
    pub fn with_keys(keys: &[(&str, &TestKeyPair)], cache_control: Option<&str>) -> Self {
        Self::new(Ok(Self::keys_response(keys, cache_control)))
    }

    /// Serves `body` with `status`
    #[must_use]
    pub fn with_body(status: u16, body: &str, cache_control: Option<&str>) -> Self {
        Self::new(Ok(Self::http_response(status, body.as_bytes().to_vec(), cache_control)))
    }

    /// Serves an empty body with `status`
    #[must_use]
    pub fn with_status(status: u16) -> Self {
        Self::with_body(status, "", None)
    }

    /// Fails every request at the transport level
    #[must_use]
    pub fn failing(reason: &str) -> Self {
        Self::new(Err(TransportError(reason.to_string())))
    }

    /// A key server response publishing `keys`
    ///
    /// # Panics
    ///
    /// Panics if the key map cannot be serialized.
    #[must_use]
    pub fn keys_response(keys: &[(&str, &TestKeyPair)], cache_control: Option<&str>) -> HttpResponse {
        let certificates: HashMap<&str, &str> = keys
            .iter()
            .map(|(kid, key_pair)| (*kid, key_pair.certificate_pem.as_str()))
            .collect();
        let body = serde_json::to_vec(&certificates).expect("certificate map serializes");
        Self::http_response(200, body, cache_control)
    }

    fn http_response(status: u16, body: Vec<u8>, cache_control: Option<&str>) -> HttpResponse {
        let mut headers = HashMap::from([(
            "content-type".to_string(),
            "application/json; charset=UTF-8".to_string(),
        )]);
        if let Some(value) = cache_control {
            headers.insert("cache-control".to_string(), value.to_string());
        }
        HttpResponse {
            status,
            headers,
            body,
        }
    }

    /// Replace the response served from now on
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    pub fn set_response(&self, response: HttpResponse) {
        *self.response.lock().unwrap() = Ok(response);
    }

    /// Make every request from now on fail at the transport level
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    pub fn set_failing(&self, reason: &str) {
        *self.response.lock().unwrap() = Err(TransportError(reason.to_string()));
    }

    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    #[must_use]
    pub fn last_url(&self) -> Option<String> {
        self.last_url.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_url.lock().unwrap() = Some(url.to_string());
        // Give concurrent callers a chance to pile up behind the refresh
        tokio::task::yield_now().await;
        self.response.lock().unwrap().clone()
    }
}

/// Clock that only moves when told to
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    #[must_use]
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Clock stopped at `timestamp` epoch seconds
    #[must_use]
    pub fn at_timestamp(timestamp: i64) -> Self {
        Self::new(DateTime::from_timestamp(timestamp, 0).unwrap_or_default())
    }

    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap();
        *now += by;
    }

    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    pub fn set_timestamp(&self, timestamp: i64) {
        *self.now.lock().unwrap() = DateTime::from_timestamp(timestamp, 0).unwrap_or_default();
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

/// Key fetcher with a fixed answer that records the requested key ids
pub struct RecordingKeyFetcher {
    result: Result<RsaPublicKey, KeyFetchError>,
    requested: Mutex<Vec<String>>,
}

impl RecordingKeyFetcher {
    #[must_use]
    pub fn accepting(public_key: RsaPublicKey) -> Self {
        Self {
            result: Ok(public_key),
            requested: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn rejecting(error: KeyFetchError) -> Self {
        Self {
            result: Err(error),
            requested: Mutex::new(Vec::new()),
        }
    }

    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    #[must_use]
    pub fn requested_kids(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl KeyFetcher for RecordingKeyFetcher {
    async fn fetch_key(&self, kid: &str) -> Result<RsaPublicKey, KeyFetchError> {
        self.requested.lock().unwrap().push(kid.to_string());
        self.result.clone()
    }
}

/// Stage that accepts everything and records what it was given
pub struct AcceptingValidator<C> {
    calls: Mutex<Vec<(String, C)>>,
}

impl<C> Default for AcceptingValidator<C> {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl<C: Clone> AcceptingValidator<C> {
    /// Segments and contexts received so far, in call order
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    #[must_use]
    pub fn calls(&self) -> Vec<(String, C)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl<C: Clone + Send + Sync + 'static> SegmentValidator<C> for AcceptingValidator<C> {
    async fn validate(&self, segment: &str, context: &C) -> bool {
        self.calls
            .lock()
            .unwrap()
            .push((segment.to_string(), context.clone()));
        true
    }
}

/// Stage that rejects everything
#[derive(Debug, Clone, Copy, Default)]
pub struct RejectingValidator;

#[async_trait]
impl<C: Sync + 'static> SegmentValidator<C> for RejectingValidator {
    async fn validate(&self, _segment: &str, _context: &C) -> bool {
        false
    }
}
