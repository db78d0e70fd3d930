//! Token validation pipeline
//!
//! A token is `header.claims.signature`. The stages run strictly in that order
//! and the first failing stage decides the error:
//!
//! 1. exactly three segments, else [`TokenValidationError::MalformedToken`]
//! 2. header stage, else [`TokenValidationError::HeaderValidationFailed`]
//! 3. claims stage, else [`TokenValidationError::ClaimsValidationFailed`]
//! 4. signature stage over `header.claims`, else
//!    [`TokenValidationError::SignatureValidationFailed`]

use std::sync::Arc;
use std::time::Duration;

use log::{debug, error, info};

use crate::claims::ClaimsValidator;
use crate::clock::{Clock, SystemClock};
use crate::error::{TokenValidationError, TransportError};
use crate::header::HeaderValidator;
use crate::http::{HttpClient, ReqwestHttpClient};
use crate::key_fetcher::CachedKeyFetcher;
use crate::segment::decode_header;
use crate::settings::ValidatorSettings;
use crate::signature::SignatureValidator;
use crate::validator::{ClaimsContext, HeaderContext, SegmentValidator, SignatureContext};

/// Validates Firebase ID tokens for one project
#[derive(Clone)]
pub struct TokenValidator {
    project_id: String,
    header_validator: Arc<dyn SegmentValidator<HeaderContext>>,
    claims_validator: Arc<dyn SegmentValidator<ClaimsContext>>,
    signature_validator: Arc<dyn SegmentValidator<SignatureContext>>,
}

impl TokenValidator {
    /// Assemble a validator from custom stage validators
    #[must_use]
    pub fn new(
        project_id: impl Into<String>,
        header_validator: Arc<dyn SegmentValidator<HeaderContext>>,
        claims_validator: Arc<dyn SegmentValidator<ClaimsContext>>,
        signature_validator: Arc<dyn SegmentValidator<SignatureContext>>,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            header_validator,
            claims_validator,
            signature_validator,
        }
    }

    /// Production pipeline: Google's key server over `reqwest`, the system
    /// clock and no issued-at tolerance
    #[must_use]
    pub fn with_defaults(project_id: impl Into<String>) -> Self {
        Self::with_components(
            project_id,
            Arc::new(ReqwestHttpClient::new()),
            Arc::new(SystemClock),
            0,
        )
    }

    /// Default pipeline over an injected transport and clock
    #[must_use]
    pub fn with_components(
        project_id: impl Into<String>,
        http_client: Arc<dyn HttpClient>,
        clock: Arc<dyn Clock>,
        issued_at_tolerance_seconds: u64,
    ) -> Self {
        let key_fetcher = CachedKeyFetcher::with_clock(http_client, clock.clone());
        Self::from_parts(project_id, key_fetcher, clock, issued_at_tolerance_seconds)
    }

    /// Pipeline configured from settings
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_settings(settings: &ValidatorSettings) -> Result<Self, TransportError> {
        let http_client = match settings.key_server.timeout_seconds {
            0 => ReqwestHttpClient::new(),
            secs => ReqwestHttpClient::with_timeout(Duration::from_secs(secs))?,
        };
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let key_fetcher = CachedKeyFetcher::with_clock(Arc::new(http_client), clock.clone())
            .with_key_server_url(settings.key_server.url.clone());

        info!(
            "🔧 Validating tokens for project '{}' with keys from {}",
            settings.project.project_id, settings.key_server.url
        );
        Ok(Self::from_parts(
            settings.project.project_id.clone(),
            key_fetcher,
            clock,
            settings.claims.issued_at_tolerance_seconds,
        ))
    }

    fn from_parts(
        project_id: impl Into<String>,
        key_fetcher: CachedKeyFetcher,
        clock: Arc<dyn Clock>,
        issued_at_tolerance_seconds: u64,
    ) -> Self {
        let claims_validator =
            ClaimsValidator::with_clock(clock).with_issued_at_tolerance(issued_at_tolerance_seconds);
        Self::new(
            project_id,
            Arc::new(HeaderValidator::new()),
            Arc::new(claims_validator),
            Arc::new(SignatureValidator::new(Arc::new(key_fetcher))),
        )
    }

    #[must_use]
    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// Validate a token
    ///
    /// # Errors
    ///
    /// Returns the error of the first stage that rejected the token.
    pub async fn validate(&self, token: &str) -> Result<(), TokenValidationError> {
        let segments: Vec<&str> = token.split('.').collect();
        let [header, claims, signature] = segments[..] else {
            debug!(
                "❌ Token has {} segments, expected 3",
                segments.len()
            );
            return Err(TokenValidationError::MalformedToken);
        };

        if !self.header_validator.validate(header, &HeaderContext).await {
            return Err(TokenValidationError::HeaderValidationFailed);
        }

        let claims_context = ClaimsContext {
            project_id: self.project_id.clone(),
        };
        if !self.claims_validator.validate(claims, &claims_context).await {
            return Err(TokenValidationError::ClaimsValidationFailed);
        }

        // The header stage has already decoded this segment successfully
        let key_id = match decode_header(header) {
            Ok(decoded) => decoded.kid,
            Err(e) => {
                error!("🚨 Header accepted by the header stage failed to decode: {e}");
                return Err(TokenValidationError::HeaderValidationFailed);
            }
        };

        let signature_context = SignatureContext {
            key_id,
            message: format!("{header}.{claims}"),
        };
        if !self
            .signature_validator
            .validate(signature, &signature_context)
            .await
        {
            return Err(TokenValidationError::SignatureValidationFailed);
        }

        debug!("🎉 Token validated for project '{}'", self.project_id);
        Ok(())
    }

    /// `true` if [`Self::validate`] accepts the token
    pub async fn is_valid(&self, token: &str) -> bool {
        self.validate(token).await.is_ok()
    }
}
