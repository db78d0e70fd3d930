// Claims stage: subject, freshness, issuer and audience of a Firebase ID token

use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, warn};

use crate::clock::{Clock, SystemClock};
use crate::segment::decode_claims;
use crate::validator::{ClaimsContext, SegmentValidator};

/// Firebase issuers are this prefix followed by the project id
pub const ISSUER_PREFIX: &str = "https://securetoken.google.com/";

/// Upper bound for the configurable issued-at tolerance, in seconds
pub const MAX_ISSUED_AT_TOLERANCE: u64 = 300;

/// Expected `iss` claim for a project
#[must_use]
pub fn expected_issuer(project_id: &str) -> String {
    format!("{ISSUER_PREFIX}{project_id}")
}

/// Validates the claims segment of a Firebase ID token
///
/// Rules, checked in this order:
/// - `sub` must be non-empty
/// - `iat` must not be after now (plus the issued-at tolerance)
/// - `exp` must not be before now
/// - `iss` must be `https://securetoken.google.com/<project id>`
/// - `aud` must be the project id
pub struct ClaimsValidator {
    clock: Arc<dyn Clock>,
    issued_at_tolerance: i64,
}

impl Default for ClaimsValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl ClaimsValidator {
    /// Claims validator on the system clock with no issued-at tolerance
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    #[must_use]
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            issued_at_tolerance: 0,
        }
    }

    /// Accept tokens issued up to `seconds` in the future to absorb clock skew
    /// between the issuer and this host. Clamped to [`MAX_ISSUED_AT_TOLERANCE`].
    #[must_use]
    pub fn with_issued_at_tolerance(mut self, seconds: u64) -> Self {
        let bounded = seconds.min(MAX_ISSUED_AT_TOLERANCE);
        if bounded != seconds {
            warn!("⚠️  Issued-at tolerance of {seconds}s clamped to {bounded}s");
        }
        // bounded <= MAX_ISSUED_AT_TOLERANCE, always fits
        self.issued_at_tolerance = i64::try_from(bounded).unwrap_or(0);
        self
    }

    #[must_use]
    pub fn issued_at_tolerance(&self) -> i64 {
        self.issued_at_tolerance
    }

    /// Synchronous form of [`SegmentValidator::validate`]
    #[must_use]
    pub fn check(&self, raw: &str, project_id: &str) -> bool {
        let Ok(claims) = decode_claims(raw) else {
            warn!("❌ Unable to validate claims: segment could not be decoded");
            return false;
        };

        if claims.sub.is_empty() {
            warn!("❌ Unable to validate claims due to empty subject");
            return false;
        }

        let now = self.clock.timestamp();
        if claims.iat > now.saturating_add(self.issued_at_tolerance) {
            warn!(
                "❌ Unable to validate claims as they are issued in the future {} > {now}",
                claims.iat
            );
            return false;
        }

        if claims.exp < now {
            warn!(
                "❌ Unable to validate claims as they are expired {} < {now}",
                claims.exp
            );
            return false;
        }

        let issuer = expected_issuer(project_id);
        if claims.iss != issuer {
            warn!(
                "❌ Unable to validate claims due to invalid issuer: expected '{issuer}', got '{}'",
                claims.iss
            );
            return false;
        }

        if claims.aud != project_id {
            warn!(
                "❌ Unable to validate claims due to invalid audience: expected '{project_id}', got '{}'",
                claims.aud
            );
            return false;
        }

        debug!("✅ Claims accepted for subject {}", claims.sub);
        true
    }
}

#[async_trait]
impl SegmentValidator<ClaimsContext> for ClaimsValidator {
    async fn validate(&self, segment: &str, context: &ClaimsContext) -> bool {
        self.check(segment, &context.project_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{encode_json_segment, ManualClock};

    const PROJECT_ID: &str = "neutrino-1151";
    const NOW: i64 = 1_700_000_000;

    fn validator() -> ClaimsValidator {
        ClaimsValidator::with_clock(Arc::new(ManualClock::at_timestamp(NOW)))
    }

    fn claims_segment(sub: &str, iat: i64, exp: i64, iss: &str, aud: &str) -> String {
        encode_json_segment(&serde_json::json!({
            "sub": sub,
            "iat": iat,
            "exp": exp,
            "iss": iss,
            "aud": aud,
        }))
    }

    fn valid_segment() -> String {
        claims_segment(
            "9SZ9JvC7KpPI0RJGvAZxN0sXTtH2",
            NOW - 60,
            NOW + 3600,
            &expected_issuer(PROJECT_ID),
            PROJECT_ID,
        )
    }

    #[tokio::test]
    async fn test_valid_claims_are_accepted() {
        let context = ClaimsContext {
            project_id: PROJECT_ID.to_string(),
        };
        assert!(validator().validate(&valid_segment(), &context).await);
    }

    #[test]
    fn test_recorded_firebase_claims() {
        // iat 0, exp 2147483647, aud neutrino-1151, CRLF formatted JSON
        let valid = "ew0KICAiaXNzIjogImh0dHBzOi8vc2VjdXJldG9rZW4uZ29vZ2xlLmNvbS9uZXV0cmluby0xMTUxIiwNCiAgImF1ZCI6ICJuZXV0cmluby0xMTUxIiwNCiAgInN1YiI6ICI5U1o5SnZDN0twUEkwUkpHdkFaeE4wc1hUdEgyIiwNCiAgImlhdCI6IDAsDQogICJleHAiOiAyMTQ3NDgzNjQ3DQp9";
        assert!(validator().check(valid, PROJECT_ID));

        // Same shape, audience xxx-1151
        let wrong_audience = "ew0KICAiaXNzIjogImh0dHBzOi8vc2VjdXJldG9rZW4uZ29vZ2xlLmNvbS9uZXV0cmluby0xMTUxIiwNCiAgImF1ZCI6ICJ4eHgtMTE1MSIsDQogICJzdWIiOiAidXNlciBpZCIsDQogICJpYXQiOiAwLA0KICAiZXhwIjogMjE0NzQ4MzY0Nw0KfQ";
        assert!(!validator().check(wrong_audience, PROJECT_ID));
    }

    #[test]
    fn test_empty_subject_is_rejected() {
        let segment = claims_segment(
            "",
            NOW - 60,
            NOW + 3600,
            &expected_issuer(PROJECT_ID),
            PROJECT_ID,
        );
        assert!(!validator().check(&segment, PROJECT_ID));
    }

    #[test]
    fn test_missing_subject_is_rejected() {
        let segment = encode_json_segment(&serde_json::json!({
            "iat": NOW - 60,
            "exp": NOW + 3600,
            "iss": expected_issuer(PROJECT_ID),
            "aud": PROJECT_ID,
        }));
        assert!(!validator().check(&segment, PROJECT_ID));
    }

    #[test]
    fn test_future_issued_claims_are_rejected() {
        let segment = claims_segment(
            "user",
            NOW + 1,
            NOW + 3600,
            &expected_issuer(PROJECT_ID),
            PROJECT_ID,
        );
        assert!(!validator().check(&segment, PROJECT_ID));
    }

    #[test]
    fn test_issued_now_is_accepted() {
        let segment = claims_segment(
            "user",
            NOW,
            NOW + 3600,
            &expected_issuer(PROJECT_ID),
            PROJECT_ID,
        );
        assert!(validator().check(&segment, PROJECT_ID));
    }

    #[test]
    fn test_issued_at_tolerance_absorbs_small_skew() {
        let segment = claims_segment(
            "user",
            NOW + 10,
            NOW + 3600,
            &expected_issuer(PROJECT_ID),
            PROJECT_ID,
        );
        assert!(!validator().check(&segment, PROJECT_ID));
        assert!(validator()
            .with_issued_at_tolerance(10)
            .check(&segment, PROJECT_ID));
        assert!(!validator()
            .with_issued_at_tolerance(9)
            .check(&segment, PROJECT_ID));
    }

    #[test]
    fn test_issued_at_tolerance_is_bounded() {
        let validator = validator().with_issued_at_tolerance(86_400);
        assert_eq!(
            validator.issued_at_tolerance(),
            i64::try_from(MAX_ISSUED_AT_TOLERANCE).unwrap()
        );
    }

    #[test]
    fn test_expired_claims_are_rejected() {
        let segment = claims_segment(
            "user",
            NOW - 7200,
            NOW - 1,
            &expected_issuer(PROJECT_ID),
            PROJECT_ID,
        );
        assert!(!validator().check(&segment, PROJECT_ID));
    }

    #[test]
    fn test_expiring_now_is_accepted() {
        let segment = claims_segment(
            "user",
            NOW - 3600,
            NOW,
            &expected_issuer(PROJECT_ID),
            PROJECT_ID,
        );
        assert!(validator().check(&segment, PROJECT_ID));
    }

    #[test]
    fn test_wrong_issuer_is_rejected() {
        let segment = claims_segment(
            "user",
            NOW - 60,
            NOW + 3600,
            &expected_issuer("xxx-1151"),
            PROJECT_ID,
        );
        assert!(!validator().check(&segment, PROJECT_ID));
    }

    #[test]
    fn test_wrong_audience_is_rejected() {
        let segment = claims_segment(
            "user",
            NOW - 60,
            NOW + 3600,
            &expected_issuer(PROJECT_ID),
            "xxx-1151",
        );
        assert!(!validator().check(&segment, PROJECT_ID));
    }

    #[test]
    fn test_undecodable_claims_are_rejected() {
        assert!(!validator().check("eyJhbGciOiJSUzI1NiIsImtpZCI6IjEwIiwgZm9vfQ", PROJECT_ID));
        assert!(!validator().check("eyJhbGciOiJSUzI1NiIsImtpZCI6IjEwIiwgZm9vfQ=", PROJECT_ID));
    }
}
