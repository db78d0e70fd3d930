// Header stage: only RS256 tokens carrying a key id are accepted

use async_trait::async_trait;
use log::{debug, warn};

use crate::segment::decode_header;
use crate::validator::{HeaderContext, SegmentValidator};

/// The only signing algorithm Firebase uses for ID tokens
pub const ALGORITHM: &str = "RS256";

/// Validates the header segment of a Firebase ID token
///
/// Rules:
/// - `alg` must be `RS256`
/// - `kid` must be present and non-empty
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderValidator;

impl HeaderValidator {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Synchronous form of [`SegmentValidator::validate`]; the header stage does no I/O
    #[must_use]
    pub fn check(raw: &str) -> bool {
        let Ok(header) = decode_header(raw) else {
            warn!("❌ Unable to validate header: segment could not be decoded");
            return false;
        };

        if header.alg != ALGORITHM {
            warn!(
                "❌ Unable to validate header due to invalid algorithm {}",
                header.alg
            );
            return false;
        }

        if header.kid.is_empty() {
            warn!("❌ Unable to validate header due to missing kid value");
            return false;
        }

        debug!("✅ Header accepted, kid={}", header.kid);
        true
    }
}

#[async_trait]
impl SegmentValidator<HeaderContext> for HeaderValidator {
    async fn validate(&self, segment: &str, _context: &HeaderContext) -> bool {
        Self::check(segment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // {"alg":"RS256","kid":"10"}
    const VALID_HEADER: &str = "eyJhbGciOiJSUzI1NiIsImtpZCI6IjEwIn0";
    // {"alg":"RSxxx","kid":"10"}
    const INVALID_ALGORITHM: &str = "eyJhbGciOiJSU3h4eCIsImtpZCI6IjEwIn0";
    // {"alg":"RS256"}
    const NO_KID: &str = "eyJhbGciOiJSUzI1NiJ9";
    // {"alg":"RS256","kid":"10", foo}
    const INVALID_JSON: &str = "eyJhbGciOiJSUzI1NiIsImtpZCI6IjEwIiwgZm9vfQ";
    const INVALID_BASE64: &str = "eyJhbGciOiJSUzI1NiIsImtpZCI6IjEwIiwgZm9vfQ=";

    #[tokio::test]
    async fn test_valid_header_is_accepted() {
        assert!(HeaderValidator::new().validate(VALID_HEADER, &HeaderContext).await);
    }

    #[test]
    fn test_invalid_algorithm_is_rejected() {
        assert!(!HeaderValidator::check(INVALID_ALGORITHM));
    }

    #[test]
    fn test_missing_kid_is_rejected() {
        assert!(!HeaderValidator::check(NO_KID));
    }

    #[test]
    fn test_empty_kid_is_rejected() {
        // {"alg":"RS256","kid":""}
        assert!(!HeaderValidator::check("eyJhbGciOiJSUzI1NiIsImtpZCI6IiJ9"));
    }

    #[test]
    fn test_undecodable_headers_are_rejected() {
        assert!(!HeaderValidator::check(INVALID_JSON));
        assert!(!HeaderValidator::check(INVALID_BASE64));
        assert!(!HeaderValidator::check(""));
    }

    #[test]
    fn test_algorithm_comparison_is_exact() {
        // {"alg":"rs256","kid":"10"}
        assert!(!HeaderValidator::check("eyJhbGciOiJyczI1NiIsImtpZCI6IjEwIn0"));
        // {"alg":"none","kid":"10"}
        assert!(!HeaderValidator::check("eyJhbGciOiJub25lIiwia2lkIjoiMTAifQ"));
    }
}
