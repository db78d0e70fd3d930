//! Error types for token validation
//!
//! Only [`TokenValidationError`] is surfaced to callers of the token validator.
//! [`KeyFetchError`] and [`DecodeError`] stay inside the stage validators, which
//! log them and flatten them into a rejection.

use thiserror::Error;

/// The first failure encountered while validating a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenValidationError {
    /// The token is not exactly three dot-separated segments
    #[error("Token is malformed")]
    MalformedToken,

    /// The header segment failed decoding, algorithm or key-id checks
    #[error("Header validation failed")]
    HeaderValidationFailed,

    /// The claims segment failed decoding, subject, timing, audience or issuer checks
    #[error("Claims validation failed")]
    ClaimsValidationFailed,

    /// The signature failed decoding, key lookup or cryptographic verification
    #[error("Signature validation failed")]
    SignatureValidationFailed,
}

/// Failures of the public key cache
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyFetchError {
    /// The key id is not among the currently published certificates
    #[error("No such key: {0}")]
    NoSuchKey(String),

    /// The key server could not be reached or returned an unusable response
    #[error("Unable to connect to the key server: {0}")]
    KeyServerUnavailable(String),

    /// A published certificate could not be turned into an RSA public key
    #[error("Invalid certificate for key {kid}: {reason}")]
    InvalidCertificate { kid: String, reason: String },
}

/// Failures decoding a base64url JSON segment
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("segment is not valid base64url: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("segment is not valid JSON for the expected shape: {0}")]
    Json(#[from] serde_json::Error),
}

/// Transport-level failure reported by an [`crate::http::HttpClient`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("HTTP transport error: {0}")]
pub struct TransportError(pub String);

/// Failures loading or checking [`crate::settings::ValidatorSettings`]
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse settings file: {0}")]
    Parse(#[from] basic_toml::Error),

    #[error("Failed to initialize logger: {0}")]
    Logger(#[from] log::SetLoggerError),

    #[error("Invalid settings: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_error_messages() {
        assert_eq!(
            TokenValidationError::MalformedToken.to_string(),
            "Token is malformed"
        );
        assert_eq!(
            TokenValidationError::SignatureValidationFailed.to_string(),
            "Signature validation failed"
        );
    }

    #[test]
    fn test_key_fetch_error_messages_carry_detail() {
        let err = KeyFetchError::NoSuchKey("abc".to_string());
        assert_eq!(err.to_string(), "No such key: abc");

        let err = KeyFetchError::InvalidCertificate {
            kid: "k1".to_string(),
            reason: "not RSA".to_string(),
        };
        assert!(err.to_string().contains("k1"));
        assert!(err.to_string().contains("not RSA"));
    }
}
