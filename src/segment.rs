// Decoding of the base64url JSON segments that make up a token

use base64::Engine as _;
use log::debug;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::DecodeError;

/// Decoded token header
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JwtHeader {
    pub alg: String,
    #[serde(default)]
    pub kid: String,
}

/// Decoded token claims
///
/// Firebase tokens carry more claims (`auth_time`, `user_id`, `email`,
/// `firebase`, ...). Only the ones taking part in validation are kept.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JwtClaims {
    pub aud: String,
    pub iss: String,
    #[serde(default)]
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
}

/// Decode a base64url (unpadded) segment and parse it as JSON into `T`.
///
/// Unknown JSON fields are ignored.
///
/// # Errors
///
/// Returns [`DecodeError::Base64`] if the segment is not unpadded base64url and
/// [`DecodeError::Json`] if the bytes are not JSON of the expected shape.
pub fn decode_segment<T: DeserializeOwned>(raw: &str) -> Result<T, DecodeError> {
    let bytes = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(raw)
        .inspect_err(|e| debug!("Segment is not valid base64url: {e}"))?;

    serde_json::from_slice(&bytes).map_err(|e| {
        debug!("Segment is not valid JSON of the expected shape: {e}");
        DecodeError::Json(e)
    })
}

/// Decode the header segment of a token
///
/// # Errors
///
/// See [`decode_segment`].
pub fn decode_header(raw: &str) -> Result<JwtHeader, DecodeError> {
    decode_segment(raw)
}

/// Decode the claims segment of a token without validating them
///
/// # Errors
///
/// See [`decode_segment`].
pub fn decode_claims(raw: &str) -> Result<JwtClaims, DecodeError> {
    decode_segment(raw)
}
