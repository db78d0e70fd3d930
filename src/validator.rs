//! Common interface of the three token validation stages
//!
//! Every stage receives the raw (still base64url-encoded) segment it is
//! responsible for, plus a stage-specific context, and answers accept or reject.
//! Causes of a rejection are logged by the stage, never returned.

use async_trait::async_trait;

/// A validation stage over one token segment
#[async_trait]
pub trait SegmentValidator<C: Sync>: Send + Sync {
    /// Returns `true` if `segment` is acceptable under `context`
    async fn validate(&self, segment: &str, context: &C) -> bool;
}

/// Context of the header stage; the header is self-contained
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeaderContext;

/// Context of the claims stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimsContext {
    /// Firebase project id, expected as audience and as issuer suffix
    pub project_id: String,
}

/// Context of the signature stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureContext {
    /// Key id from the already validated header
    pub key_id: String,
    /// Signed message, `header-segment + "." + claims-segment`
    pub message: String,
}
