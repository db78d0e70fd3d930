// Signature stage: RSASSA-PKCS1-v1_5 with SHA-256 over `header.claims`

use std::sync::Arc;

use async_trait::async_trait;
use base64::Engine as _;
use log::{debug, warn};
use rsa::{Pkcs1v15Sign, RsaPublicKey};
use sha2::{Digest, Sha256};

use crate::key_fetcher::KeyFetcher;
use crate::validator::{SegmentValidator, SignatureContext};

/// Verifies a token signature with the key published under the token's key id
///
/// Key lookup failures, undecodable signatures and verification mismatches are
/// all reported as a rejection; the cause is only logged.
pub struct SignatureValidator {
    key_fetcher: Arc<dyn KeyFetcher>,
}

impl SignatureValidator {
    #[must_use]
    pub fn new(key_fetcher: Arc<dyn KeyFetcher>) -> Self {
        Self { key_fetcher }
    }

    /// Verify `signature` (base64url) over `message` with the key for `kid`
    pub async fn check(&self, signature: &str, kid: &str, message: &str) -> bool {
        let public_key = match self.key_fetcher.fetch_key(kid).await {
            Ok(key) => key,
            Err(e) => {
                warn!("❌ Unable to validate signature, no key for kid '{kid}': {e}");
                return false;
            }
        };

        let Ok(signature_bytes) = base64::engine::general_purpose::URL_SAFE_NO_PAD.decode(signature)
        else {
            warn!(
                "❌ Unable to validate signature as it is not valid base64url ({} chars)",
                signature.len()
            );
            return false;
        };

        if let Err(e) = verify_rs256(&public_key, message.as_bytes(), &signature_bytes) {
            warn!("❌ Signature verification failed for kid '{kid}': {e}");
            return false;
        }

        debug!("✅ Signature verified with kid '{kid}'");
        true
    }
}

/// Verify an RS256 signature over `message`
///
/// # Errors
///
/// Returns the verification error if the signature does not match.
pub fn verify_rs256(
    public_key: &RsaPublicKey,
    message: &[u8],
    signature: &[u8],
) -> Result<(), rsa::Error> {
    let digest = Sha256::digest(message);
    public_key.verify(Pkcs1v15Sign::new::<Sha256>(), &digest, signature)
}

#[async_trait]
impl SegmentValidator<SignatureContext> for SignatureValidator {
    async fn validate(&self, segment: &str, context: &SignatureContext) -> bool {
        self.check(segment, &context.key_id, &context.message).await
    }
}
