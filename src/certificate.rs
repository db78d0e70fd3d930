// PEM encoded X.509 certificate -> RSA public key

use openssl::pkey::Id;
use openssl::x509::X509;
use rsa::pkcs8::DecodePublicKey;
use rsa::RsaPublicKey;

/// Extract the RSA public key from a PEM encoded X.509 certificate.
///
/// Validity dates and the certificate's own signature are not checked; the
/// key server is the trust anchor.
///
/// # Errors
///
/// Returns a description of the problem if the text is not a PEM certificate or
/// the certificate does not carry an RSA key.
pub fn rsa_public_key_from_pem(pem: &str) -> Result<RsaPublicKey, String> {
    let certificate =
        X509::from_pem(pem.as_bytes()).map_err(|e| format!("Invalid X.509 certificate: {e}"))?;

    let public_key = certificate
        .public_key()
        .map_err(|e| format!("Unable to read certificate public key: {e}"))?;

    if public_key.id() != Id::RSA {
        return Err(format!(
            "Certificate public key is not RSA (key type {})",
            public_key.id().as_raw()
        ));
    }

    let der = public_key
        .public_key_to_der()
        .map_err(|e| format!("Unable to encode certificate public key: {e}"))?;

    RsaPublicKey::from_public_key_der(&der).map_err(|e| format!("Invalid RSA public key: {e}"))
}
