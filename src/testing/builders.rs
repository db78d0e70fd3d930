//! Key material and token builders for tests
//!
//! Keys and certificates are produced with OpenSSL so that verification in the
//! crate (pure-Rust `rsa`) is exercised against an independent signer.

use base64::Engine as _;
use openssl::asn1::Asn1Time;
use openssl::bn::BigNum;
use openssl::hash::MessageDigest;
use openssl::pkey::{PKey, Private};
use openssl::rsa::Rsa;
use openssl::sign::Signer;
use openssl::x509::{X509NameBuilder, X509};
use rsa::pkcs8::DecodePublicKey;
use rsa::RsaPublicKey;
use serde_json::{json, Value};

use crate::claims::expected_issuer;

/// Encode a JSON value as an unpadded base64url token segment
#[must_use]
pub fn encode_json_segment(value: &Value) -> String {
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(value.to_string())
}

/// Self-signed certificate for `key`, PEM encoded
///
/// # Panics
///
/// Panics if OpenSSL fails to build the certificate.
#[must_use]
pub fn self_signed_certificate_pem(key: &PKey<Private>, digest: MessageDigest) -> String {
    let mut name = X509NameBuilder::new().expect("name builder");
    name.append_entry_by_text("CN", "securetoken.system.gserviceaccount.com")
        .expect("common name");
    let name = name.build();

    let serial = BigNum::from_u32(1)
        .and_then(|n| n.to_asn1_integer())
        .expect("serial number");
    let not_before = Asn1Time::days_from_now(0).expect("not before");
    let not_after = Asn1Time::days_from_now(1).expect("not after");

    let mut builder = X509::builder().expect("certificate builder");
    builder.set_version(2).expect("version");
    builder.set_serial_number(&serial).expect("serial");
    builder.set_subject_name(&name).expect("subject");
    builder.set_issuer_name(&name).expect("issuer");
    builder.set_pubkey(key).expect("public key");
    builder.set_not_before(&not_before).expect("not before");
    builder.set_not_after(&not_after).expect("not after");
    builder.sign(key, digest).expect("certificate signature");

    let pem = builder.build().to_pem().expect("PEM encoding");
    String::from_utf8(pem).expect("PEM is ASCII")
}

/// A freshly generated RSA key pair with a self-signed certificate, the way
/// Google publishes its token signing keys
pub struct TestKeyPair {
    private_key: PKey<Private>,
    pub certificate_pem: String,
}

impl TestKeyPair {
    /// Generate a 2048-bit key pair
    ///
    /// # Panics
    ///
    /// Panics if OpenSSL fails to generate the key.
    #[must_use]
    pub fn generate() -> Self {
        let rsa = Rsa::generate(2048).expect("RSA key generation");
        let private_key = PKey::from_rsa(rsa).expect("RSA pkey");
        let certificate_pem = self_signed_certificate_pem(&private_key, MessageDigest::sha256());
        Self {
            private_key,
            certificate_pem,
        }
    }

    /// Public half as the crate's verification type
    ///
    /// # Panics
    ///
    /// Panics if the key cannot be re-encoded.
    #[must_use]
    pub fn public_key(&self) -> RsaPublicKey {
        let der = self.private_key.public_key_to_der().expect("public key DER");
        RsaPublicKey::from_public_key_der(&der).expect("RSA public key")
    }

    /// RS256 (PKCS#1 v1.5, SHA-256) signature over `message`
    ///
    /// # Panics
    ///
    /// Panics if signing fails.
    #[must_use]
    pub fn sign(&self, message: &str) -> Vec<u8> {
        let mut signer = Signer::new(MessageDigest::sha256(), &self.private_key).expect("signer");
        signer.update(message.as_bytes()).expect("signer update");
        signer.sign_to_vec().expect("signature")
    }

    /// [`Self::sign`], base64url encoded as it appears in a token
    #[must_use]
    pub fn sign_b64(&self, message: &str) -> String {
        base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(self.sign(message))
    }
}

/// Fluent builder for Firebase-shaped tokens
///
/// Starts from a token that is valid for `project_id` at any time before 2286:
/// header `{"alg":"RS256","kid":<kid>}`, claims `sub = "u1"`, `iat = 0`,
/// `exp = 9999999999` and matching issuer and audience.
#[derive(Debug, Clone)]
pub struct TestTokenBuilder {
    header: Value,
    claims: Value,
}

impl TestTokenBuilder {
    #[must_use]
    pub fn new(project_id: &str, kid: &str) -> Self {
        Self {
            header: json!({ "alg": "RS256", "kid": kid }),
            claims: json!({
                "sub": "u1",
                "iss": expected_issuer(project_id),
                "aud": project_id,
                "iat": 0,
                "exp": 9_999_999_999_i64,
            }),
        }
    }

    #[must_use]
    pub fn header_field(mut self, name: &str, value: impl Into<Value>) -> Self {
        if let Some(header) = self.header.as_object_mut() {
            header.insert(name.to_string(), value.into());
        }
        self
    }

    #[must_use]
    pub fn claim(mut self, name: &str, value: impl Into<Value>) -> Self {
        if let Some(claims) = self.claims.as_object_mut() {
            claims.insert(name.to_string(), value.into());
        }
        self
    }

    #[must_use]
    pub fn without_claim(mut self, name: &str) -> Self {
        if let Some(claims) = self.claims.as_object_mut() {
            claims.remove(name);
        }
        self
    }

    /// `header.claims`, the signed part of the token
    #[must_use]
    pub fn signing_input(&self) -> String {
        format!(
            "{}.{}",
            encode_json_segment(&self.header),
            encode_json_segment(&self.claims)
        )
    }

    /// Complete token signed by `key_pair`
    #[must_use]
    pub fn sign(&self, key_pair: &TestKeyPair) -> String {
        let signing_input = self.signing_input();
        let signature = key_pair.sign_b64(&signing_input);
        format!("{signing_input}.{signature}")
    }
}
