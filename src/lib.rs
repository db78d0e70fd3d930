#![warn(clippy::pedantic)]
#![warn(clippy::cargo)]
#![deny(warnings)]
#![allow(clippy::multiple_crate_versions)]

//! Validation of Firebase-issued ID tokens
//!
//! A token is accepted when its header names RS256 and a key id, its claims are
//! current and issued for the configured project, and its signature verifies
//! against the certificate Google publishes under that key id.

/// Version of the firebase-token-validator crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod certificate;
pub mod claims;
pub mod clock;
pub mod error;
pub mod header;
pub mod http;
pub mod key_fetcher;
pub mod segment;
pub mod settings;
pub mod signature;
pub mod token;
pub mod validator;

// Testing utilities - available for unit tests and integration tests with testing feature
#[cfg(any(test, feature = "testing"))]
pub mod testing;

/// Re-export commonly used items
pub use claims::ClaimsValidator;
pub use clock::{Clock, SystemClock};
pub use error::{KeyFetchError, TokenValidationError};
pub use header::HeaderValidator;
pub use http::{HttpClient, HttpResponse, ReqwestHttpClient};
pub use key_fetcher::{CachedKeyFetcher, KeyFetcher, KEY_SERVER_URL};
pub use settings::ValidatorSettings;
pub use signature::SignatureValidator;
pub use token::TokenValidator;
pub use validator::{ClaimsContext, HeaderContext, SegmentValidator, SignatureContext};
