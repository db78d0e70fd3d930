//! Testing utilities for the token validator
//!
//! Available to unit tests and, with the `testing` feature, to integration tests.
//!
//! - [`fixtures`] - Recorded key server data and a token Google signed
//! - [`builders`] - Generated key pairs and a fluent token builder
//! - [`mock`] - Fake transport, clock, key fetcher and stages
//!
//! ## Usage
//!
//! ```rust,ignore
//! use firebase_token_validator::testing::{TestKeyPair, TestTokenBuilder};
//!
//! let key_pair = TestKeyPair::generate();
//! let token = TestTokenBuilder::new("proj1", "k1")
//!     .claim("sub", "someone")
//!     .sign(&key_pair);
//! assert_eq!(token.split('.').count(), 3);
//! ```

pub mod builders;
pub mod fixtures;
pub mod mock;

pub use builders::{encode_json_segment, TestKeyPair, TestTokenBuilder};
pub use mock::{
    AcceptingValidator, ManualClock, MockHttpClient, RecordingKeyFetcher, RejectingValidator,
};
