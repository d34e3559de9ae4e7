//! Canonical URI/query/headers encoders (C4–C6) and the signing pipeline
//! (C8): the public surface of the AWS SigV4 computation described in §6.

pub mod headers;
pub mod model;
pub mod query;
pub mod signing;
pub mod uri;

pub use model::{CanonicalFlags, Credential, HttpParameters, KeyValueRecord, SigningParameters};
pub use signing::{generate_http_authorization, generate_http_authorization_into, SignatureSpan, SignedAuthorization};

pub use sigv4_core::error::{Error, Result};
