//! Data model (§3): the request- and credential-shaped inputs the signing
//! pipeline consumes, and the bitset describing which parts of a request
//! already arrive canonical.

use chrono::{DateTime, Utc};

/// An access-key credential, immutable for the duration of one signing call.
#[derive(Debug, Clone)]
pub struct Credential<'a> {
    pub access_key_id: &'a str,
    pub secret_access_key: &'a str,
    pub security_token: Option<&'a str>,
    /// Carried in the data model for callers that track credential
    /// lifetime; the signing pipeline itself never reads it.
    pub expiration: Option<DateTime<Utc>>,
}

impl<'a> Credential<'a> {
    pub fn new(access_key_id: &'a str, secret_access_key: &'a str) -> Self {
        Credential {
            access_key_id,
            secret_access_key,
            security_token: None,
            expiration: None,
        }
    }
}

/// Which parts of [`HttpParameters`] already arrived canonicalized and
/// must be passed through the pipeline verbatim. A hand-rolled bitset
/// over `u8`; four flags don't justify pulling in `bitflags`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CanonicalFlags(u8);

impl CanonicalFlags {
    pub const NONE: CanonicalFlags = CanonicalFlags(0);
    pub const PATH_IS_CANONICAL: CanonicalFlags = CanonicalFlags(0b0001);
    pub const QUERY_IS_CANONICAL: CanonicalFlags = CanonicalFlags(0b0010);
    pub const HEADERS_ARE_CANONICAL: CanonicalFlags = CanonicalFlags(0b0100);
    /// When set, `payload` is already the hex digest and must not be
    /// re-hashed.
    pub const PAYLOAD_IS_HASH: CanonicalFlags = CanonicalFlags(0b1000);

    pub const fn contains(self, other: CanonicalFlags) -> bool {
        (self.0 & other.0) == other.0
    }

    pub const fn union(self, other: CanonicalFlags) -> CanonicalFlags {
        CanonicalFlags(self.0 | other.0)
    }
}

impl std::ops::BitOr for CanonicalFlags {
    type Output = CanonicalFlags;
    fn bitor(self, rhs: CanonicalFlags) -> CanonicalFlags {
        self.union(rhs)
    }
}

/// The request-shaped input to the signing pipeline. Every byte-string
/// field carries its length via the slice itself; no NUL-termination is
/// assumed anywhere.
#[derive(Debug, Clone)]
pub struct HttpParameters<'a> {
    pub method: &'a [u8],
    pub path: &'a [u8],
    pub query: &'a [u8],
    /// Raw `name:value\r\n`-delimited header block, per §4.6.
    pub headers: &'a [u8],
    pub payload: &'a [u8],
    pub flags: CanonicalFlags,
}

impl<'a> HttpParameters<'a> {
    pub fn new(method: &'a [u8], path: &'a [u8], query: &'a [u8], headers: &'a [u8], payload: &'a [u8]) -> Self {
        HttpParameters {
            method,
            path,
            query,
            headers,
            payload,
            flags: CanonicalFlags::NONE,
        }
    }

    pub fn with_flags(mut self, flags: CanonicalFlags) -> Self {
        self.flags = flags;
        self
    }
}

/// Everything the signing pipeline (C8) needs for one call.
#[derive(Debug, Clone)]
pub struct SigningParameters<'a> {
    pub credential: Credential<'a>,
    /// Exactly 16 bytes: `YYYYMMDDTHHMMSSZ`.
    pub date_iso8601: &'a str,
    pub region: &'a str,
    pub service: &'a str,
    /// Defaults to `"AWS4-HMAC-SHA256"` when `None`.
    pub algorithm: Option<&'a str>,
    pub http_parameters: HttpParameters<'a>,
}

impl<'a> SigningParameters<'a> {
    pub fn algorithm(&self) -> &'a str {
        self.algorithm.unwrap_or("AWS4-HMAC-SHA256")
    }
}

/// A key/value pair borrowed from caller-owned input; the encoders never
/// copy keys or values until they write the canonical form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyValueRecord<'a> {
    pub key: &'a [u8],
    pub value: &'a [u8],
}
