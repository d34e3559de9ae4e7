//! Configuration (§6): the compile-time constants of the embedded-C
//! original, reworked as an ordinary Rust `Config` value so a caller can
//! override them per signing call instead of only at compile time.

use serde::{Deserialize, Serialize};

/// Arena size (bytes). Default `PROCESSING_LEN` is 4096.
pub const DEFAULT_PROCESSING_LEN: usize = 4096;

/// Default cap on the number of query-string key/value pairs.
pub const DEFAULT_MAX_QUERY_PAIRS: usize = 128;

/// Default cap on the number of header key/value pairs.
pub const DEFAULT_MAX_HEADER_PAIRS: usize = 64;

/// Upper bound the crypto interface's digest length must not exceed
/// (SHA-256 uses 32 of this).
pub const HASH_MAX_DIGEST_LEN: usize = 64;

/// Upper bound the crypto interface's block length must not exceed
/// (SHA-256 uses 64 of this).
pub const HASH_MAX_BLOCK_LEN: usize = 128;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub processing_len: usize,
    pub max_query_pairs: usize,
    pub max_header_pairs: usize,
    pub hash_max_digest_len: usize,
    pub hash_max_block_len: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            processing_len: DEFAULT_PROCESSING_LEN,
            max_query_pairs: DEFAULT_MAX_QUERY_PAIRS,
            max_header_pairs: DEFAULT_MAX_HEADER_PAIRS,
            hash_max_digest_len: HASH_MAX_DIGEST_LEN,
            hash_max_block_len: HASH_MAX_BLOCK_LEN,
        }
    }
}

/// Loads overrides from a TOML file. Kept behind a feature since the pure
/// signing pipeline itself never touches the filesystem — this is strictly
/// a convenience for a caller embedding the crate in a larger service.
#[cfg(feature = "config-file")]
pub fn from_toml_file(path: &str) -> crate::Result<Config> {
    let content = std::fs::read_to_string(path)
        .map_err(|_| crate::Error::InvalidParameter("failed to read config file"))?;
    toml::from_str(&content).map_err(|_| crate::Error::InvalidParameter("failed to parse config file"))
}
