//! Error types for the SigV4 signing core

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// The closed set of failures the signing core can report.
///
/// Unlike a typical service-level error enum, this is deliberately closed:
/// there is no `Other(anyhow::Error)` escape hatch, because the core's
/// contract with its callers (§7) enumerates exactly these six kinds.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("required input is missing or zero-length: {0}")]
    InvalidParameter(&'static str),

    #[error("buffer too small, need {needed} bytes, have {available}")]
    InsufficientMemory { needed: usize, available: usize },

    #[error("date parse/validation failure: {0}")]
    ISOFormattingError(&'static str),

    #[error("query has more than {max} parameters")]
    MaxQueryPairCountExceeded { max: usize },

    #[error("headers have more than {max} entries")]
    MaxHeaderPairCountExceeded { max: usize },

    #[error("crypto interface reported failure: {0}")]
    HashError(&'static str),
}

impl Error {
    pub fn insufficient_memory(needed: usize, available: usize) -> Self {
        let err = Error::InsufficientMemory { needed, available };
        tracing::warn!(%err, "arena or output buffer overflow");
        err
    }
}
