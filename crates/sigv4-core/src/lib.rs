//! Core primitives for the SigV4 signing pipeline: byte utilities (C1),
//! the date engine (C2), the comparator-driven sort (C3), the closed error
//! enumeration (§7), configuration (§6), and the arena processing buffer
//! (C9).

pub mod arena;
pub mod bytes;
pub mod config;
pub mod datetime;
pub mod error;
pub mod sort;

pub use config::Config;
pub use error::{Error, Result};
