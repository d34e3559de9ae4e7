//! Hash/HMAC façade (C7) for the SigV4 signing pipeline.

pub mod hash;
pub mod hmac;

pub use hash::{hash_and_hex_encode, hash_and_hex_encode_to_string, hash_bytes, HashAlgorithm, Sha256};
pub use hmac::{hmac as hmac_compute, HmacBuilder};
