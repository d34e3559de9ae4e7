//! Hash/HMAC façade (C7), hash half.
//!
//! `HashAlgorithm` is the Rust shape of the `CryptoInterface` contract
//! (`hash_init`/`hash_update`/`hash_final`, `block_len`, `digest_len`,
//! `hash_ctx_storage`): the core consumes a hash, it does not choose one.
//! `Sha256` is the concrete implementation the signing pipeline defaults
//! to, built on the `sha2` crate.

use sigv4_core::bytes::to_lower_hex;
use sigv4_core::error::Error;

use tracing::trace;

/// Stand-in for the streaming `CryptoInterface` contract: a hash context that
/// accumulates input via repeated `update` calls and yields a fixed-length
/// digest on `finalize`.
pub trait HashAlgorithm: Default {
    /// `block_len` — the hash's internal block size.
    const BLOCK_LEN: usize;
    /// `digest_len` — the hash's output length.
    const DIGEST_LEN: usize;

    fn update(&mut self, data: &[u8]);

    /// Writes the digest into `out[..DIGEST_LEN]`. Fails with `HashError`
    /// if `out` is too small.
    fn finalize(self, out: &mut [u8]) -> Result<(), Error>;
}

#[derive(Default)]
pub struct Sha256(sha2::Sha256);

impl HashAlgorithm for Sha256 {
    const BLOCK_LEN: usize = 64;
    const DIGEST_LEN: usize = 32;

    fn update(&mut self, data: &[u8]) {
        use digest::Digest;
        self.0.update(data);
    }

    fn finalize(self, out: &mut [u8]) -> Result<(), Error> {
        use digest::Digest;
        if out.len() < Self::DIGEST_LEN {
            return Err(Error::HashError("digest output buffer too small"));
        }
        let digest = self.0.finalize();
        out[..Self::DIGEST_LEN].copy_from_slice(&digest);
        Ok(())
    }
}

/// One-shot hash over `data`, as an owned digest.
pub fn hash_bytes<H: HashAlgorithm>(data: &[u8]) -> Result<Vec<u8>, Error> {
    let mut ctx = H::default();
    ctx.update(data);
    let mut out = vec![0u8; H::DIGEST_LEN];
    ctx.finalize(&mut out)?;
    Ok(out)
}

/// `hash_and_hex_encode(input, out)` from §4.7: `init; update(input);
/// final(digest); hex_lower(digest, out)`. `out` must be at least
/// `2 * digest_len` bytes.
pub fn hash_and_hex_encode<H: HashAlgorithm>(data: &[u8], out: &mut [u8]) -> Result<(), Error> {
    let needed = 2 * H::DIGEST_LEN;
    if out.len() < needed {
        return Err(Error::insufficient_memory(needed, out.len()));
    }
    let digest = hash_bytes::<H>(data)?;
    trace!(input_len = data.len(), digest_len = digest.len(), "hashed input");
    for (i, byte) in digest.iter().enumerate() {
        out[2 * i] = to_lower_hex(byte >> 4);
        out[2 * i + 1] = to_lower_hex(byte & 0x0F);
    }
    Ok(())
}

/// Convenience wrapper returning an owned lower-hex `String`.
pub fn hash_and_hex_encode_to_string<H: HashAlgorithm>(data: &[u8]) -> Result<String, Error> {
    let mut out = vec![0u8; 2 * H::DIGEST_LEN];
    hash_and_hex_encode::<H>(data, &mut out)?;
    Ok(String::from_utf8(out).expect("hex alphabet is ASCII"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_of_empty_string() {
        let hex = hash_and_hex_encode_to_string::<Sha256>(b"").unwrap();
        assert_eq!(
            hex,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn sha256_of_known_vector() {
        let hex = hash_and_hex_encode_to_string::<Sha256>(b"hello world").unwrap();
        assert_eq!(
            hex,
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn output_buffer_too_small_is_rejected() {
        let mut out = [0u8; 10];
        assert!(matches!(
            hash_and_hex_encode::<Sha256>(b"x", &mut out),
            Err(Error::InsufficientMemory { .. })
        ));
    }
}
