//! Canonical URI encoder (C4): RFC 3986 percent-encoding with the
//! slash- and equals-handling SigV4 needs, plus the single-vs-double-pass
//! service policy.

use sigv4_core::bytes::{is_unreserved, to_upper_hex};
use sigv4_core::error::Error;

/// Percent-encodes `input` into `out`, per §4.4:
/// - unreserved bytes copy verbatim;
/// - `/` copies verbatim unless `encode_slash`;
/// - `=` emits the literal `%253D` when `double_encode_equals`;
/// - everything else emits `%XY` (upper hex).
///
/// Returns the number of bytes written. Fails with `InsufficientMemory` if
/// `out` is too small; nothing partial is written in that case.
pub fn encode_uri(
    input: &[u8],
    encode_slash: bool,
    double_encode_equals: bool,
    out: &mut [u8],
) -> Result<usize, Error> {
    let needed = encoded_len(input, encode_slash, double_encode_equals);
    if out.len() < needed {
        return Err(Error::insufficient_memory(needed, out.len()));
    }

    let mut cursor = 0;
    for &b in input {
        if is_unreserved(b) {
            out[cursor] = b;
            cursor += 1;
        } else if b == b'/' && !encode_slash {
            out[cursor] = b;
            cursor += 1;
        } else if b == b'=' && double_encode_equals {
            out[cursor..cursor + 5].copy_from_slice(b"%253D");
            cursor += 5;
        } else {
            out[cursor] = b'%';
            out[cursor + 1] = to_upper_hex(b >> 4);
            out[cursor + 2] = to_upper_hex(b & 0x0F);
            cursor += 3;
        }
    }
    Ok(cursor)
}

/// Convenience wrapper returning an owned `Vec<u8>`.
pub fn encode_uri_to_vec(
    input: &[u8],
    encode_slash: bool,
    double_encode_equals: bool,
) -> Result<Vec<u8>, Error> {
    let mut out = vec![0u8; encoded_len(input, encode_slash, double_encode_equals)];
    let n = encode_uri(input, encode_slash, double_encode_equals, &mut out)?;
    out.truncate(n);
    Ok(out)
}

fn encoded_len(input: &[u8], encode_slash: bool, double_encode_equals: bool) -> usize {
    input
        .iter()
        .map(|&b| {
            if is_unreserved(b) || (b == b'/' && !encode_slash) {
                1
            } else if b == b'=' && double_encode_equals {
                5
            } else {
                3
            }
        })
        .sum()
}

/// Produces the canonical URI for `path`, applying the service-specific
/// single-vs-double-encode policy of §4.4: the service `"s3"` (exact
/// bytes, length 2) is encoded once, every other service twice.
///
/// When `path_is_canonical`, `path` is copied through untouched.
pub fn canonical_uri(
    path: &[u8],
    service: &str,
    path_is_canonical: bool,
) -> Result<Vec<u8>, Error> {
    if path_is_canonical {
        return Ok(path.to_vec());
    }

    let path = if path.is_empty() { b"/".as_slice() } else { path };
    let once = encode_uri_to_vec(path, false, false)?;
    if service.as_bytes() == b"s3" {
        Ok(once)
    } else {
        encode_uri_to_vec(&once, false, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreserved_bytes_pass_through() {
        let out = encode_uri_to_vec(b"abcXYZ019-_.~", false, false).unwrap();
        assert_eq!(out, b"abcXYZ019-_.~");
    }

    #[test]
    fn reserved_bytes_are_percent_encoded_uppercase() {
        let out = encode_uri_to_vec(b" /", true, false).unwrap();
        assert_eq!(out, b"%20%2F");
    }

    #[test]
    fn slash_passes_through_unless_encode_slash() {
        let out = encode_uri_to_vec(b"a/b", false, false).unwrap();
        assert_eq!(out, b"a/b");
        let out = encode_uri_to_vec(b"a/b", true, false).unwrap();
        assert_eq!(out, b"a%2Fb");
    }

    #[test]
    fn equals_double_encodes_when_requested() {
        let out = encode_uri_to_vec(b"a=b", true, true).unwrap();
        assert_eq!(out, b"a%253Db");
    }

    #[test]
    fn s3_service_encodes_once() {
        let path = b"/my bucket/key=1";
        let out = canonical_uri(path, "s3", false).unwrap();
        // a single encoding pass: space -> %20, '=' is not doubled because
        // the single-pass URI encoder only double-encodes '=' when asked.
        assert_eq!(out, encode_uri_to_vec(path, false, false).unwrap());
    }

    #[test]
    fn other_services_encode_twice() {
        let path = b"/my bucket";
        let out = canonical_uri(path, "iam", false).unwrap();
        let once = encode_uri_to_vec(path, false, false).unwrap();
        let twice = encode_uri_to_vec(&once, false, false).unwrap();
        assert_eq!(out, twice);
    }

    #[test]
    fn empty_path_becomes_root() {
        let out = canonical_uri(b"", "iam", false).unwrap();
        assert_eq!(out, b"/");
    }

    #[test]
    fn canonical_flag_passes_through_verbatim() {
        let out = canonical_uri(b"/already%2Fencoded", "iam", true).unwrap();
        assert_eq!(out, b"/already%2Fencoded");
    }

    #[test]
    fn insufficient_output_buffer_is_rejected() {
        let mut out = [0u8; 1];
        let err = encode_uri(b"ab", false, false, &mut out);
        assert!(matches!(err, Err(Error::InsufficientMemory { .. })));
    }
}
