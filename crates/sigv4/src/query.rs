//! Canonical query encoder (C5): split, sort, emit, per §4.5.

use std::cmp::Ordering;

use sigv4_core::error::Error;
use sigv4_core::sort::sort_records;

use crate::model::KeyValueRecord;
use crate::uri::encode_uri_to_vec;

/// Splits a raw `k=v&k=v...` query string into records. Empty values are
/// legal; empty keys are silently dropped. Fails with
/// `MaxQueryPairCountExceeded` if more than `max_pairs` records would
/// result.
pub fn split_query<'a>(
    query: &'a [u8],
    max_pairs: usize,
) -> Result<Vec<KeyValueRecord<'a>>, Error> {
    if query.is_empty() {
        return Ok(Vec::new());
    }

    let mut records = Vec::new();
    for param in query.split(|&b| b == b'&') {
        if param.is_empty() {
            continue;
        }
        let (key, value) = match param.iter().position(|&b| b == b'=') {
            Some(eq) => (&param[..eq], &param[eq + 1..]),
            None => (param, &param[param.len()..]),
        };
        if key.is_empty() {
            continue;
        }
        if records.len() >= max_pairs {
            return Err(Error::MaxQueryPairCountExceeded { max: max_pairs });
        }
        records.push(KeyValueRecord { key, value });
    }
    Ok(records)
}

/// Total order from §4.5: unsigned byte order over `min(|a|,|b|)` of the
/// key, shorter key first on a common prefix; ties broken the same way on
/// value.
pub fn compare_records(a: &KeyValueRecord, b: &KeyValueRecord) -> Ordering {
    compare_bytes(a.key, b.key).then_with(|| compare_bytes(a.value, b.value))
}

fn compare_bytes(a: &[u8], b: &[u8]) -> Ordering {
    let n = a.len().min(b.len());
    match a[..n].cmp(&b[..n]) {
        Ordering::Equal => a.len().cmp(&b.len()),
        other => other,
    }
}

/// Produces the canonical query block. When `query_is_canonical`, `query`
/// is copied through untouched (no trailing `\n` is added in that case,
/// since it is assumed already in final form).
pub fn canonical_query(
    query: &[u8],
    max_pairs: usize,
    query_is_canonical: bool,
) -> Result<Vec<u8>, Error> {
    if query_is_canonical {
        return Ok(query.to_vec());
    }

    let mut records = split_query(query, max_pairs)?;
    sort_records(&mut records, compare_records);

    let mut out = Vec::new();
    for (i, record) in records.iter().enumerate() {
        if i > 0 {
            out.push(b'&');
        }
        out.extend(encode_uri_to_vec(record.key, true, false)?);
        if !record.value.is_empty() {
            out.push(b'=');
            out.extend(encode_uri_to_vec(record.value, true, true)?);
        }
    }
    out.push(b'\n');
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_yields_bare_newline() {
        let out = canonical_query(b"", 128, false).unwrap();
        assert_eq!(out, b"\n");
    }

    #[test]
    fn duplicate_keys_sort_by_key_then_value() {
        let out = canonical_query(b"b=2&a=1&b=1", 128, false).unwrap();
        assert_eq!(out, b"a=1&b=1&b=2\n");
    }

    #[test]
    fn empty_keys_are_dropped_empty_values_kept() {
        // §4.5 Phase 3 only emits "=" when the value is non-empty, so an
        // empty-valued key ("k=") canonicalizes to the bare key.
        let out = canonical_query(b"=x&k=&k2=v", 128, false).unwrap();
        assert_eq!(out, b"k&k2=v\n");
    }

    #[test]
    fn value_containing_equals_is_double_encoded() {
        let out = canonical_query(b"filter=a=b", 128, false).unwrap();
        assert_eq!(out, b"filter=a%253Db\n");
    }

    #[test]
    fn shorter_key_sorts_first_on_common_prefix() {
        let out = canonical_query(b"ab=1&a=2", 128, false).unwrap();
        assert_eq!(out, b"a=2&ab=1\n");
    }

    #[test]
    fn too_many_pairs_is_rejected() {
        let query = b"a=1&b=2&c=3";
        let err = split_query(query, 2);
        assert!(matches!(err, Err(Error::MaxQueryPairCountExceeded { max: 2 })));
    }

    #[test]
    fn canonical_flag_passes_through_verbatim() {
        let out = canonical_query(b"already=sorted", 128, true).unwrap();
        assert_eq!(out, b"already=sorted");
    }
}
