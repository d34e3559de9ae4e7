//! Canonical headers encoder (C6): parse, trim/collapse, sort, emit the
//! canonical block plus the signed-headers list, per §4.6.

use std::cmp::Ordering;

use sigv4_core::error::Error;
use sigv4_core::sort::sort_records;

/// A parsed, not-yet-canonicalized header: borrowed name/value slices plus
/// the position it was found at, so a stable sort can fall back to input
/// order on a name tie.
#[derive(Debug, Clone, Copy)]
struct ParsedHeader<'a> {
    name: &'a [u8],
    value: &'a [u8],
    index: usize,
}

/// Parses `headers` as `name:value\r\n` lines, stopping at the first empty
/// line or end-of-input. Fails with `MaxHeaderPairCountExceeded` past
/// `max_pairs` entries.
fn parse_headers(headers: &[u8], max_pairs: usize) -> Result<Vec<ParsedHeader<'_>>, Error> {
    let mut out = Vec::new();
    let mut index = 0;
    for line in headers.split(|&b| b == b'\n') {
        let line = strip_trailing_cr(line);
        if line.is_empty() {
            break;
        }
        let colon = line
            .iter()
            .position(|&b| b == b':')
            .ok_or(Error::InvalidParameter("header line missing ':'"))?;
        let name = &line[..colon];
        let value = &line[colon + 1..];
        if out.len() >= max_pairs {
            return Err(Error::MaxHeaderPairCountExceeded { max: max_pairs });
        }
        out.push(ParsedHeader { name, value, index });
        index += 1;
    }
    Ok(out)
}

fn strip_trailing_cr(line: &[u8]) -> &[u8] {
    match line.last() {
        Some(b'\r') => &line[..line.len() - 1],
        _ => line,
    }
}

fn lowercase_trimmed(name: &[u8]) -> Vec<u8> {
    trim(name).iter().map(|b| b.to_ascii_lowercase()).collect()
}

fn trim(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|b| !b.is_ascii_whitespace()).unwrap_or(bytes.len());
    let end = bytes.iter().rposition(|b| !b.is_ascii_whitespace()).map_or(start, |i| i + 1);
    &bytes[start..end]
}

/// Collapses internal runs of ASCII whitespace to a single space, leaving
/// double-quoted substrings untouched (the AWS SigV4 quoting rule), after
/// trimming leading/trailing whitespace.
fn collapse_value(value: &[u8]) -> Vec<u8> {
    let trimmed = trim(value);
    let mut out = Vec::with_capacity(trimmed.len());
    let mut in_quotes = false;
    let mut pending_space = false;
    for &b in trimmed {
        if b == b'"' {
            in_quotes = !in_quotes;
            if pending_space {
                out.push(b' ');
                pending_space = false;
            }
            out.push(b);
            continue;
        }
        if !in_quotes && b.is_ascii_whitespace() {
            pending_space = true;
            continue;
        }
        if pending_space {
            out.push(b' ');
            pending_space = false;
        }
        out.push(b);
    }
    out
}

fn compare_headers(a: &(Vec<u8>, usize), b: &(Vec<u8>, usize)) -> Ordering {
    a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1))
}

/// The two artifacts C6 produces: the canonical headers block and the
/// semicolon-joined signed-headers list.
pub struct CanonicalHeaders {
    pub block: Vec<u8>,
    pub signed_headers: String,
}

/// Produces both C6 artifacts. When `headers_are_canonical`, `headers` is
/// assumed to already be the canonical block; `signed_headers` is then
/// derived by scanning its header names in order (already sorted).
pub fn canonical_headers(
    headers: &[u8],
    max_pairs: usize,
    headers_are_canonical: bool,
) -> Result<CanonicalHeaders, Error> {
    if headers_are_canonical {
        let mut names = Vec::new();
        for line in headers.split(|&b| b == b'\n') {
            if line.is_empty() {
                continue;
            }
            if let Some(colon) = line.iter().position(|&b| b == b':') {
                names.push(String::from_utf8_lossy(&line[..colon]).into_owned());
            }
        }
        return Ok(CanonicalHeaders {
            block: headers.to_vec(),
            signed_headers: names.join(";"),
        });
    }

    let parsed = parse_headers(headers, max_pairs)?;
    let mut normalized: Vec<(Vec<u8>, Vec<u8>, usize)> = parsed
        .into_iter()
        .map(|h| (lowercase_trimmed(h.name), collapse_value(h.value), h.index))
        .collect();

    sort_records(&mut normalized, |a, b| compare_headers(&(a.0.clone(), a.2), &(b.0.clone(), b.2)));

    let mut block = Vec::new();
    let mut names = Vec::with_capacity(normalized.len());
    for (name, value, _) in &normalized {
        block.extend_from_slice(name);
        block.push(b':');
        block.extend_from_slice(value);
        block.push(b'\n');
        names.push(String::from_utf8_lossy(name).into_owned());
    }
    block.push(b'\n');

    Ok(CanonicalHeaders {
        block,
        signed_headers: names.join(";"),
    })
}
