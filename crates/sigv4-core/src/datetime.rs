//! Date engine (C2): parses RFC 3339 / RFC 5322 timestamps and emits the
//! compact ISO-8601 basic form SigV4 signs over (`YYYYMMDDTHHMMSSZ`).
//!
//! Parsing is driven by a tiny `%NC` format-string mini-language (`N` is a
//! single decimal width, `C` one of `Y M D h m s *`) rather than delegating
//! to `chrono`'s own parsers, because the validation rules here (leap
//! second tolerance on `second`, a 1900 year floor, exact-length dispatch
//! between the two accepted shapes) are specific to this protocol and
//! diverge from what a general-purpose date crate enforces.

use crate::bytes::int_to_ascii;
use crate::error::Error;

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, Copy)]
enum FieldKind {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Skip,
}

#[derive(Debug, Clone, Copy)]
enum FormatToken {
    Literal(u8),
    Field(usize, FieldKind),
}

/// Compiles a `%NC`-style format string into a token list the parser walks
/// in lock-step with the input bytes.
fn compile_format(fmt: &str) -> Vec<FormatToken> {
    let bytes = fmt.as_bytes();
    let mut tokens = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let width = (bytes[i + 1] - b'0') as usize;
            let kind = match bytes[i + 2] {
                b'Y' => FieldKind::Year,
                b'M' => FieldKind::Month,
                b'D' => FieldKind::Day,
                b'h' => FieldKind::Hour,
                b'm' => FieldKind::Minute,
                b's' => FieldKind::Second,
                b'*' => FieldKind::Skip,
                other => panic!("unsupported format code '{}'", other as char),
            };
            tokens.push(FormatToken::Field(width, kind));
            i += 3;
        } else {
            tokens.push(FormatToken::Literal(bytes[i]));
            i += 1;
        }
    }
    tokens
}

#[derive(Default)]
struct RawFields {
    year: u32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
}

fn apply_format(tokens: &[FormatToken], input: &[u8]) -> Result<RawFields, Error> {
    let mut pos = 0usize;
    let mut fields = RawFields::default();
    for tok in tokens {
        match *tok {
            FormatToken::Literal(expected) => {
                let b = *input
                    .get(pos)
                    .ok_or(Error::ISOFormattingError("unexpected end of input"))?;
                if b != expected {
                    return Err(Error::ISOFormattingError("literal mismatch in date format"));
                }
                pos += 1;
            }
            // A 3-wide month field is the RFC 5322 three-letter name, matched by
            // case-sensitive linear scan rather than digit parsing.
            FormatToken::Field(3, FieldKind::Month) => {
                let chunk = input
                    .get(pos..pos + 3)
                    .ok_or(Error::ISOFormattingError("unexpected end of input"))?;
                let name = std::str::from_utf8(chunk)
                    .map_err(|_| Error::ISOFormattingError("month name is not ASCII"))?;
                let idx = MONTH_NAMES
                    .iter()
                    .position(|m| *m == name)
                    .ok_or(Error::ISOFormattingError("unrecognized month name"))?;
                fields.month = (idx + 1) as u32;
                pos += 3;
            }
            FormatToken::Field(width, FieldKind::Skip) => {
                if pos + width > input.len() {
                    return Err(Error::ISOFormattingError("unexpected end of input"));
                }
                pos += width;
            }
            FormatToken::Field(width, kind) => {
                let chunk = input
                    .get(pos..pos + width)
                    .ok_or(Error::ISOFormattingError("unexpected end of input"))?;
                let mut value: u32 = 0;
                for &b in chunk {
                    if !b.is_ascii_digit() {
                        return Err(Error::ISOFormattingError("non-digit in numeric date field"));
                    }
                    value = value * 10 + (b - b'0') as u32;
                }
                match kind {
                    FieldKind::Year => fields.year = value,
                    FieldKind::Month => fields.month = value,
                    FieldKind::Day => fields.day = value,
                    FieldKind::Hour => fields.hour = value,
                    FieldKind::Minute => fields.minute = value,
                    FieldKind::Second => fields.second = value,
                    FieldKind::Skip => unreachable!("handled above"),
                }
                pos += width;
            }
        }
    }
    if pos != input.len() {
        return Err(Error::ISOFormattingError("trailing bytes after date"));
    }
    Ok(fields)
}

/// Calendar decomposition of a signing timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTime {
    pub year: u32,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    /// `0..=60`; 60 admits a leap second.
    pub second: u8,
}

fn is_leap_year(year: u32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

fn days_in_month(year: u32, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

impl DateTime {
    fn from_raw(raw: RawFields) -> Result<Self, Error> {
        let dt = DateTime {
            year: raw.year,
            month: raw.month as u8,
            day: raw.day as u8,
            hour: raw.hour as u8,
            minute: raw.minute as u8,
            second: raw.second as u8,
        };
        dt.validate()?;
        Ok(dt)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.year < 1900 {
            return Err(Error::ISOFormattingError("year must be >= 1900"));
        }
        if !(1..=12).contains(&self.month) {
            return Err(Error::ISOFormattingError("month out of range"));
        }
        let max_day = days_in_month(self.year, self.month);
        if self.day < 1 || self.day > max_day {
            return Err(Error::ISOFormattingError("day out of range for month"));
        }
        if self.hour > 23 {
            return Err(Error::ISOFormattingError("hour out of range"));
        }
        if self.minute > 59 {
            return Err(Error::ISOFormattingError("minute out of range"));
        }
        if self.second > 60 {
            return Err(Error::ISOFormattingError("second out of range"));
        }
        Ok(())
    }

    /// Emits the compact ISO-8601 basic form `YYYYMMDDTHHMMSSZ` (16 bytes).
    pub fn to_iso8601_basic(&self, out: &mut [u8; 16]) {
        int_to_ascii(self.year as u64, 4, &mut out[0..4]);
        int_to_ascii(self.month as u64, 2, &mut out[4..6]);
        int_to_ascii(self.day as u64, 2, &mut out[6..8]);
        out[8] = b'T';
        int_to_ascii(self.hour as u64, 2, &mut out[9..11]);
        int_to_ascii(self.minute as u64, 2, &mut out[11..13]);
        int_to_ascii(self.second as u64, 2, &mut out[13..15]);
        out[15] = b'Z';
    }

    /// `YYYYMMDD`, the date-stamp half of a SigV4 credential scope.
    pub fn date_stamp(&self) -> [u8; 8] {
        let mut out = [0u8; 8];
        int_to_ascii(self.year as u64, 4, &mut out[0..4]);
        int_to_ascii(self.month as u64, 2, &mut out[4..6]);
        int_to_ascii(self.day as u64, 2, &mut out[6..8]);
        out
    }
}

/// Parses `YYYY-MM-DDTHH:MM:SSZ` (20 bytes).
pub fn parse_rfc3339(input: &[u8]) -> Result<DateTime, Error> {
    let tokens = compile_format("%4Y-%2M-%2DT%2h:%2m:%2sZ");
    DateTime::from_raw(apply_format(&tokens, input)?)
}

/// Parses `Day, DD Mon YYYY HH:MM:SS GMT` (29 bytes).
pub fn parse_rfc5322(input: &[u8]) -> Result<DateTime, Error> {
    let tokens = compile_format("%3*, %2D %3M %4Y %2h:%2m:%2s GMT");
    DateTime::from_raw(apply_format(&tokens, input)?)
}

/// Dispatches on input length to the RFC 3339 (20 bytes) or RFC 5322 (29
/// bytes) parser.
pub fn parse(input: &[u8]) -> Result<DateTime, Error> {
    match input.len() {
        20 => parse_rfc3339(input),
        29 => parse_rfc5322(input),
        _ => Err(Error::ISOFormattingError(
            "input is neither RFC 3339 (20 bytes) nor RFC 5322 (29 bytes)",
        )),
    }
}

/// `date_to_iso8601(input, out)` from §6: parses `input` and writes the
/// 16-byte compact ISO-8601 basic form into `out`.
pub fn date_to_iso8601(input: &[u8], out: &mut [u8]) -> Result<(), Error> {
    if input.is_empty() {
        return Err(Error::InvalidParameter("date input must not be empty"));
    }
    if out.len() < 16 {
        return Err(Error::InvalidParameter(
            "output buffer must be at least 16 bytes",
        ));
    }
    let dt = parse(input)?;
    let mut buf = [0u8; 16];
    dt.to_iso8601_basic(&mut buf);
    out[..16].copy_from_slice(&buf);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rfc3339_roundtrip() {
        let dt = parse_rfc3339(b"2015-08-30T12:36:00Z").unwrap();
        let mut out = [0u8; 16];
        dt.to_iso8601_basic(&mut out);
        assert_eq!(&out, b"20150830T123600Z");
    }

    #[test]
    fn rfc5322_roundtrip() {
        let dt = parse_rfc5322(b"Sun, 30 Aug 2015 12:36:00 GMT").unwrap();
        let mut out = [0u8; 16];
        dt.to_iso8601_basic(&mut out);
        assert_eq!(&out, b"20150830T123600Z");
    }

    #[test]
    fn leap_day_succeeds() {
        assert!(parse_rfc3339(b"2020-02-29T00:00:00Z").is_ok());
    }

    #[test]
    fn non_leap_day_fails() {
        assert!(matches!(
            parse_rfc3339(b"2019-02-29T00:00:00Z"),
            Err(Error::ISOFormattingError(_))
        ));
    }

    #[test]
    fn leap_second_is_admitted() {
        assert!(parse_rfc3339(b"2016-12-31T23:59:60Z").is_ok());
    }

    #[test]
    fn rejects_bad_separator() {
        assert!(parse_rfc3339(b"2015/08/30T12:36:00Z").is_err());
    }

    #[test]
    fn rejects_non_digit_field() {
        assert!(parse_rfc3339(b"20AB-08-30T12:36:00Z").is_err());
    }

    #[test]
    fn rejects_year_before_1900() {
        assert!(parse_rfc3339(b"1899-01-01T00:00:00Z").is_err());
    }

    #[test]
    fn rejects_unknown_month_name() {
        assert!(parse_rfc5322(b"Sun, 30 Xyz 2015 12:36:00 GMT").is_err());
    }

    #[test]
    fn rejects_unsupported_length() {
        assert!(matches!(
            parse(b"not a date"),
            Err(Error::ISOFormattingError(_))
        ));
    }

    #[test]
    fn date_to_iso8601_rejects_small_output_buffer() {
        let mut out = [0u8; 8];
        assert!(matches!(
            date_to_iso8601(b"2015-08-30T12:36:00Z", &mut out),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn date_to_iso8601_rejects_empty_input() {
        let mut out = [0u8; 16];
        assert!(matches!(
            date_to_iso8601(b"", &mut out),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn date_stamp_is_first_eight_bytes() {
        let dt = parse_rfc3339(b"2015-08-30T12:36:00Z").unwrap();
        assert_eq!(&dt.date_stamp(), b"20150830");
    }
}
