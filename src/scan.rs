//! Reliable text↔numeric conversion: `scan_reliable` and its 128-bit
//! widening entry point `scan_reliable_128`.
//!
//! The defining guarantee: **if scanning succeeds, reprinting the produced
//! value with [`canonical_format`] reproduces the input byte-for-byte.**
//! Rather than hand-verifying that guarantee piecemeal per code path, every
//! branch below funnels through a single final check — parse a candidate
//! value, format it back, compare to the original bytes — which also
//! catches edge cases a purely syntactic check would miss (`"-0"`, for
//! instance, parses fine but canonically reprints as `"0"`, not `"-0"`).

use crate::databox::DataBox;
use crate::primitives::{is_digits, u64_from_buf_fast};
use core::fmt;

/// Errors from [`scan_reliable`] / [`scan_reliable_128`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanError {
    /// The input was empty.
    Empty,
    /// A leading zero, leading/repeated dot, or stray non-digit byte.
    InvalidForm,
    /// The magnitude exceeds the target width.
    Overflow,
    /// Parsing succeeded but reprinting the value did not reproduce the
    /// input byte-for-byte.
    RoundTripMismatch,
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ScanError::Empty => "empty input",
            ScanError::InvalidForm => "input is not in canonical numeric form",
            ScanError::Overflow => "value overflows the target width",
            ScanError::RoundTripMismatch => "value does not reprint byte-exact",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for ScanError {}

/// Reprints a [`DataBox`] the way the scanner expects to see it on input:
/// no scientific notation, shortest round-trip digits, and a `.0` suffix
/// preserved for whole-number floats (mirroring Rust's float `Debug`
/// formatting, which already guarantees shortest-round-trip output).
pub fn canonical_format(value: &DataBox) -> String {
    match value {
        DataBox::Bytes(s) => String::from_utf8_lossy(s.as_slice()).into_owned(),
        DataBox::Signed64(v) => v.to_string(),
        DataBox::Unsigned64(v) => v.to_string(),
        DataBox::Float32(v) => format!("{v:?}"),
        DataBox::Double64(v) => format!("{v:?}"),
        DataBox::Signed128(v) => v.to_string(),
        DataBox::Unsigned128(v) => v.to_string(),
        DataBox::Nan => "nan".to_string(),
        DataBox::PosInf => "inf".to_string(),
        DataBox::NegInf => "-inf".to_string(),
    }
}

fn check_round_trip(value: DataBox, original: &[u8]) -> Result<DataBox, ScanError> {
    if canonical_format(&value).as_bytes() == original {
        Ok(value)
    } else {
        Err(ScanError::RoundTripMismatch)
    }
}

/// Structural validation shared by the 64-bit and 128-bit entry points:
/// optional single leading `-`, optional single interior `.`, digits
/// everywhere else, no leading zero unless followed by `.` (or the whole
/// magnitude is exactly `"0"`), no trailing zero in the fractional part
/// unless it is the single digit right after the dot.
fn validate_syntax(bytes: &[u8]) -> Result<(bool, Option<usize>), ScanError> {
    if bytes.is_empty() {
        return Err(ScanError::Empty);
    }
    let negative = bytes[0] == b'-';
    let rest = if negative { &bytes[1..] } else { bytes };
    if rest.is_empty() {
        // lone "-"
        return Err(ScanError::InvalidForm);
    }
    let dot_positions: Vec<usize> = rest
        .iter()
        .enumerate()
        .filter(|(_, &b)| b == b'.')
        .map(|(i, _)| i)
        .collect();
    if dot_positions.len() > 1 {
        return Err(ScanError::InvalidForm);
    }
    let dot = dot_positions.first().copied();
    for (i, &b) in rest.iter().enumerate() {
        if Some(i) == dot {
            continue;
        }
        if !b.is_ascii_digit() {
            return Err(ScanError::InvalidForm);
        }
    }
    match dot {
        None => {
            if rest[0] == b'0' && rest.len() > 1 {
                return Err(ScanError::InvalidForm);
            }
        }
        Some(0) => return Err(ScanError::InvalidForm), // leading '.'
        Some(dp) => {
            if dp == rest.len() - 1 {
                return Err(ScanError::InvalidForm); // trailing '.' with no fraction digits
            }
            if rest[0] == b'0' && dp > 1 {
                return Err(ScanError::InvalidForm);
            }
            let last = rest[rest.len() - 1];
            if last == b'0' && rest[rest.len() - 2] != b'.' {
                return Err(ScanError::InvalidForm);
            }
        }
    }
    Ok((negative, dot))
}

/// Scans `bytes` into the narrowest native type that reprints
/// byte-for-byte, using the 64-bit integer / `f32`/`f64` float widths.
///
/// See the module documentation for the core round-trip guarantee.
pub fn scan_reliable(bytes: &[u8]) -> Result<DataBox, ScanError> {
    let (negative, dot) = validate_syntax(bytes)?;
    let rest = if negative { &bytes[1..] } else { bytes };

    match dot {
        Some(_) => {
            let text = std::str::from_utf8(bytes).map_err(|_| ScanError::InvalidForm)?;
            let d: f64 = text.parse().map_err(|_| ScanError::InvalidForm)?;
            let value = if (d as f32) as f64 == d {
                DataBox::Float32(d as f32)
            } else {
                DataBox::Double64(d)
            };
            check_round_trip(value, bytes)
        }
        None => {
            let digits = rest.len();
            if digits > 20 {
                return Err(ScanError::Overflow);
            }
            let magnitude = u64_from_buf_fast(rest).map_err(|_| ScanError::Overflow)?;
            let value = if negative {
                let limit = (i64::MAX as u64) + 1;
                if magnitude > limit {
                    return Err(ScanError::Overflow);
                }
                let v = if magnitude == limit {
                    i64::MIN
                } else {
                    -(magnitude as i64)
                };
                DataBox::Signed64(v)
            } else if digits < 19 || (digits == 19 && magnitude <= i64::MAX as u64) {
                DataBox::Signed64(magnitude as i64)
            } else if digits <= 20 {
                DataBox::Unsigned64(magnitude)
            } else {
                return Err(ScanError::Overflow);
            };
            check_round_trip(value, bytes)
        }
    }
}

/// 128-bit widening entry point: when `20 <= bytes.len() <= 40` and the
/// buffer is all digits (after an optional leading `-`), parses to
/// `i128`/`u128`, narrowing to `i64`/`u64` when representable. Falls
/// through to [`scan_reliable`] otherwise.
pub fn scan_reliable_128(bytes: &[u8]) -> Result<DataBox, ScanError> {
    if (20..=40).contains(&bytes.len()) {
        let negative = bytes[0] == b'-';
        let rest = if negative { &bytes[1..] } else { bytes };
        if !rest.is_empty() && is_digits(rest) && !(rest[0] == b'0' && rest.len() > 1) {
            let text = std::str::from_utf8(bytes).map_err(|_| ScanError::InvalidForm)?;
            if negative {
                let v: i128 = text.parse().map_err(|_| ScanError::Overflow)?;
                let value = if v >= i64::MIN as i128 && v <= i64::MAX as i128 {
                    DataBox::Signed64(v as i64)
                } else {
                    DataBox::Signed128(v)
                };
                return check_round_trip(value, bytes);
            } else {
                let v: u128 = text.parse().map_err(|_| ScanError::Overflow)?;
                let value = if v <= u64::MAX as u128 {
                    if v <= i64::MAX as u128 {
                        DataBox::Signed64(v as i64)
                    } else {
                        DataBox::Unsigned64(v as u64)
                    }
                } else {
                    DataBox::Unsigned128(v)
                };
                return check_round_trip(value, bytes);
            }
        }
    }
    scan_reliable(bytes)
}
