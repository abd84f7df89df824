//! Extended-precision float comparisons and `10^e` computation.
//!
//! Comparing a 64-bit integer against a `double` needs more care than
//! `as f64` casts allow: values near `i64::MAX`/`u64::MAX` do not
//! round-trip exactly through `f64`, so a naive cast-and-compare can
//! report equality for two values that are not in fact equal.

use core::cmp::Ordering;

/// Returns whether this target has a wider-than-`f64` mantissa available
/// for `pow10`. Always `false` here: the crate does not assume `f80`/`f128`
/// hardware is present, so `pow10` always uses the plain `f64` path. This
/// is a deliberate resolution of an open question left unresolved upstream;
/// see DESIGN.md.
#[inline]
pub fn has_extended_precision() -> bool {
    false
}

/// Returns `10^e` for `1 <= e <= 341`, computed with the best available
/// mantissa precision (currently always `f64`, see [`has_extended_precision`]).
///
/// # Panics
/// Panics if `e` is outside `1..=341`.
pub fn pow10(e: u32) -> f64 {
    assert!((1..=341).contains(&e), "pow10: exponent out of range");
    // A fixed table for the exactly-representable range (every power of
    // ten from 10^1 to 10^22 is exact in f64) plus repeated squaring above
    // that, which is the standard way to keep error bounded without a
    // wider mantissa.
    const EXACT: [f64; 23] = [
        1.0, 1e1, 1e2, 1e3, 1e4, 1e5, 1e6, 1e7, 1e8, 1e9, 1e10, 1e11, 1e12, 1e13, 1e14, 1e15,
        1e16, 1e17, 1e18, 1e19, 1e20, 1e21, 1e22,
    ];
    if (e as usize) < EXACT.len() {
        return EXACT[e as usize];
    }
    let mut result = EXACT[22];
    let mut remaining = e - 22;
    while remaining > 0 {
        let step = remaining.min(22);
        result *= EXACT[step as usize];
        remaining -= step;
    }
    result
}

/// Three-way comparison between an `i64` and a `f64`.
///
/// Handles `NaN` (sorted greater than every integer), `+inf`/`-inf`, and the
/// case where `i` does not fit exactly in a `double` by comparing the
/// truncated integer part first and falling back to the fractional residual
/// only when the truncated parts are equal.
pub fn cmp_i64_f64(i: i64, d: f64) -> Ordering {
    if d.is_nan() {
        return Ordering::Less;
    }
    if d == f64::INFINITY {
        return Ordering::Less;
    }
    if d == f64::NEG_INFINITY {
        return Ordering::Greater;
    }
    // Values >= 2^63 or < -2^63 can't be represented by i64 at all, so the
    // comparison is decided purely by range.
    const I64_MAX_AS_F64: f64 = 9_223_372_036_854_775_808.0; // 2^63, first double >= i64::MAX
    if d >= I64_MAX_AS_F64 {
        return Ordering::Less;
    }
    if d < -I64_MAX_AS_F64 {
        return Ordering::Greater;
    }
    let trunc = d.trunc();
    let trunc_i = trunc as i64;
    match trunc_i.cmp(&i) {
        Ordering::Equal => {
            let frac = d - trunc;
            if frac > 0.0 {
                Ordering::Greater
            } else if frac < 0.0 {
                Ordering::Less
            } else {
                Ordering::Equal
            }
        }
        other => other,
    }
}

/// Three-way comparison between a `u64` and a `f64`.
pub fn cmp_u64_f64(u: u64, d: f64) -> Ordering {
    if d.is_nan() {
        return Ordering::Less;
    }
    if d == f64::INFINITY {
        return Ordering::Less;
    }
    if d == f64::NEG_INFINITY {
        return Ordering::Greater;
    }
    if d < 0.0 {
        return Ordering::Greater;
    }
    const U64_MAX_AS_F64: f64 = 18_446_744_073_709_551_616.0; // 2^64
    if d >= U64_MAX_AS_F64 {
        return Ordering::Less;
    }
    let trunc = d.trunc();
    let trunc_u = trunc as u64;
    match trunc_u.cmp(&u) {
        Ordering::Equal => {
            let frac = d - trunc;
            if frac > 0.0 {
                Ordering::Greater
            } else if frac < 0.0 {
                Ordering::Less
            } else {
                Ordering::Equal
            }
        }
        other => other,
    }
}
