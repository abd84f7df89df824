//! `DataBox` — the tagged value every other module produces or consumes.
//!
//! A minimal concrete definition covering the nine variants this crate's
//! modules need to compile and be testable standalone, nothing more.

use crate::dks::DksString;
use core::fmt;

/// A tagged value: bytes, one of the sized integer/float forms, or one of
/// the three non-finite float sentinels.
#[derive(Debug, Clone)]
pub enum DataBox {
    Bytes(DksString),
    Signed64(i64),
    Unsigned64(u64),
    Float32(f32),
    Double64(f64),
    Signed128(i128),
    Unsigned128(u128),
    Nan,
    PosInf,
    NegInf,
}

impl PartialEq for DataBox {
    fn eq(&self, other: &Self) -> bool {
        use DataBox::*;
        match (self, other) {
            (Bytes(a), Bytes(b)) => a.as_slice() == b.as_slice(),
            (Signed64(a), Signed64(b)) => a == b,
            (Unsigned64(a), Unsigned64(b)) => a == b,
            (Float32(a), Float32(b)) => a == b,
            (Double64(a), Double64(b)) => a == b,
            (Signed128(a), Signed128(b)) => a == b,
            (Unsigned128(a), Unsigned128(b)) => a == b,
            // NaN is its own discriminant here, not IEEE payload bits, so
            // two Nan boxes are equal to each other for container bookkeeping
            // even though the underlying float NaN != NaN.
            (Nan, Nan) => true,
            (PosInf, PosInf) => true,
            (NegInf, NegInf) => true,
            _ => false,
        }
    }
}

impl fmt::Display for DataBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataBox::Bytes(s) => f.write_str(&String::from_utf8_lossy(s.as_slice())),
            DataBox::Signed64(v) => write!(f, "{v}"),
            DataBox::Unsigned64(v) => write!(f, "{v}"),
            // `{:?}` (not `{}`) so a whole-number float reprints with its
            // `.0` — this must match `scan::canonical_format` exactly.
            DataBox::Float32(v) => write!(f, "{v:?}"),
            DataBox::Double64(v) => write!(f, "{v:?}"),
            DataBox::Signed128(v) => write!(f, "{v}"),
            DataBox::Unsigned128(v) => write!(f, "{v}"),
            DataBox::Nan => f.write_str("nan"),
            DataBox::PosInf => f.write_str("inf"),
            DataBox::NegInf => f.write_str("-inf"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nan_equals_nan_for_bookkeeping() {
        assert_eq!(DataBox::Nan, DataBox::Nan);
    }

    #[test]
    fn distinct_variants_are_not_equal() {
        assert_ne!(DataBox::Signed64(1), DataBox::Unsigned64(1));
        assert_ne!(DataBox::PosInf, DataBox::NegInf);
    }

    #[test]
    fn display_matches_canonical_forms() {
        assert_eq!(DataBox::Signed64(-5).to_string(), "-5");
        assert_eq!(DataBox::PosInf.to_string(), "inf");
    }
}
