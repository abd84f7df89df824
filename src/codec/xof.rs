//! XOR-of-floats codec (`xof`), Gorilla framing.
//!
//! The first value is stored raw; every later value is XORed against the
//! previous value's bit pattern, and the nonzero XOR result is framed
//! with a leading/trailing-zero window that is reused across consecutive
//! writes when it still covers the new value.

use super::bitio::{BitReader, BitWriter, SEGMENT_BITS};

/// Worst-case bits a single `xof` element can consume: control(1) +
/// mode(1) + leading-zero-count(5) + meaningful-bit-count(6) + value(64)
/// = 77, with one bit of slack folded into the chosen 78-bit guard.
pub const OVERFLOW_GUARD_BITS: usize = crate::config::XOF_OVERFLOW_GUARD_BITS;

const LEADING_ZERO_SENTINEL: i32 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XofError {
    SegmentFull,
}

pub struct XofWriter {
    w: BitWriter,
    count: usize,
    prev_bits: u64,
    cur_leading_zeros: i32,
    cur_trailing_zeros: i32,
}

impl XofWriter {
    pub fn new() -> Self {
        XofWriter {
            w: BitWriter::new(),
            count: 0,
            prev_bits: 0,
            cur_leading_zeros: LEADING_ZERO_SENTINEL,
            cur_trailing_zeros: LEADING_ZERO_SENTINEL,
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn would_overflow(&self) -> bool {
        self.w.used_bits + OVERFLOW_GUARD_BITS > SEGMENT_BITS
    }

    pub fn used_bits(&self) -> usize {
        self.w.used_bits
    }

    pub fn finish(self) -> (Box<[u8; super::bitio::SEGMENT_BYTES]>, usize) {
        (self.w.buf, self.w.used_bits)
    }

    /// Borrows the in-progress buffer without consuming the writer, so a
    /// still-open segment can be decoded for reads (`bbits`).
    pub fn buf(&self) -> &[u8] {
        self.w.buf.as_slice()
    }

    pub fn write(&mut self, v: f64) -> Result<(), XofError> {
        if self.would_overflow() {
            return Err(XofError::SegmentFull);
        }
        let bits = v.to_bits();
        if self.count == 0 {
            self.w.write_bits(bits, 64);
        } else {
            let x = bits ^ self.prev_bits;
            if x == 0 {
                self.w.write_bit(0);
            } else {
                self.w.write_bit(1);
                let leading = x.leading_zeros().min(31);
                let trailing = x.trailing_zeros();
                let reuse_window = self.cur_leading_zeros != LEADING_ZERO_SENTINEL
                    && leading as i32 >= self.cur_leading_zeros
                    && trailing as i32 >= self.cur_trailing_zeros;
                if reuse_window {
                    self.w.write_bit(0);
                    let lz = self.cur_leading_zeros as u32;
                    let tz = self.cur_trailing_zeros as u32;
                    let meaningful = 64 - lz - tz;
                    self.w.write_bits(x >> tz, meaningful);
                } else {
                    self.w.write_bit(1);
                    self.w.write_bits(leading as u64, 5);
                    let meaningful = 64 - leading - trailing;
                    self.w.write_bits((meaningful - 1) as u64, 6);
                    self.w.write_bits(x >> trailing, meaningful);
                    self.cur_leading_zeros = leading as i32;
                    self.cur_trailing_zeros = trailing as i32;
                }
            }
        }
        self.prev_bits = bits;
        self.count += 1;
        Ok(())
    }
}

impl Default for XofWriter {
    fn default() -> Self {
        Self::new()
    }
}

pub struct XofReader<'a> {
    r: BitReader<'a>,
    index: usize,
    count: usize,
    prev_bits: u64,
    cur_leading_zeros: u32,
    cur_trailing_zeros: u32,
}

impl<'a> XofReader<'a> {
    pub fn new(buf: &'a [u8], count: usize) -> Self {
        XofReader {
            r: BitReader::new(buf),
            index: 0,
            count,
            prev_bits: 0,
            cur_leading_zeros: 0,
            cur_trailing_zeros: 0,
        }
    }
}

impl Iterator for XofReader<'_> {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.index >= self.count {
            return None;
        }
        let bits = if self.index == 0 {
            self.r.read_bits(64)
        } else if self.r.read_bit() == 0 {
            self.prev_bits
        } else {
            let mode = self.r.read_bit();
            if mode == 1 {
                let leading = self.r.read_bits(5) as u32;
                let meaningful = self.r.read_bits(6) as u32 + 1;
                let trailing = 64 - leading - meaningful;
                self.cur_leading_zeros = leading;
                self.cur_trailing_zeros = trailing;
                let value_bits = self.r.read_bits(meaningful);
                self.prev_bits ^ (value_bits << trailing)
            } else {
                let meaningful = 64 - self.cur_leading_zeros - self.cur_trailing_zeros;
                let value_bits = self.r.read_bits(meaningful);
                self.prev_bits ^ (value_bits << self.cur_trailing_zeros)
            }
        };
        self.prev_bits = bits;
        self.index += 1;
        Some(f64::from_bits(bits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(values: &[f64]) -> Vec<f64> {
        let mut w = XofWriter::new();
        for &v in values {
            w.write(v).unwrap();
        }
        let count = w.count();
        let (buf, _used) = w.finish();
        XofReader::new(buf.as_slice(), count).collect()
    }

    #[test]
    fn round_trips_smooth_series() {
        let values: Vec<f64> = (0..2000).map(|i| i as f64 * 0.123 + 42.0).collect();
        assert_eq!(round_trip(&values), values);
    }

    #[test]
    fn round_trips_repeated_values() {
        let values = vec![1.5, 1.5, 1.5, 2.25, 2.25, -3.0, -3.0, 0.0];
        assert_eq!(round_trip(&values), values);
    }

    #[test]
    fn round_trips_wild_swings_and_specials() {
        let values = vec![
            0.0,
            -0.0,
            f64::MIN_POSITIVE,
            f64::MAX,
            -f64::MAX,
            1.0,
            1e300,
            1e-300,
        ];
        let got = round_trip(&values);
        for (a, b) in values.iter().zip(got.iter()) {
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }

    #[test]
    fn round_trips_single_value() {
        assert_eq!(round_trip(&[3.14159]), vec![3.14159]);
        assert_eq!(round_trip(&[] as &[f64]), Vec::<f64>::new());
    }

    #[test]
    fn overflow_guard_rejects_near_segment_end() {
        let mut w = XofWriter::new();
        w.w.used_bits = SEGMENT_BITS - OVERFLOW_GUARD_BITS + 1;
        assert_eq!(w.write(1.0), Err(XofError::SegmentFull));
    }
}
