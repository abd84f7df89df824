//! Segmented time-series container (`bbits`): `BbitsDodDod` (keys and
//! values both `dod`-coded) and `BbitsDodXof` (keys `dod`, values `xof`).
//!
//! Each segment is a 4 KiB codec buffer; a full container is a sequence
//! of segments plus the literal seeds (`keyT0/keyT1`, and `valT0/valT1`
//! for `DodDod`) each segment's decoder needs to restart delta-of-delta
//! decoding.

use super::dod::{DodReader, DodWriter};
use super::xof::{XofReader, XofWriter};
use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BbitsError {
    EmptyContainer,
    OutOfRange,
}

impl fmt::Display for BbitsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            BbitsError::EmptyContainer => "container is empty",
            BbitsError::OutOfRange => "offset is out of range",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for BbitsError {}

/// Welford's online mean/variance over a read's returned values.
/// `stddev` here is `sqrt(variance / count)`, not `sqrt(variance)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stats {
    pub mean: f64,
    pub variance: f64,
    pub stddev: f64,
}

fn welford_stats(values: &[f64]) -> Stats {
    let mut mean = 0.0f64;
    let mut m2 = 0.0f64;
    let mut n = 0u64;
    for &x in values {
        n += 1;
        let delta = x - mean;
        mean += delta / n as f64;
        let delta2 = x - mean;
        m2 += delta * delta2;
    }
    let variance = m2;
    let stddev = if n > 0 { (variance / n as f64).sqrt() } else { 0.0 };
    Stats { mean, variance, stddev }
}

struct FinishedDod {
    buf: Vec<u8>,
    count: usize,
    t0: i64,
    t1: i64,
}

fn roll_dod(w: DodWriter) -> FinishedDod {
    let count = w.count();
    let t0 = w.t0();
    let t1 = w.t1();
    let used_bytes = w.used_bits().div_ceil(8);
    let (buf, _) = w.finish();
    FinishedDod {
        buf: buf[..used_bytes].to_vec(),
        count,
        t0,
        t1,
    }
}

fn decode_dod_segment(seg: &FinishedDod) -> Vec<i64> {
    DodReader::new(&seg.buf, seg.count, seg.t0, seg.t1).collect()
}

/// Both key and value streams use the `dod` codec.
pub struct BbitsDodDod {
    finished: Vec<(FinishedDod, FinishedDod)>,
    current: Option<(DodWriter, DodWriter)>,
    elements: usize,
}

impl BbitsDodDod {
    pub fn new() -> Self {
        BbitsDodDod {
            finished: Vec::new(),
            current: None,
            elements: 0,
        }
    }

    pub fn elements(&self) -> usize {
        self.elements
    }

    pub fn segment_count(&self) -> usize {
        self.finished.len() + usize::from(self.current.is_some())
    }

    pub fn append(&mut self, key: i64, val: i64) {
        let needs_roll = match &self.current {
            None => true,
            Some((k, v)) => k.would_overflow() || v.would_overflow(),
        };
        if needs_roll {
            if let Some((k, v)) = self.current.take() {
                self.finished.push((roll_dod(k), roll_dod(v)));
            }
            self.current = Some((DodWriter::new(), DodWriter::new()));
        }
        let (k, v) = self.current.as_mut().unwrap();
        k.write(key).expect("segment was rolled to fit this write");
        v.write(val).expect("segment was rolled to fit this write");
        self.elements += 1;
    }

    fn decode_all(&self) -> (Vec<i64>, Vec<i64>) {
        let mut keys = Vec::with_capacity(self.elements);
        let mut vals = Vec::with_capacity(self.elements);
        for (k, v) in &self.finished {
            keys.extend(decode_dod_segment(k));
            vals.extend(decode_dod_segment(v));
        }
        if let Some((k, v)) = &self.current {
            keys.extend(DodReader::new(k.buf(), k.count(), 0, 0));
            vals.extend(DodReader::new(v.buf(), v.count(), 0, 0));
        }
        (keys, vals)
    }

    /// Reads `count` elements starting at `offset` (negative offsets count
    /// from the tail). Pass `with_stats = true` to also compute
    /// [`Stats`] over the returned values.
    pub fn get_offset_count(
        &self,
        offset: i64,
        count: i64,
        with_stats: bool,
    ) -> Result<(Vec<i64>, Vec<i64>, Option<Stats>), BbitsError> {
        if self.elements == 0 {
            return Err(BbitsError::EmptyContainer);
        }
        let off = if offset < 0 { self.elements as i64 + offset } else { offset };
        if off < 0 || off as usize >= self.elements {
            return Err(BbitsError::OutOfRange);
        }
        let off = off as usize;
        let want = if count < 0 || count as usize > self.elements {
            self.elements
        } else {
            count as usize
        };
        let take = want.min(self.elements - off);

        let (keys, vals) = self.decode_all();
        let keys = keys[off..off + take].to_vec();
        let vals = vals[off..off + take].to_vec();
        let stats = if with_stats {
            let as_f64: Vec<f64> = vals.iter().map(|&v| v as f64).collect();
            Some(welford_stats(&as_f64))
        } else {
            None
        };
        Ok((keys, vals, stats))
    }
}

impl Default for BbitsDodDod {
    fn default() -> Self {
        Self::new()
    }
}

fn roll_xof(w: XofWriter) -> Vec<u8> {
    let used_bytes = w.used_bits().div_ceil(8);
    let (buf, _) = w.finish();
    buf[..used_bytes].to_vec()
}

/// Keys use `dod`, values use `xof`.
pub struct BbitsDodXof {
    finished: Vec<(FinishedDod, Vec<u8>, usize)>,
    current: Option<(DodWriter, XofWriter)>,
    elements: usize,
}

impl BbitsDodXof {
    pub fn new() -> Self {
        BbitsDodXof {
            finished: Vec::new(),
            current: None,
            elements: 0,
        }
    }

    pub fn elements(&self) -> usize {
        self.elements
    }

    pub fn segment_count(&self) -> usize {
        self.finished.len() + usize::from(self.current.is_some())
    }

    pub fn append(&mut self, key: i64, val: f64) {
        let needs_roll = match &self.current {
            None => true,
            Some((k, v)) => k.would_overflow() || v.would_overflow(),
        };
        if needs_roll {
            if let Some((k, v)) = self.current.take() {
                let count = v.count();
                self.finished.push((roll_dod(k), roll_xof(v), count));
            }
            self.current = Some((DodWriter::new(), XofWriter::new()));
        }
        let (k, v) = self.current.as_mut().unwrap();
        k.write(key).expect("segment was rolled to fit this write");
        v.write(val).expect("segment was rolled to fit this write");
        self.elements += 1;
    }

    fn decode_all(&self) -> (Vec<i64>, Vec<f64>) {
        let mut keys = Vec::with_capacity(self.elements);
        let mut vals = Vec::with_capacity(self.elements);
        for (k, vbuf, vcount) in &self.finished {
            keys.extend(decode_dod_segment(k));
            vals.extend(XofReader::new(vbuf, *vcount));
        }
        if let Some((k, v)) = &self.current {
            keys.extend(DodReader::new(k.buf(), k.count(), 0, 0));
            vals.extend(XofReader::new(v.buf(), v.count()));
        }
        (keys, vals)
    }

    pub fn get_offset_count(
        &self,
        offset: i64,
        count: i64,
        with_stats: bool,
    ) -> Result<(Vec<i64>, Vec<f64>, Option<Stats>), BbitsError> {
        if self.elements == 0 {
            return Err(BbitsError::EmptyContainer);
        }
        let off = if offset < 0 { self.elements as i64 + offset } else { offset };
        if off < 0 || off as usize >= self.elements {
            return Err(BbitsError::OutOfRange);
        }
        let off = off as usize;
        let want = if count < 0 || count as usize > self.elements {
            self.elements
        } else {
            count as usize
        };
        let take = want.min(self.elements - off);

        let (keys, vals) = self.decode_all();
        let keys = keys[off..off + take].to_vec();
        let vals = vals[off..off + take].to_vec();
        let stats = if with_stats { Some(welford_stats(&vals)) } else { None };
        Ok((keys, vals, stats))
    }
}

impl Default for BbitsDodXof {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_s4_dod_dod_round_trip_and_multi_segment() {
        let mut c = BbitsDodDod::new();
        for i in 0..5000i64 {
            c.append(i * 1000, i * 2);
        }
        assert!(c.segment_count() > 1);
        let (keys, vals, _) = c.get_offset_count(0, -1, false).unwrap();
        assert_eq!(keys.len(), 5000);
        for i in 0..5000i64 {
            assert_eq!(keys[i as usize], i * 1000);
            assert_eq!(vals[i as usize], i * 2);
        }
    }

    #[test]
    fn negative_offset_reads_from_tail() {
        let mut c = BbitsDodDod::new();
        for i in 0..100i64 {
            c.append(i, i * i);
        }
        let (keys, vals, _) = c.get_offset_count(-10, 10, false).unwrap();
        assert_eq!(keys, (90..100).collect::<Vec<i64>>());
        assert_eq!(vals, (90..100).map(|i| i * i).collect::<Vec<i64>>());
    }

    #[test]
    fn empty_container_rejects_reads() {
        let c = BbitsDodDod::new();
        assert_eq!(c.get_offset_count(0, 1, false), Err(BbitsError::EmptyContainer));
    }

    #[test]
    fn offset_beyond_tail_is_out_of_range() {
        let mut c = BbitsDodDod::new();
        c.append(1, 1);
        assert_eq!(c.get_offset_count(5, 1, false), Err(BbitsError::OutOfRange));
        assert_eq!(c.get_offset_count(-5, 1, false), Err(BbitsError::OutOfRange));
    }

    #[test]
    fn scenario_s5_xof_container_statistics() {
        let mut c = BbitsDodXof::new();
        let n = 5000i64;
        let mut expected_sum = 0.0f64;
        for i in 0..n {
            let v = i as f64 * 0.123 + 42.0;
            expected_sum += v;
            c.append(i * 100, v);
        }
        let (keys, vals, stats) = c.get_offset_count(0, -1, true).unwrap();
        assert_eq!(keys.len(), n as usize);
        let expected_mean = expected_sum / n as f64;
        let stats = stats.unwrap();
        assert!((stats.mean - expected_mean).abs() < 1e-6);
        assert_eq!(vals.len(), n as usize);
    }
}
