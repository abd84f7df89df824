//! Byte-buffer population count.

/// Returns the number of set bits across `buf`.
///
/// Delegates to `u64::count_ones` over 8-byte words (a SWAR-style fast
/// path) with a scalar byte-at-a-time tail for the remainder.
#[inline]
pub fn popcount(buf: &[u8]) -> u64 {
    let mut total = 0u64;
    let mut chunks = buf.chunks_exact(8);
    for word in &mut chunks {
        let w = u64::from_ne_bytes(word.try_into().unwrap());
        total += w.count_ones() as u64;
    }
    for &b in chunks.remainder() {
        total += b.count_ones() as u64;
    }
    total
}

#[cfg(test)]
pub fn popcount_scalar(buf: &[u8]) -> u64 {
    buf.iter().map(|b| b.count_ones() as u64).sum()
}
