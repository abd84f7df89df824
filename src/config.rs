// config.rs — Compile-time configuration constants.
//
// Every magic number lives here, with a comment naming where it's used,
// rather than inline at each call site.

// DKS storage-class header widths, in bytes (Table T1).
// See `dks::header::DksClass::header_bytes`.
pub const DKS_HEADER_BYTES: [usize; 6] = [1, 2, 3, 4, 5, 6];

// Codec segment quantum: 4096 bytes per `dod`/`xof` buffer.
// See `codec::bitio::SEGMENT_BYTES`.
pub const CODEC_SEGMENT_BYTES: usize = 4096;

// Worst-case bits a single `dod` element can consume before a segment
// must roll. Source specifies 72; see `codec::dod::OVERFLOW_GUARD_BITS`.
pub const DOD_OVERFLOW_GUARD_BITS: usize = 72;

// Worst-case bits a single `xof` element can consume. Source specifies
// 78 (an intentionally generous margin over the 75-bit Gorilla worst
// case); see `codec::xof::OVERFLOW_GUARD_BITS`.
pub const XOF_OVERFLOW_GUARD_BITS: usize = 78;

// `multidict` hash seed range: [0, 2^20).
pub const DICT_SEED_MAX: u64 = 1 << 20;

// `multidict` rehash step bound: each mutating operation performs one
// bounded rehash step, scanning at most `5 * n` empty buckets before
// yielding (n = buckets requested per step).
pub const DICT_REHASH_EMPTY_SCAN_MULTIPLIER: usize = 5;

// Initial bucket count for a freshly created `multidict` table.
pub const DICT_INITIAL_TABLE_SIZE: usize = 4;
