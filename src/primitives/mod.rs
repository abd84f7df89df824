//! Low-level primitives the rest of the crate builds on: decimal digit
//! scanning/formatting, population count, UTF-8 validation, and PRNGs.
//!
//! These are specified only by the contracts the higher-level modules rely
//! on (see each submodule's doc comment); none of them carry state beyond
//! what callers pass explicitly.

pub mod digits;
pub mod popcount;
pub mod prng;
pub mod utf8;

pub use digits::{
    i128_to_buf, i64_to_buf, is_digits, u128_to_buf, u64_from_buf_fast, u64_to_buf,
    u9_digits_to_buf, DigitParseError,
};
pub use popcount::popcount;
pub use utf8::{codepoint_len, count_bytes_for, decode, encode, len_utf8, sequence_len, valid, valid_count};
