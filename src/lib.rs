//! `datakit-core` — a size-classed packed-header string buffer, bit-packed
//! time-series codecs, a byte-exact reliable numeric scanner, and an
//! incrementally-rehashed two-table hash index.
//!
//! Module layout:
//!
//! | Module | Covers |
//! |--------|----------|
//! | [`primitives`] | digit scan/format, popcount, UTF-8, PRNGs |
//! | [`xfloat`] | extended-float shim (int/double comparisons, `pow10`) |
//! | [`databox`] | the tagged value every other module produces/consumes |
//! | [`dks`] | the `DKS` mutable byte string |
//! | [`scan`] | `scan_reliable` / `scan_reliable_128` |
//! | [`codec`] | `dod`/`xof` codecs and the `bbits` segmented container |
//! | [`dict`] | the `multidict` hash index and its slot interface |
//! | [`config`] | compile-time tunables |

pub mod codec;
pub mod config;
pub mod databox;
pub mod dict;
pub mod dks;
pub mod primitives;
pub mod scan;
pub mod xfloat;

pub use databox::DataBox;
pub use dks::DksString;
pub use scan::{canonical_format, scan_reliable, scan_reliable_128, ScanError};
