//! Bit-packed time-series codecs and the segmented container built on top
//! of them: delta-of-delta ([`dod`]), XOR-of-floats ([`xof`]), and
//! [`bbits`]'s `BbitsDodDod` / `BbitsDodXof` containers.

mod bitio;
pub mod bbits;
pub mod dod;
pub mod xof;

pub use bbits::{BbitsDodDod, BbitsDodXof, BbitsError, Stats};
pub use dod::{DodError, DodReader, DodWriter};
pub use xof::{XofError, XofReader, XofWriter};
