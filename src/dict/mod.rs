//! The incrementally-rehashed hash index: the bucket capability
//! interface ([`slot`]), its sole concrete implementation ([`vec_slot`]),
//! and the index itself ([`multidict`]).

pub mod multidict;
pub mod slot;
pub mod vec_slot;

pub use multidict::{DictState, MultiDict};
pub use slot::{InsertOutcome, Slot};
pub use vec_slot::VecSlot;
