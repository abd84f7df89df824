//! Storage-class header packing for [`super::DksString`].
//!
//! `DksClass` is a first-class sum type, not a byte to be read-and-masked.
//! Header width and field widths are *computed from the discriminant*;
//! there is no "peek one byte before the payload and mask two or three
//! bits" path anywhere in this crate's own code. [`DksClass::sniff`] below
//! exists only as an external-interoperability helper for callers that
//! only have the raw header bytes.
//!
//! # Header layout
//!
//! Each class has a *fixed* header width (`header_bytes`). The header is a
//! single big-endian unsigned integer of that width, split MSB-first into
//! three fields: `length` (high bits), `free` (middle bits), `type_tag`
//! (low `type_bits` bits). `length` and `free` evenly split whatever bits
//! remain after the type tag (the odd leftover bit, if any, goes to
//! `length`) — see DESIGN.md for why this split was chosen over the
//! alternatives a packed MSB-first header allows.

/// One of the six storage-class widths a [`super::DksString`] header can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DksClass {
    W8,
    W16,
    W24,
    W32,
    W40,
    W48,
}

impl DksClass {
    pub const ALL: [DksClass; 6] = [
        DksClass::W8,
        DksClass::W16,
        DksClass::W24,
        DksClass::W32,
        DksClass::W40,
        DksClass::W48,
    ];

    /// Header width in bytes for this storage class.
    #[inline]
    pub const fn header_bytes(self) -> usize {
        match self {
            DksClass::W8 => 1,
            DksClass::W16 => 2,
            DksClass::W24 => 3,
            DksClass::W32 => 4,
            DksClass::W40 => 5,
            DksClass::W48 => 6,
        }
    }

    /// Bits of the header's last byte spent on `type_tag` (Table T1's
    /// `HdrBits`: 2 for W8/W16, 3 for the rest).
    #[inline]
    pub const fn type_bits(self) -> u32 {
        match self {
            DksClass::W8 | DksClass::W16 => 2,
            _ => 3,
        }
    }

    /// The type tag value stored in the header's low `type_bits` bits.
    #[inline]
    pub const fn type_tag(self) -> u8 {
        match self {
            DksClass::W8 => 0,
            DksClass::W16 => 2,
            DksClass::W24 => 1,
            DksClass::W32 => 3,
            DksClass::W40 => 5,
            DksClass::W48 => 7,
        }
    }

    /// `2^(header_bytes*8) - 1`: Table T1's `FullMax` column — the largest
    /// value representable in this class's header width if the whole width
    /// were spent on one field with no type tag carved out.
    #[inline]
    pub const fn full_max(self) -> u64 {
        let bits = self.header_bytes() as u32 * 8;
        if bits >= 64 {
            u64::MAX
        } else {
            (1u64 << bits) - 1
        }
    }

    /// Bits left for `length` + `free` once `type_bits` is removed.
    #[inline]
    const fn shared_bits(self) -> u32 {
        self.header_bytes() as u32 * 8 - self.type_bits()
    }

    /// Bits allocated to the `free` field (the smaller half when the shared
    /// width is odd).
    #[inline]
    const fn free_bits(self) -> u32 {
        self.shared_bits() / 2
    }

    /// Bits allocated to the `length` field (gets the odd leftover bit).
    #[inline]
    const fn length_bits(self) -> u32 {
        self.shared_bits() - self.free_bits()
    }

    /// Maximum representable `length` for this class.
    #[inline]
    pub const fn max_length(self) -> u64 {
        (1u64 << self.length_bits()) - 1
    }

    /// Maximum representable `free` for this class.
    #[inline]
    pub const fn max_free(self) -> u64 {
        (1u64 << self.free_bits()) - 1
    }

    /// The next larger storage class, if any.
    #[inline]
    pub const fn promote(self) -> Option<DksClass> {
        match self {
            DksClass::W8 => Some(DksClass::W16),
            DksClass::W16 => Some(DksClass::W24),
            DksClass::W24 => Some(DksClass::W32),
            DksClass::W32 => Some(DksClass::W40),
            DksClass::W40 => Some(DksClass::W48),
            DksClass::W48 => None,
        }
    }

    /// Recovers a class from its `(type_bits, type_tag)` pair, as read from
    /// the low bits of a header's last byte. Provided only for
    /// interoperability with callers that only hold raw header bytes; this
    /// crate's own code never needs it since every [`super::DksString`]
    /// already carries its class as a field.
    pub fn sniff(last_header_byte: u8) -> Option<DksClass> {
        let determination_bit = last_header_byte & 1;
        let (type_bits, mask) = if determination_bit == 0 { (2u32, 0b11) } else { (3u32, 0b111) };
        let tag = last_header_byte & mask;
        DksClass::ALL
            .into_iter()
            .find(|c| c.type_bits() == type_bits && c.type_tag() == tag)
    }

    /// Packs `(length, free)` into this class's fixed-width big-endian
    /// header. Panics if either value exceeds this class's capacity
    /// (callers must have already selected a class via [`choose_class`]).
    pub fn encode(self, length: u64, free: u64) -> Vec<u8> {
        assert!(length <= self.max_length(), "length exceeds class capacity");
        assert!(free <= self.max_free(), "free exceeds class capacity");
        let packed: u64 = (length << (self.free_bits() + self.type_bits()))
            | (free << self.type_bits())
            | self.type_tag() as u64;
        let bytes = self.header_bytes();
        let full = packed.to_be_bytes();
        full[8 - bytes..].to_vec()
    }

    /// Unpacks `(length, free)` from a header byte slice of exactly
    /// `self.header_bytes()` bytes.
    pub fn decode(self, header: &[u8]) -> (u64, u64) {
        let bytes = self.header_bytes();
        debug_assert_eq!(header.len(), bytes);
        let mut full = [0u8; 8];
        full[8 - bytes..].copy_from_slice(header);
        let packed = u64::from_be_bytes(full);
        let type_mask = (1u64 << self.type_bits()) - 1;
        let free_mask = (1u64 << self.free_bits()) - 1;
        let free = (packed >> self.type_bits()) & free_mask;
        let length = packed >> (self.free_bits() + self.type_bits());
        let _ = type_mask; // documents which bits are the type tag
        (length, free)
    }
}

/// Picks the smallest class whose `max_length >= len` and `max_free >= free`.
/// Returns `None` if no class, not even `W48`, can hold the request.
pub fn choose_class(len: u64, free: u64) -> Option<DksClass> {
    DksClass::ALL
        .into_iter()
        .find(|c| c.max_length() >= len && c.max_free() >= free)
}
