//! `MultiDict<S, V>` — the incrementally-rehashed, two-table hash index.
//! Keys are always byte strings; `S` is the bucket backing store (see
//! [`super::slot::Slot`]).

use super::slot::{InsertOutcome, Slot};
use crate::primitives::prng::{splitmix64, xxh64};

const INITIAL_SIZE: usize = crate::config::DICT_INITIAL_TABLE_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DictState {
    Steady,
    Rehashing,
}

struct Table<S> {
    buckets: Vec<Option<S>>,
    size: usize,
    count: usize,
}

impl<S> Table<S> {
    fn empty() -> Self {
        Table {
            buckets: Vec::new(),
            size: 0,
            count: 0,
        }
    }

    fn with_size(size: usize) -> Self {
        let mut buckets = Vec::with_capacity(size);
        buckets.resize_with(size, || None);
        Table {
            buckets,
            size,
            count: 0,
        }
    }
}

fn djb2_case_insensitive(key: &[u8]) -> u64 {
    let mut h: u64 = 5381;
    for &b in key {
        h = h.wrapping_mul(33).wrapping_add(b.to_ascii_lowercase() as u64);
    }
    h
}

fn mix64(x: u64) -> u64 {
    let mut z = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// An incrementally-rehashed hash index over byte-string keys.
///
/// Seed must be in `[0, 2^20)`.
pub struct MultiDict<S: Slot<V>, V> {
    ht: [Table<S>; 2],
    state: DictState,
    rehash_cursor: usize,
    seed: u64,
    case_insensitive: bool,
    count: usize,
    used_bytes: i64,
    iterators: u32,
    rng_state: u64,
    /// Bumped on every structural mutation; substitutes for "table
    /// pointer identity" in the fingerprint, since Rust's allocator
    /// doesn't expose stable addresses the way the source's raw
    /// `dictEntry*` tables did (documented in DESIGN.md).
    generation: u64,
}

impl<S: Slot<V>, V> MultiDict<S, V> {
    pub fn new(seed: u64, case_insensitive: bool) -> Self {
        assert!(seed < crate::config::DICT_SEED_MAX, "seed must be in [0, 2^20)");
        MultiDict {
            ht: [Table::empty(), Table::empty()],
            state: DictState::Steady,
            rehash_cursor: 0,
            seed,
            case_insensitive,
            count: 0,
            used_bytes: 0,
            iterators: 0,
            rng_state: seed ^ 0x5DEE_CE10,
            generation: 0,
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn used_bytes(&self) -> i64 {
        self.used_bytes
    }

    pub fn state(&self) -> DictState {
        self.state
    }

    pub fn rehash_cursor(&self) -> usize {
        self.rehash_cursor
    }

    fn hash(&self, key: &[u8]) -> u64 {
        if self.case_insensitive {
            djb2_case_insensitive(key)
        } else {
            xxh64(key, self.seed)
        }
    }

    fn bucket_index(&self, table: usize, key: &[u8]) -> usize {
        let size = self.ht[table].size;
        debug_assert!(size > 0);
        (self.hash(key) & (size as u64 - 1)) as usize
    }

    fn ensure_ht0(&mut self) {
        if self.ht[0].size == 0 {
            self.ht[0] = Table::with_size(INITIAL_SIZE);
        }
    }

    /// `expand(n)` — §4.H.3.
    pub fn expand(&mut self, n: usize) {
        let new_size = n.max(1).next_power_of_two();
        if self.ht[0].size == 0 {
            self.ht[0] = Table::with_size(new_size);
            self.generation = self.generation.wrapping_add(1);
            return;
        }
        if new_size == self.ht[0].size {
            return;
        }
        self.ht[1] = Table::with_size(new_size);
        self.rehash_cursor = 0;
        self.state = DictState::Rehashing;
        self.generation = self.generation.wrapping_add(1);
    }

    /// Convenience wrapper: expands to fit the current element count.
    pub fn resize(&mut self) {
        self.expand(self.count.max(1));
    }

    fn maybe_rehash_step(&mut self) {
        if self.state == DictState::Rehashing && self.iterators == 0 {
            self.rehash(1);
        }
    }

    /// Bounded rehash step — §4.H.4. Migrates up to `n` non-empty
    /// buckets, bounded by `5*n` empty-bucket scans before yielding.
    pub fn rehash(&mut self, n: usize) {
        if self.state != DictState::Rehashing {
            return;
        }
        let mut empties_seen = 0usize;
        let mut buckets_migrated = 0usize;

        while buckets_migrated < n && self.ht[0].count > 0 {
            while self.rehash_cursor < self.ht[0].size
                && self.ht[0].buckets[self.rehash_cursor].is_none()
            {
                self.rehash_cursor += 1;
                empties_seen += 1;
                if empties_seen >= crate::config::DICT_REHASH_EMPTY_SCAN_MULTIPLIER * n {
                    return;
                }
            }
            if self.rehash_cursor >= self.ht[0].size {
                break;
            }

            let cursor = self.rehash_cursor;
            let m1 = self.ht[1].size as u64 - 1;
            loop {
                let Some(key) = self.ht[0].buckets[cursor].as_ref().unwrap().last_key() else {
                    break;
                };
                let target = (self.hash(&key) & m1) as usize;
                let whole_slot_move = self.ht[0].buckets[cursor].as_ref().unwrap().count() == 1
                    && self.ht[1].buckets[target].is_none();
                if whole_slot_move {
                    self.ht[1].buckets[target] = self.ht[0].buckets[cursor].take();
                    self.ht[0].count -= 1;
                    self.ht[1].count += 1;
                    break;
                }
                if self.ht[1].buckets[target].is_none() {
                    self.ht[1].buckets[target] = Some(S::default());
                }
                // `ht[0]` and `ht[1]` are distinct array elements, but
                // borrowing both `buckets[cursor]` and `buckets[target]`
                // mutably at once still needs help from the borrow
                // checker: pull the source slot out by value so the two
                // `&mut` borrows never overlap.
                let src_slot = self.ht[0].buckets[cursor].as_mut().unwrap();
                let mut taken_src = std::mem::replace(src_slot, S::default());
                let dst_slot = self.ht[1].buckets[target].as_mut().unwrap();
                S::migrate_last(dst_slot, &mut taken_src);
                *self.ht[0].buckets[cursor].as_mut().unwrap() = taken_src;
                self.ht[0].count -= 1;
                self.ht[1].count += 1;
            }

            if let Some(slot) = &self.ht[0].buckets[cursor] {
                if slot.count() == 0 {
                    self.ht[0].buckets[cursor] = None;
                }
            }
            self.rehash_cursor += 1;
            buckets_migrated += 1;
        }

        if self.ht[0].count == 0 {
            self.ht[0] = std::mem::replace(&mut self.ht[1], Table::empty());
            self.rehash_cursor = 0;
            self.state = DictState::Steady;
        }
        self.generation = self.generation.wrapping_add(1);
    }

    /// `find(key)` — §4.H.5.
    pub fn find(&self, key: &[u8]) -> Option<&V> {
        if self.state == DictState::Rehashing {
            let idx1 = self.bucket_index(1, key);
            if let Some(v) = self.ht[1].buckets[idx1]
                .as_ref()
                .and_then(|s| s.find_value_by_key(key))
            {
                return Some(v);
            }
        }
        let idx0 = self.bucket_index(0, key);
        self.ht[0].buckets[idx0].as_ref().and_then(|s| s.find_value_by_key(key))
    }

    /// `add(key, value)` — §4.H.5.
    pub fn add(&mut self, key: Vec<u8>, value: V) {
        self.ensure_ht0();
        self.maybe_rehash_step();
        let table = if self.state == DictState::Rehashing { 1 } else { 0 };
        let idx = self.bucket_index(table, &key);
        if self.ht[table].buckets[idx].is_none() {
            self.ht[table].buckets[idx] = Some(S::default());
        }
        let slot = self.ht[table].buckets[idx].as_mut().unwrap();
        let before = slot.size_bytes() as i64;
        let outcome = slot.insert_by_type(key, value);
        let after = slot.size_bytes() as i64;
        self.used_bytes += after - before;
        if outcome == InsertOutcome::Inserted {
            self.ht[table].count += 1;
            self.count += 1;
        }
        self.generation = self.generation.wrapping_add(1);
    }

    /// `delete(key)` — §4.H.5.
    pub fn delete(&mut self, key: &[u8]) -> bool {
        self.maybe_rehash_step();
        let mut removed = false;
        if self.state == DictState::Rehashing {
            let idx1 = self.bucket_index(1, key);
            if let Some(slot) = self.ht[1].buckets[idx1].as_mut() {
                if slot.remove_entry(key) {
                    self.ht[1].count -= 1;
                    removed = true;
                }
            }
        }
        if !removed && self.ht[0].size > 0 {
            let idx0 = self.bucket_index(0, key);
            if let Some(slot) = self.ht[0].buckets[idx0].as_mut() {
                if slot.remove_entry(key) {
                    self.ht[0].count -= 1;
                    removed = true;
                }
            }
        }
        if removed {
            self.count -= 1;
            self.generation = self.generation.wrapping_add(1);
        }
        removed
    }

    fn next_rng(&mut self) -> u64 {
        splitmix64(&mut self.rng_state)
    }

    /// `get_random_key` — §4.H.5.
    pub fn get_random_key(&mut self) -> Option<Vec<u8>> {
        if self.count == 0 {
            return None;
        }
        match self.state {
            DictState::Steady => {
                let size = self.ht[0].size;
                let start = (self.next_rng() as usize) % size;
                (0..size).find_map(|off| {
                    let idx = (start + off) % size;
                    self.ht[0].buckets[idx].as_ref().filter(|s| s.count() > 0).and_then(|s| s.last_key())
                })
            }
            DictState::Rehashing => {
                let total = self.ht[0].size + self.ht[1].size;
                let start = (self.next_rng() as usize) % total;
                (0..total).find_map(|off| {
                    let idx = (start + off) % total;
                    if idx < self.ht[0].size {
                        if idx < self.rehash_cursor {
                            return None;
                        }
                        self.ht[0].buckets[idx].as_ref().filter(|s| s.count() > 0).and_then(|s| s.last_key())
                    } else {
                        let idx1 = idx - self.ht[0].size;
                        self.ht[1].buckets[idx1].as_ref().filter(|s| s.count() > 0).and_then(|s| s.last_key())
                    }
                })
            }
        }
    }

    /// `scan(v)` — §4.H.6. Bit-reversed-increment cursor; `0` means the
    /// scan is complete. Every key present throughout the scan is
    /// returned at least once (possibly more).
    pub fn scan(&self, v: u64, f: &mut dyn FnMut(&[u8], &V)) -> u64 {
        if self.count == 0 {
            return 0;
        }
        match self.state {
            DictState::Steady => {
                let m0 = self.ht[0].size as u64 - 1;
                if let Some(slot) = &self.ht[0].buckets[(v & m0) as usize] {
                    slot.iterate_all(f);
                }
                let mut vv = v | !m0;
                vv = vv.reverse_bits().wrapping_add(1).reverse_bits();
                vv
            }
            DictState::Rehashing => {
                let (t0, t1) = if self.ht[0].size <= self.ht[1].size { (0, 1) } else { (1, 0) };
                let m0 = self.ht[t0].size as u64 - 1;
                let m1 = self.ht[t1].size as u64 - 1;
                if let Some(slot) = &self.ht[t0].buckets[(v & m0) as usize] {
                    slot.iterate_all(f);
                }
                let mut vv = v;
                loop {
                    if let Some(slot) = &self.ht[t1].buckets[(vv & m1) as usize] {
                        slot.iterate_all(f);
                    }
                    vv |= !m1;
                    vv = vv.reverse_bits().wrapping_add(1).reverse_bits();
                    if vv & (m0 ^ m1) == 0 {
                        break;
                    }
                }
                vv |= !m0;
                vv.reverse_bits().wrapping_add(1).reverse_bits()
            }
        }
    }

    /// Fingerprint for an unsafe iterator's before/after snapshot —
    /// §4.H.7.
    pub fn fingerprint(&self) -> u64 {
        [
            self.ht[0].size as u64,
            self.ht[0].count as u64,
            self.ht[1].size as u64,
            self.ht[1].count as u64,
            self.generation,
        ]
        .into_iter()
        .fold(0u64, |acc, x| mix64(acc ^ x))
    }

    /// Marks a safe iterator as outstanding, suppressing rehash steps in
    /// mutating operations until [`Self::end_safe_iter`] is called.
    pub fn begin_safe_iter(&mut self) {
        self.iterators += 1;
    }

    pub fn end_safe_iter(&mut self) {
        self.iterators -= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dict::vec_slot::VecSlot;

    type Dict = MultiDict<VecSlot<i64>, i64>;

    #[test]
    fn add_find_delete_round_trip() {
        let mut d: Dict = MultiDict::new(7, false);
        d.add(b"a".to_vec(), 1);
        d.add(b"b".to_vec(), 2);
        assert_eq!(d.count(), 2);
        assert_eq!(d.find(b"a"), Some(&1));
        assert!(d.delete(b"a"));
        assert_eq!(d.find(b"a"), None);
        assert_eq!(d.count(), 1);
    }

    #[test]
    fn case_insensitive_dict_matches_regardless_of_case() {
        let mut d: Dict = MultiDict::new(0, true);
        d.add(b"Hello".to_vec(), 1);
        assert_eq!(d.find(b"hello"), Some(&1));
        assert_eq!(d.find(b"HELLO"), Some(&1));
    }

    #[test]
    fn scenario_s6_multidict_lifecycle() {
        let mut d: Dict = MultiDict::new(123, false);
        for i in 0..10_000i64 {
            d.add(format!("key-{i}").into_bytes(), i);
        }
        assert_eq!(d.count(), 10_000);

        d.resize();
        // Drive rehashing to completion while interleaving finds.
        let mut rng_state = 999u64;
        while d.state() == DictState::Rehashing {
            let probe = splitmix64(&mut rng_state);
            let i = (probe % 10_000) as i64;
            assert_eq!(d.find(format!("key-{i}").as_bytes()), Some(&i));
            d.rehash(4);
        }

        for i in 0..5_000i64 {
            assert!(d.delete(format!("key-{i}").as_bytes()));
        }
        assert_eq!(d.count(), 5_000);

        let mut seen = std::collections::HashSet::new();
        let mut cursor = 0u64;
        loop {
            cursor = d.scan(cursor, &mut |k, _v| {
                seen.insert(k.to_vec());
            });
            if cursor == 0 {
                break;
            }
        }
        for i in 5_000..10_000i64 {
            assert!(seen.contains(format!("key-{i}").as_bytes()), "key-{i} missing from scan");
        }
    }

    #[test]
    fn fingerprint_changes_on_mutation() {
        let mut d: Dict = MultiDict::new(1, false);
        d.add(b"x".to_vec(), 1);
        let fp1 = d.fingerprint();
        d.add(b"y".to_vec(), 2);
        let fp2 = d.fingerprint();
        assert_ne!(fp1, fp2);
    }

    #[test]
    fn get_random_key_returns_an_inserted_key() {
        let mut d: Dict = MultiDict::new(9, false);
        for i in 0..50i64 {
            d.add(format!("k{i}").into_bytes(), i);
        }
        let k = d.get_random_key().unwrap();
        let s = String::from_utf8(k).unwrap();
        assert!(s.starts_with('k'));
    }
}
