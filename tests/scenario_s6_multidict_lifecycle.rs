//! S6: a `MultiDict<VecSlot<u64>, u64>` carries 10,000 inserts through a
//! full incremental rehash, survives interleaved lookups, and a `scan`
//! after deletions visits exactly the surviving keys.

use datakit_core::dict::{DictState, MultiDict, VecSlot};
use std::collections::HashSet;

#[test]
fn lifecycle_through_rehash_delete_and_scan() {
    let mut d: MultiDict<VecSlot<u64>, u64> = MultiDict::new(7, false);

    for i in 0..10_000u64 {
        d.add(i.to_le_bytes().to_vec(), i);
    }
    assert_eq!(d.count(), 10_000);

    d.resize();
    assert_eq!(d.state(), DictState::Rehashing);

    let mut rng_state = 999u64;
    while d.state() == DictState::Rehashing {
        d.rehash(1);
        // `splitmix64` advances a persistent seed so each probe during
        // rehashing targets a different already-inserted key.
        rng_state = rng_state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let probe = rng_state % 10_000;
        assert_eq!(d.find(&probe.to_le_bytes()), Some(&probe));
    }
    assert_eq!(d.state(), DictState::Steady);
    assert_eq!(d.count(), 10_000);

    let mut survivors: HashSet<u64> = (0..10_000u64).collect();
    for i in 0..5_000u64 {
        assert!(d.delete(&i.to_le_bytes()));
        survivors.remove(&i);
    }
    assert_eq!(d.count(), 5_000);

    let mut seen = HashSet::new();
    let mut cursor = 0u64;
    loop {
        cursor = d.scan(cursor, &mut |key, value| {
            let k = u64::from_le_bytes(key.try_into().unwrap());
            assert_eq!(k, *value);
            seen.insert(k);
        });
        if cursor == 0 {
            break;
        }
    }
    assert_eq!(seen, survivors);
}

#[test]
fn case_insensitive_lookup_ignores_ascii_case() {
    let mut d: MultiDict<VecSlot<i32>, i32> = MultiDict::new(0, true);
    d.add(b"Hello".to_vec(), 1);
    assert_eq!(d.find(b"hello"), Some(&1));
    assert_eq!(d.find(b"HELLO"), Some(&1));
}
