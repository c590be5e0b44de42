#![no_main]

use libfuzzer_sys::fuzz_target;
use lfukit::ds::FrequencyIndex;

// Fuzz arbitrary operation sequences on FrequencyIndex
//
// Tests random sequences of insert, increment, remove, peek_min, halve_all.
fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let mut index: FrequencyIndex<u8> = FrequencyIndex::new();

    let mut idx = 0;
    while idx + 2 < data.len() {
        let op = data[idx] % 6;
        let key = data[idx + 1] % 64;
        let count = u64::from(data[idx + 2]);
        idx += 3;

        match op {
            0 => {
                // insert
                index.insert(key, count);
                assert_eq!(index.count_of(&key), Some(count));
            },
            1 => {
                // increment
                let before = index.count_of(&key);
                let after = index.increment(&key);
                assert_eq!(after, before.map(|c| c.saturating_add(1)));
            },
            2 => {
                // remove
                let old_len = index.len();
                if index.remove(&key).is_some() {
                    assert_eq!(index.len(), old_len - 1);
                    assert!(!index.contains(&key));
                }
            },
            3 => {
                // peek_min is the smallest count
                if let Some((_, min)) = index.peek_min() {
                    assert!(index.iter().all(|(_, c)| c >= min));
                } else {
                    assert!(index.is_empty());
                }
            },
            4 => {
                // halve_all keeps the order
                let before: Vec<u8> = index.iter().map(|(k, _)| *k).collect();
                index.halve_all();
                let after: Vec<u8> = index.iter().map(|(k, _)| *k).collect();
                assert_eq!(before, after);
            },
            _ => {
                let _ = index.count_of(&key);
            },
        }

        index.debug_validate_invariants();
    }
});
