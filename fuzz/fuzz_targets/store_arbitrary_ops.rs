#![no_main]

use std::sync::Arc;

use libfuzzer_sys::fuzz_target;
use lfukit::builder::StoreBuilder;
use lfukit::config::DeleteMode;
use lfukit::diagnostics::NoopSink;
use lfukit::error::CacheError;

// Fuzz arbitrary operation sequences on LfuStore
//
// The first two bytes pick capacity, decay border and delete mode; the rest
// is decoded as (op, key) pairs.
fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let max_size = usize::from(data[0] % 16) + 1;
    let decay_border = u64::from(data[1] % 64);
    let delete_mode = if data[1] & 0x80 == 0 {
        DeleteMode::Lazy
    } else {
        DeleteMode::Strict
    };

    let store = match StoreBuilder::new()
        .max_size(max_size)
        .decay_border(decay_border)
        .delete_mode(delete_mode)
        .try_build_with_sink::<u8, u32>(Arc::new(NoopSink))
    {
        Ok(store) => store,
        Err(_) => return,
    };

    let mut idx = 2;
    let mut step = 0u32;
    while idx + 1 < data.len() {
        let op = data[idx] % 6;
        let key = data[idx + 1] % 32;
        idx += 2;
        step += 1;

        match op {
            0 | 1 => {
                // write
                store.write(key, step);
                assert!(store.contains(&key));
                assert_eq!(*store.read(&key).unwrap(), step);
            },
            2 => {
                // read
                match store.read(&key) {
                    Ok(_) => assert!(store.contains(&key)),
                    Err(err) => {
                        assert_eq!(err, CacheError::KeyNotFound);
                        assert!(!store.contains(&key));
                    },
                }
            },
            3 => {
                // delete
                store.delete(&key);
                assert!(!store.contains(&key));
                if delete_mode == DeleteMode::Strict {
                    assert_eq!(store.frequency(&key), None);
                }
            },
            4 => {
                // items
                match store.items() {
                    Ok(items) => assert_eq!(items.len(), store.len()),
                    Err(err) => {
                        assert_eq!(err, CacheError::EmptyCache);
                        assert!(store.is_empty());
                    },
                }
            },
            _ => {
                // read_with
                let _ = store.read_with(&key, |value| *value);
            },
        }

        assert!(store.len() <= max_size);
        assert!(store.tracked_len() >= store.len());
        if delete_mode == DeleteMode::Strict {
            assert_eq!(store.tracked_len(), store.len());
        }
    }
});
