#![no_main]

use gmo::{Catalog, LookupStrategy, StringTable};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Leading byte picks how much of the input is the lookup key.
    let Some((&split, rest)) = data.split_first() else {
        return;
    };
    let split = (split as usize).min(rest.len());
    let (key, bytes) = rest.split_at(split);

    let catalog = Catalog::new(bytes);
    let translated = catalog.find_translation(key);
    let scanned = catalog
        .with_strategy(LookupStrategy::Scan)
        .find_translation(key);
    let _ = (translated, scanned);

    let _ = catalog.metadata();
    let _ = catalog.revision();
    if let Ok(count) = catalog.string_count() {
        for index in 0..count.min(32) {
            let _ = catalog.string_at(StringTable::Original, index);
            let _ = catalog.string_at(StringTable::Translated, index);
        }
    }
    for entry in catalog.entries().take(32) {
        if entry.is_err() {
            break;
        }
    }
});
