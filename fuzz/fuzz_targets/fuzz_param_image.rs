//! Fuzzes parameter image decoding and the persisted-load fallback.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_param_image
#![no_main]
use escfw_params::{IMAGE_LEN, MemoryFlash, ParameterStore, StoreConfig};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes may be rejected but must never panic or yield an
    // out-of-bounds value.
    if let Ok(store) = ParameterStore::from_image(data) {
        assert_eq!(data.len(), IMAGE_LEN);
        assert!(store.iter().all(|p| p.accepts(p.value())));
        assert_eq!(store.encode().as_slice(), data);
    }

    let mut cells = data.to_vec();
    cells.resize(2048, 0xFF);
    if let Ok(mut flash) = MemoryFlash::from_bytes(cells) {
        let store = ParameterStore::load(&mut flash, &StoreConfig::default());
        assert!(store.iter().all(|p| p.accepts(p.value())));
    }
});
