//! Fuzzes index and name writes against the bounds invariant.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_param_writes
#![no_main]
use escfw_params::ParameterStore;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut store = ParameterStore::new();
    for chunk in data.chunks_exact(5) {
        if let [index, a, b, c, d] = *chunk {
            let _ = store.set_by_index(index, f32::from_le_bytes([a, b, c, d]));
        }
    }

    if let Ok(name) = std::str::from_utf8(data) {
        let _ = store.set_by_name(name, 0.0);
    }

    assert!(store.iter().all(|p| p.min_value() <= p.value() && p.value() <= p.max_value()));
    let _ = (
        store.read_motor_params(),
        store.read_control_params(),
        store.read_pwm_params(),
        store.read_bus_params(),
    );
});
