//! Property-based tests for parameter registry invariants.

#![cfg(test)]

use escfw_params::prelude::*;
use proptest::prelude::*;

fn in_bounds_value(index: u8, t: f32) -> f32 {
    let param = ParamId::from_index(index).unwrap_or(ParamId::MotorKv).compiled();
    let (min, max) = (param.min_value(), param.max_value());
    (min + (max - min) * t).clamp(min, max)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_values_stay_within_bounds(
        writes in proptest::collection::vec((0u8..30, -50_000.0f32..50_000.0), 0..64),
    ) {
        let mut store = ParameterStore::new();
        let mut accepted = 0usize;
        for (index, value) in &writes {
            if store.set_by_index(*index, *value).is_ok() {
                accepted += 1;
            }
        }
        prop_assert!(accepted <= writes.len());
        for param in store.iter() {
            prop_assert!(
                param.min_value() <= param.value() && param.value() <= param.max_value(),
                "{} = {} escaped [{}, {}]",
                param.name(),
                param.value(),
                param.min_value(),
                param.max_value()
            );
        }
    }

    #[test]
    fn prop_rejected_write_is_a_no_op(
        index in 0u8..22,
        excess in 1.0f32..1000.0,
        above in any::<bool>(),
    ) {
        let mut store = ParameterStore::new();
        let before = store.clone();
        let param = *store.get_by_index(index).map_err(|e| TestCaseError::fail(e.to_string()))?;
        let value = if above {
            param.max_value() + excess
        } else {
            param.min_value() - excess
        };

        let result = store.set_by_index(index, value);
        prop_assert!(
            matches!(result, Err(ParamError::InvalidValue { .. })),
            "expected rejection, got {:?}",
            result
        );
        prop_assert_eq!(store, before);
    }

    #[test]
    fn prop_index_and_name_agree(index in 0u8..22) {
        let store = ParameterStore::new();
        let by_index = store.get_by_index(index).map_err(|e| TestCaseError::fail(e.to_string()))?;
        let by_name = store
            .get_by_name(by_index.name())
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(by_name.index(), index);
        prop_assert_eq!(by_name.name(), by_index.name());
    }

    #[test]
    fn prop_unknown_index_is_not_found(index in 22u8..=255) {
        let mut store = ParameterStore::new();
        prop_assert_eq!(store.get_by_index(index), Err(ParamError::NotFoundIndex(index)));
        prop_assert_eq!(store.set_by_index(index, 0.0), Err(ParamError::NotFoundIndex(index)));
        prop_assert_eq!(store, ParameterStore::new());
    }

    #[test]
    fn prop_random_names_resolve_only_to_themselves(name in "[a-z_]{0,32}") {
        let store = ParameterStore::new();
        match store.get_by_name(&name) {
            Ok(param) => {
                prop_assert_eq!(param.name(), name.as_str());
            }
            Err(e) => {
                prop_assert_eq!(e, ParamError::NotFoundName(name.clone()));
            }
        }
    }

    #[test]
    fn prop_image_round_trip(fractions in proptest::collection::vec(0.0f32..=1.0, PARAM_COUNT)) {
        let mut store = ParameterStore::new();
        for (index, t) in (0u8..).zip(fractions) {
            store
                .set_by_index(index, in_bounds_value(index, t))
                .map_err(|e| TestCaseError::fail(e.to_string()))?;
        }

        let decoded = ParameterStore::from_image(&store.encode())
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        for (a, b) in decoded.iter().zip(store.iter()) {
            prop_assert_eq!(a.index(), b.index());
            prop_assert_eq!(a.name(), b.name());
            prop_assert_eq!(a.value().to_bits(), b.value().to_bits());
            prop_assert_eq!(a.default_value().to_bits(), b.default_value().to_bits());
            prop_assert_eq!(a.min_value().to_bits(), b.min_value().to_bits());
            prop_assert_eq!(a.max_value().to_bits(), b.max_value().to_bits());
        }
    }

    #[test]
    fn prop_arbitrary_bytes_never_panic(bytes in proptest::collection::vec(any::<u8>(), 0..1100)) {
        if let Ok(decoded) = ParameterStore::from_image(&bytes) {
            prop_assert_eq!(bytes.len(), escfw_params::IMAGE_LEN);
            let encoded = decoded.encode();
            prop_assert_eq!(encoded.as_slice(), bytes.as_slice());
            for param in decoded.iter() {
                prop_assert!(param.accepts(param.value()));
            }
        }
    }

    #[test]
    fn prop_persist_then_load(fractions in proptest::collection::vec(0.0f32..=1.0, PARAM_COUNT)) {
        let config = StoreConfig::default();
        let mut flash = MemoryFlash::default();
        let mut store = ParameterStore::new();
        for (index, t) in (0u8..).zip(fractions) {
            store
                .set_by_index(index, in_bounds_value(index, t))
                .map_err(|e| TestCaseError::fail(e.to_string()))?;
        }
        store
            .write_params(&mut flash, &config)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(flash.journal().len(), 4);
        prop_assert!(flash.is_protected());
        prop_assert_eq!(ParameterStore::load(&mut flash, &config), store);
    }
}
