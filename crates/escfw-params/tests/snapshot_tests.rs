//! Snapshot tests for user-visible error text and serialized views.
//!
//! These lock in messages and JSON shapes that host tools and protocol
//! handlers surface to operators.

use escfw_params::prelude::*;
use escfw_params::{FlashOp, ImageError};
use insta::assert_snapshot;

#[test]
fn test_snapshot_not_found_messages() {
    let store = ParameterStore::new();
    let by_index = store.get_by_index(22).err().map(|e| e.to_string());
    let by_name = store.get_by_name("motr_kv").err().map(|e| e.to_string());
    assert_snapshot!(by_index.unwrap_or_default(), @"Parameter index 22 out of range");
    assert_snapshot!(by_name.unwrap_or_default(), @r#"Unknown parameter name: "motr_kv""#);
}

#[test]
fn test_snapshot_invalid_value_message() {
    let mut store = ParameterStore::new();
    let err = store
        .set(ParamId::PwmThrottleMin, 999.0)
        .err()
        .map(|e| e.to_string());
    assert_snapshot!(
        err.unwrap_or_default(),
        @"Value 999 for 'pwm_throttle_min' outside bounds [1000, 2000]"
    );
}

#[test]
fn test_snapshot_storage_messages() {
    let protected = ParamError::from(FlashError::Protected);
    assert_snapshot!(protected.to_string(), @"Storage error: Flash region is write-protected");

    let blank = ParamError::from(ImageError::IdentityMismatch {
        position: 0,
        expected: "motor_num_poles",
    });
    assert_snapshot!(
        blank.to_string(),
        @"Image error: Record 0 does not match compiled parameter 'motor_num_poles'"
    );
}

#[test]
fn test_snapshot_control_params_debug() {
    let control = ParameterStore::new().read_control_params();
    assert_snapshot!(
        format!("{control:?}"),
        @"ControlParams { bandwidth_hz: 50.0, max_accel_torque_a: 2.0, load_torque_a: 10.0, accel_gain: 0.1, accel_time_s: 0.1 }"
    );
}

#[test]
fn test_snapshot_bus_params_json() -> Result<(), serde_json::Error> {
    let bus = ParameterStore::new().read_bus_params();
    assert_snapshot!(
        serde_json::to_string(&bus)?,
        @r#"{"node_id":1,"esc_index":0,"esc_status_interval_s":0.1}"#
    );
    Ok(())
}

#[test]
fn test_snapshot_parameter_json() -> Result<(), serde_json::Error> {
    let store = ParameterStore::new();
    assert_snapshot!(
        serde_json::to_string(store.get(ParamId::MotorKv))?,
        @r#"{"index":6,"name":"motor_kv","value":850.0,"default_value":850.0,"min_value":100.0,"max_value":5000.0}"#
    );
    Ok(())
}

#[test]
fn test_snapshot_pwm_curve_json() -> Result<(), serde_json::Error> {
    let pwm = ParameterStore::new().read_pwm_params();
    assert_snapshot!(serde_json::to_string(&pwm.control_curve)?, @r#""linear""#);
    Ok(())
}

#[test]
fn test_snapshot_write_journal() -> Result<(), Box<dyn std::error::Error>> {
    let mut flash = MemoryFlash::default();
    ParameterStore::new().write_params(&mut flash, &StoreConfig::default())?;
    let journal: &[FlashOp] = flash.journal();
    assert_snapshot!(
        serde_json::to_string(journal)?,
        @r#"[{"protect":false},{"erase":{"region":0,"size":2048}},{"write":{"region":0,"len":968}},{"protect":true}]"#
    );
    Ok(())
}
