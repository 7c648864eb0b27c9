//! Compiled parameter table.
//!
//! [`DEFAULT_TABLE`] is the single source of truth for parameter identity,
//! bounds and factory values. Adding, removing or reordering entries changes
//! the persisted image layout and requires a new build.

use serde::{Deserialize, Serialize};

use crate::parameter::Parameter;

/// Number of parameters in the table.
pub const PARAM_COUNT: usize = 22;

/// Longest accepted parameter name in bytes, excluding the terminator.
pub const MAX_NAME_LEN: usize = 26;

/// Typed parameter identifier. The discriminant is the table index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ParamId {
    /// Number of motor poles.
    MotorNumPoles = 0,
    /// Current limit in amps.
    MotorCurrentLimit = 1,
    /// Commanded voltage limit in volts.
    MotorVoltageLimit = 2,
    /// Maximum rated speed in RPM.
    MotorRpmMax = 3,
    /// Phase resistance in ohms.
    MotorRs = 4,
    /// Phase inductance in henries.
    MotorLs = 5,
    /// Velocity constant in RPM per volt.
    MotorKv = 6,
    /// Acceleration torque limit in amps.
    ControlAccelTorqueMax = 7,
    /// Full-throttle load torque in amps.
    ControlLoadTorque = 8,
    /// Speed controller acceleration gain.
    ControlAccelGain = 9,
    /// Speed controller torque rise time in seconds.
    ControlAccelTime = 10,
    /// ESC status broadcast interval in seconds.
    UavcanEscStatusInterval = 11,
    /// Node ID on the bus.
    UavcanNodeId = 12,
    /// Index of this ESC in throttle command messages.
    UavcanEscIndex = 13,
    /// PWM input mode: 0 drives the speed controller, 1 the torque controller.
    PwmControlMode = 14,
    /// Minimum throttle pulse width in microseconds.
    PwmThrottleMin = 15,
    /// Maximum throttle pulse width in microseconds.
    PwmThrottleMax = 16,
    /// Throttle deadband in microseconds.
    PwmThrottleDeadband = 17,
    /// Control output offset.
    PwmControlOffset = 18,
    /// Control curve code, see [`PwmControlCurve`](crate::PwmControlCurve).
    PwmControlCurve = 19,
    /// Lower control output bound.
    PwmControlMin = 20,
    /// Upper control output bound.
    PwmControlMax = 21,
}

impl ParamId {
    /// Every identifier in index order.
    pub const ALL: [ParamId; PARAM_COUNT] = [
        Self::MotorNumPoles,
        Self::MotorCurrentLimit,
        Self::MotorVoltageLimit,
        Self::MotorRpmMax,
        Self::MotorRs,
        Self::MotorLs,
        Self::MotorKv,
        Self::ControlAccelTorqueMax,
        Self::ControlLoadTorque,
        Self::ControlAccelGain,
        Self::ControlAccelTime,
        Self::UavcanEscStatusInterval,
        Self::UavcanNodeId,
        Self::UavcanEscIndex,
        Self::PwmControlMode,
        Self::PwmThrottleMin,
        Self::PwmThrottleMax,
        Self::PwmThrottleDeadband,
        Self::PwmControlOffset,
        Self::PwmControlCurve,
        Self::PwmControlMin,
        Self::PwmControlMax,
    ];

    /// Table index of this identifier.
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Identifier at `index`, if any.
    #[must_use]
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(usize::from(index)).copied()
    }

    /// Compiled table entry for this identifier.
    #[must_use]
    pub fn compiled(self) -> &'static Parameter {
        compiled_entry(self)
    }

    /// Protocol-facing name.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.compiled().name()
    }
}

#[expect(
    clippy::indexing_slicing,
    reason = "ParamId discriminants are exactly 0..PARAM_COUNT"
)]
fn compiled_entry(id: ParamId) -> &'static Parameter {
    &DEFAULT_TABLE[usize::from(id.index())]
}

/// Build-time defaults: `(id, name, value, default, min, max)`.
pub static DEFAULT_TABLE: [Parameter; PARAM_COUNT] = COMPILED;

const COMPILED: [Parameter; PARAM_COUNT] = [
    // Pole count converts mechanical speed to electrical speed.
    Parameter::new(ParamId::MotorNumPoles, "motor_num_poles", 14.0, 14.0, 4.0, 40.0),
    // Caps the current setpoint and its slew rate.
    Parameter::new(ParamId::MotorCurrentLimit, "motor_current_limit", 1.0, 10.0, 1.0, 40.0),
    // Commanded voltage never exceeds this; may sit above the motor's nominal voltage.
    Parameter::new(ParamId::MotorVoltageLimit, "motor_voltage_limit", 2.0, 7.4, 0.5, 27.0),
    Parameter::new(ParamId::MotorRpmMax, "motor_rpm_max", 20000.0, 20000.0, 500.0, 40000.0),
    // Rs and Ls are re-estimated on start-up.
    Parameter::new(ParamId::MotorRs, "motor_rs", 60e-3, 60e-3, 1e-3, 1000e-3),
    Parameter::new(ParamId::MotorLs, "motor_ls", 20e-6, 20e-6, 1e-6, 1000e-6),
    // Datasheet KV; a 20% error is tolerable.
    Parameter::new(ParamId::MotorKv, "motor_kv", 850.0, 850.0, 100.0, 5000.0),
    Parameter::new(ParamId::ControlAccelTorqueMax, "control_accel_torque_max", 2.0, 2.0, 0.1, 40.0),
    Parameter::new(ParamId::ControlLoadTorque, "control_load_torque", 10.0, 10.0, 1.0, 40.0),
    Parameter::new(ParamId::ControlAccelGain, "control_accel_gain", 0.1, 0.1, 0.0, 1.0),
    Parameter::new(ParamId::ControlAccelTime, "control_accel_time", 0.1, 0.1, 0.01, 1.0),
    Parameter::new(ParamId::UavcanEscStatusInterval, "uavcan_escstatus_interval", 100e-3, 100e-3, 1e-3, 1000e-3),
    Parameter::new(ParamId::UavcanNodeId, "uavcan_node_id", 1.0, 0.0, 0.0, 125.0),
    Parameter::new(ParamId::UavcanEscIndex, "uavcan_esc_index", 0.0, 0.0, 0.0, 15.0),
    Parameter::new(ParamId::PwmControlMode, "pwm_control_mode", 0.0, 0.0, 0.0, 1.0),
    Parameter::new(ParamId::PwmThrottleMin, "pwm_throttle_min", 1100.0, 1100.0, 1000.0, 2000.0),
    Parameter::new(ParamId::PwmThrottleMax, "pwm_throttle_max", 1900.0, 1900.0, 1000.0, 2000.0),
    Parameter::new(ParamId::PwmThrottleDeadband, "pwm_throttle_deadband", 10.0, 10.0, 0.0, 1000.0),
    Parameter::new(ParamId::PwmControlOffset, "pwm_control_offset", 0.0, 0.0, -1.0, 1.0),
    Parameter::new(ParamId::PwmControlCurve, "pwm_control_curve", 1.0, 1.0, 0.5, 2.0),
    Parameter::new(ParamId::PwmControlMin, "pwm_control_min", 0.0, 0.0, -40000.0, 40000.0),
    Parameter::new(ParamId::PwmControlMax, "pwm_control_max", 0.0, 0.0, -40000.0, 40000.0),
];

#[expect(
    clippy::indexing_slicing,
    reason = "const evaluation, out-of-range indexing fails the build"
)]
const fn str_eq(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    true
}

#[expect(
    clippy::indexing_slicing,
    reason = "const evaluation, out-of-range indexing fails the build"
)]
const fn check_table(table: &[Parameter; PARAM_COUNT]) {
    let mut i = 0;
    while i < PARAM_COUNT {
        let p = &table[i];
        assert!(p.index() as usize == i, "table index must match position");
        assert!(!p.name().is_empty(), "parameter name must not be empty");
        assert!(p.name().len() <= MAX_NAME_LEN, "parameter name too long");
        assert!(p.min_value() <= p.max_value(), "inverted bounds");
        assert!(
            p.min_value() <= p.value() && p.value() <= p.max_value(),
            "initial value out of bounds"
        );
        assert!(
            p.min_value() <= p.default_value() && p.default_value() <= p.max_value(),
            "default value out of bounds"
        );
        let mut j = i + 1;
        while j < PARAM_COUNT {
            assert!(
                !str_eq(p.name(), table[j].name()),
                "duplicate parameter name"
            );
            j += 1;
        }
        i += 1;
    }
}

const _: () = check_table(&COMPILED);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_dense() {
        for (position, id) in ParamId::ALL.iter().enumerate() {
            assert_eq!(usize::from(id.index()), position);
            assert_eq!(ParamId::from_index(id.index()), Some(*id));
        }
        assert_eq!(ParamId::from_index(22), None);
        assert_eq!(ParamId::from_index(u8::MAX), None);
    }

    #[test]
    fn test_compiled_entries_match_ids() {
        for id in ParamId::ALL {
            assert_eq!(id.compiled().id(), id);
        }
        assert_eq!(ParamId::MotorKv.name(), "motor_kv");
        assert_eq!(ParamId::PwmControlMax.name(), "pwm_control_max");
    }

    #[test]
    fn test_longest_name_fits() {
        let longest = DEFAULT_TABLE
            .iter()
            .map(|p| p.name().len())
            .max()
            .unwrap_or(0);
        assert_eq!(longest, "uavcan_escstatus_interval".len());
        assert!(longest <= MAX_NAME_LEN);
    }

    #[test]
    fn test_const_str_eq() {
        assert!(str_eq("motor_kv", "motor_kv"));
        assert!(!str_eq("motor_kv", "motor_ls"));
        assert!(!str_eq("motor_kv", "motor_kv_"));
    }
}
