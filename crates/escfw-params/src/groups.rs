//! Typed, unit-converted views over the parameter table.
//!
//! Each reader is a pure projection: it never fails and never mutates the
//! store. The returned structs are point-in-time snapshots.

use core::f32::consts::PI;

use serde::{Deserialize, Serialize};

use crate::store::ParameterStore;
use crate::table::ParamId;

/// Bandwidth handed to the current controller, in hertz.
pub const CONTROL_BANDWIDTH_HZ: f32 = 50.0;

/// Scale an RPM figure by the motor's pole pairs.
///
/// Computes `rpm * 60 / (2 * PI * (num_poles >> 1))`. Used both for the
/// mechanical speed limit and, with `1 / kv`, for the back-EMF constant.
/// A pole count below 2 yields a non-finite result.
#[must_use]
#[expect(
    clippy::cast_precision_loss,
    reason = "pole pairs are bounded to 20 by the table"
)]
pub fn rad_per_s_from_rpm(rpm: f32, num_poles: u32) -> f32 {
    rpm * 60.0 / (2.0 * PI * (num_poles >> 1) as f32)
}

/// Motor electrical characteristics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotorParams {
    /// Pole count (not pole pairs).
    pub num_poles: u32,
    /// Current limit in amps.
    pub max_current_a: f32,
    /// Voltage limit in volts.
    pub max_voltage_v: f32,
    /// Speed limit in radians per second.
    pub max_speed_rad_per_s: f32,
    /// Phase resistance in ohms.
    pub rs_r: f32,
    /// Phase inductance in henries.
    pub ls_h: f32,
    /// Back-EMF constant in volt-seconds per radian.
    pub phi_v_s_per_rad: f32,
}

/// Speed and torque controller settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlParams {
    /// Always [`CONTROL_BANDWIDTH_HZ`].
    pub bandwidth_hz: f32,
    /// Acceleration torque limit in amps.
    pub max_accel_torque_a: f32,
    /// Full-throttle load torque in amps.
    pub load_torque_a: f32,
    /// Acceleration gain.
    pub accel_gain: f32,
    /// Torque rise time in seconds.
    pub accel_time_s: f32,
}

/// Shape of the throttle-to-setpoint mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PwmControlCurve {
    /// Square root response.
    Sqrt,
    /// Proportional response.
    #[default]
    Linear,
    /// Quadratic response.
    Quadratic,
}

impl PwmControlCurve {
    /// Decode a curve code. Unknown codes map to [`Linear`](Self::Linear).
    #[must_use]
    pub const fn from_code(code: u8) -> Self {
        match code {
            0 => Self::Sqrt,
            2 => Self::Quadratic,
            _ => Self::Linear,
        }
    }

    /// Decode a raw parameter value, truncating it to a code first.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "truncation to a curve code is the wire contract; negatives saturate to 0"
    )]
    pub fn from_raw(value: f32) -> Self {
        Self::from_code(value as u8)
    }

    /// Numeric code of this curve.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Sqrt => 0,
            Self::Linear => 1,
            Self::Quadratic => 2,
        }
    }
}

/// PWM input mapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PwmParams {
    /// True when PWM input drives the speed controller.
    pub use_speed_controller: bool,
    /// Minimum throttle pulse in microseconds.
    pub throttle_pulse_min_us: u16,
    /// Maximum throttle pulse in microseconds.
    pub throttle_pulse_max_us: u16,
    /// Deadband in microseconds.
    pub throttle_deadband_us: u16,
    /// Output offset.
    pub control_offset: f32,
    /// Lower output bound.
    pub control_min: f32,
    /// Upper output bound.
    pub control_max: f32,
    /// Throttle curve.
    pub control_curve: PwmControlCurve,
}

/// Bus identity and broadcast timing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BusParams {
    /// Node ID.
    pub node_id: u8,
    /// Index of this ESC in throttle command arrays.
    pub esc_index: u8,
    /// Status broadcast interval in seconds.
    pub esc_status_interval_s: f32,
}

impl ParameterStore {
    /// Project the motor parameters.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "pole count is bounded to [4, 40]"
    )]
    pub fn read_motor_params(&self) -> MotorParams {
        let num_poles = self.value(ParamId::MotorNumPoles) as u32;
        MotorParams {
            num_poles,
            max_current_a: self.value(ParamId::MotorCurrentLimit),
            max_voltage_v: self.value(ParamId::MotorVoltageLimit),
            max_speed_rad_per_s: rad_per_s_from_rpm(self.value(ParamId::MotorRpmMax), num_poles),
            rs_r: self.value(ParamId::MotorRs),
            ls_h: self.value(ParamId::MotorLs),
            phi_v_s_per_rad: rad_per_s_from_rpm(1.0 / self.value(ParamId::MotorKv), num_poles),
        }
    }

    /// Project the controller parameters.
    #[must_use]
    pub fn read_control_params(&self) -> ControlParams {
        ControlParams {
            bandwidth_hz: CONTROL_BANDWIDTH_HZ,
            max_accel_torque_a: self.value(ParamId::ControlAccelTorqueMax),
            load_torque_a: self.value(ParamId::ControlLoadTorque),
            accel_gain: self.value(ParamId::ControlAccelGain),
            accel_time_s: self.value(ParamId::ControlAccelTime),
        }
    }

    /// Project the PWM input parameters.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "pulse widths are bounded to [0, 2000] microseconds"
    )]
    pub fn read_pwm_params(&self) -> PwmParams {
        PwmParams {
            use_speed_controller: self.value(ParamId::PwmControlMode) > 0.0,
            throttle_pulse_min_us: self.value(ParamId::PwmThrottleMin) as u16,
            throttle_pulse_max_us: self.value(ParamId::PwmThrottleMax) as u16,
            throttle_deadband_us: self.value(ParamId::PwmThrottleDeadband) as u16,
            control_offset: self.value(ParamId::PwmControlOffset),
            control_min: self.value(ParamId::PwmControlMin),
            control_max: self.value(ParamId::PwmControlMax),
            control_curve: PwmControlCurve::from_raw(self.value(ParamId::PwmControlCurve)),
        }
    }

    /// Project the bus parameters.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "node ID and ESC index are bounded to [0, 125]"
    )]
    pub fn read_bus_params(&self) -> BusParams {
        BusParams {
            node_id: self.value(ParamId::UavcanNodeId) as u8,
            esc_index: self.value(ParamId::UavcanEscIndex) as u8,
            esc_status_interval_s: self.value(ParamId::UavcanEscStatusInterval),
        }
    }
}
