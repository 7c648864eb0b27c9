//! Prelude for escfw-params.
//!
//! Re-exports the types most callers need.
//!
//! # Example
//!
//! ```rust
//! use escfw_params::prelude::*;
//!
//! let store = ParameterStore::new();
//! assert_eq!(store.read_pwm_params().control_curve, PwmControlCurve::Linear);
//! ```

pub use crate::config::{Seed, StoreConfig, StoreConfigBuilder};
pub use crate::error::{FlashError, ImageError, ParamError, ParamResult};
pub use crate::flash::ParamFlash;
pub use crate::groups::{BusParams, ControlParams, MotorParams, PwmControlCurve, PwmParams};
pub use crate::memory_flash::MemoryFlash;
pub use crate::parameter::Parameter;
pub use crate::store::ParameterStore;
pub use crate::table::{PARAM_COUNT, ParamId};
