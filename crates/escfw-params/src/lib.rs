//! # escfw-params
//!
//! Parameter registry for brushless ESC firmware.
//!
//! This crate provides a fixed table of named, bounded `f32` tunables with:
//! - `ParameterStore` for validated get/set by index or name
//! - Typed group readers (`MotorParams`, `ControlParams`, `PwmParams`,
//!   `BusParams`) with the unit conversions the control loops expect
//! - A fixed-layout image codec for the whole table
//! - `ParamFlash` trait and `MemoryFlash` simulation for persistence
//!
//! ## Guarantees
//!
//! - **No clamping**: out-of-range writes are rejected and leave the record
//!   unchanged
//! - **No allocation** on lookup, mutation, group reads or encoding
//! - **Build-time checked table**: indices, names, bounds and image size are
//!   verified by `const` assertions
//!
//! ## Persistence
//!
//! ```text
//! ┌───────────┐ protect(false) ┌─────────────┐ erase() ┌────────┐
//! │ Protected │───────────────►│ Unprotected │────────►│ Erased │
//! └───────────┘                └─────────────┘         └────────┘
//!       ▲                                                  │
//!       │                 protect(true)                write()
//!       │                                                  ▼
//!       │                                            ┌─────────┐
//!       └────────────────────────────────────────────│ Written │
//!                                                    └─────────┘
//! ```
//!
//! Protection is restored on every path, including after a failed step.
//!
//! ## Example
//!
//! ```rust
//! use escfw_params::prelude::*;
//!
//! let config = StoreConfig::default();
//! let mut flash = MemoryFlash::default();
//!
//! // Blank flash: falls back to compiled defaults.
//! let mut store = ParameterStore::load(&mut flash, &config);
//! store.set_by_name("motor_num_poles", 12.0)?;
//! store.write_params(&mut flash, &config)?;
//!
//! let motor = ParameterStore::load(&mut flash, &config).read_motor_params();
//! assert_eq!(motor.num_poles, 12);
//! # Ok::<(), escfw_params::ParamError>(())
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod config;
pub mod error;
pub mod flash;
pub mod groups;
pub mod image;
pub mod memory_flash;
pub mod parameter;
mod persist;
pub mod prelude;
pub mod store;
pub mod table;

pub use config::{Seed, StoreConfig, StoreConfigBuilder};
pub use error::{ConfigError, FlashError, FlashResult, ImageError, ParamError, ParamResult};
pub use flash::ParamFlash;
pub use groups::{
    BusParams, CONTROL_BANDWIDTH_HZ, ControlParams, MotorParams, PwmControlCurve, PwmParams,
    rad_per_s_from_rpm,
};
pub use image::{IMAGE_LEN, ParamImage, RECORD_SIZE};
pub use memory_flash::{FlashOp, FlashOpKind, MemoryFlash};
pub use parameter::Parameter;
pub use store::ParameterStore;
pub use table::{DEFAULT_TABLE, MAX_NAME_LEN, PARAM_COUNT, ParamId};
