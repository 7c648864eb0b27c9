//! Error types for parameter lookup, mutation, image decoding and flash access.

use thiserror::Error;

/// Errors returned by [`ParameterStore`](crate::ParameterStore) operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamError {
    /// No parameter at this index.
    #[error("Parameter index {0} out of range")]
    NotFoundIndex(u8),

    /// No parameter with this name.
    #[error("Unknown parameter name: {0:?}")]
    NotFoundName(String),

    /// Value rejected by the parameter's bounds. The record is unchanged.
    #[error("Value {value} for '{name}' outside bounds [{min}, {max}]")]
    InvalidValue {
        /// Parameter name.
        name: &'static str,
        /// Rejected value.
        value: f32,
        /// Inclusive lower bound.
        min: f32,
        /// Inclusive upper bound.
        max: f32,
    },

    /// A storage primitive failed while persisting or loading the table.
    #[error("Storage error: {0}")]
    Storage(#[from] FlashError),

    /// Persisted image could not be decoded.
    #[error("Image error: {0}")]
    Image(#[from] ImageError),

    /// Storage layout rejected before any storage call.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ParamError {
    /// True for both index and name lookup failures.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFoundIndex(_) | Self::NotFoundName(_))
    }

    /// True when a value was rejected by bounds validation.
    #[must_use]
    pub fn is_invalid_value(&self) -> bool {
        matches!(self, Self::InvalidValue { .. })
    }

    /// True for storage, image and layout failures.
    #[must_use]
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_) | Self::Image(_) | Self::Config(_))
    }
}

/// Result alias for parameter operations.
pub type ParamResult<T> = Result<T, ParamError>;

/// Errors raised while decoding a persisted parameter image.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ImageError {
    /// Image is not exactly one table long.
    #[error("Invalid image length: expected {expected}, got {actual}")]
    InvalidLength {
        /// Required length in bytes.
        expected: usize,
        /// Supplied length in bytes.
        actual: usize,
    },

    /// Record index or name does not match the compiled table.
    #[error("Record {position} does not match compiled parameter '{expected}'")]
    IdentityMismatch {
        /// Record position within the image.
        position: usize,
        /// Name the compiled table holds at this position.
        expected: &'static str,
    },

    /// Stored default or bounds differ from the compiled table.
    #[error("Stored bounds for '{name}' differ from compiled bounds")]
    BoundsMismatch {
        /// Parameter name.
        name: &'static str,
    },

    /// Stored value violates the parameter's bounds.
    #[error("Stored value {value} for '{name}' is out of bounds")]
    ValueOutOfBounds {
        /// Parameter name.
        name: &'static str,
        /// Offending value.
        value: f32,
    },
}

/// Errors reported by a [`ParamFlash`](crate::ParamFlash) implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlashError {
    /// Region is write-protected.
    #[error("Flash region is write-protected")]
    Protected,

    /// Write target has not been erased.
    #[error("Flash not erased at 0x{address:08X}")]
    NotErased {
        /// First non-erased address.
        address: u32,
    },

    /// Access falls outside the device.
    #[error("Flash access out of range: 0x{address:08X} + {len}")]
    OutOfRange {
        /// Start address.
        address: u32,
        /// Access length in bytes.
        len: usize,
    },

    /// Address or size violates erase/write alignment.
    #[error("Misaligned flash access at 0x{address:08X}")]
    Misaligned {
        /// Offending address or size.
        address: u32,
    },

    /// Device-level failure.
    #[error("Flash hardware error: {0}")]
    Hardware(String),
}

impl FlashError {
    /// Create a hardware error.
    #[must_use]
    pub fn hardware(msg: impl Into<String>) -> Self {
        Self::Hardware(msg.into())
    }
}

/// Result alias for flash primitives.
pub type FlashResult<T> = Result<T, FlashError>;

/// Invalid [`StoreConfig`](crate::StoreConfig).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid configuration: {0}")]
pub struct ConfigError(pub &'static str);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_classification() {
        assert!(ParamError::NotFoundIndex(22).is_not_found());
        assert!(ParamError::NotFoundName("nope".to_string()).is_not_found());
        assert!(!ParamError::Storage(FlashError::Protected).is_not_found());
        assert!(ParamError::Storage(FlashError::Protected).is_storage());
        assert!(ParamError::Config(ConfigError("bad")).is_storage());
    }

    #[test]
    fn test_invalid_value_display() {
        let err = ParamError::InvalidValue {
            name: "motor_kv",
            value: 99.0,
            min: 100.0,
            max: 5000.0,
        };
        assert!(err.is_invalid_value());
        assert_eq!(
            err.to_string(),
            "Value 99 for 'motor_kv' outside bounds [100, 5000]"
        );
    }

    #[test]
    fn test_flash_error_into_param_error() {
        let err: ParamError = FlashError::hardware("erase timeout").into();
        assert_eq!(
            err.to_string(),
            "Storage error: Flash hardware error: erase timeout"
        );
    }

    #[test]
    fn test_flash_error_address_formatting() {
        let err = FlashError::NotErased { address: 0x800 };
        assert_eq!(err.to_string(), "Flash not erased at 0x00000800");
    }
}
