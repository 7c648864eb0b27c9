//! Error types for escctl

use escfw_params::ParamError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Parameter not found: {0}")]
    ParamNotFound(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl CliError {
    /// Process exit code reported for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::ParamNotFound(_) => 2,
            Self::InvalidValue(_) => 3,
            Self::Storage(_) => 4,
            Self::IoError(_) | Self::JsonError(_) => 1,
        }
    }
}

impl From<ParamError> for CliError {
    fn from(err: ParamError) -> Self {
        if err.is_not_found() {
            Self::ParamNotFound(err.to_string())
        } else if err.is_invalid_value() {
            Self::InvalidValue(err.to_string())
        } else {
            Self::Storage(err.to_string())
        }
    }
}
