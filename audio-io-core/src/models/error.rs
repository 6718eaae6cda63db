use thiserror::Error;

use super::return_code::ReturnCode;

/// Errors raised while opening or configuring a device.
///
/// Per-call backend outcomes are [`ReturnCode`] values; this type only shows
/// up where a `Result` is the natural shape (construction, config loading,
/// or an explicit [`ReturnCode::into_result`]).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeviceError {
    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    #[error("device not available: {0}")]
    DeviceNotAvailable(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("backend returned {0}")]
    Backend(ReturnCode),
}
