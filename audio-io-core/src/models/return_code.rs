use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::DeviceError;

/// Outcome of a single backend call.
///
/// Carried by value and surfaced unchanged by `DeviceCore`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnCode {
    Ok,
    Failed,
    /// Underrun (playback starved) or overrun (capture overflowed).
    Xrun,
    /// Bad parameters or an illegal state transition.
    Invalid,
    BufferFull,
    BufferEmpty,
    Busy,
}

impl ReturnCode {
    pub fn is_ok(self) -> bool {
        self == Self::Ok
    }

    /// Convert into a `Result` so callers can use `?`.
    pub fn into_result(self) -> Result<(), DeviceError> {
        match self {
            Self::Ok => Ok(()),
            code => Err(DeviceError::Backend(code)),
        }
    }
}

impl fmt::Display for ReturnCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Ok => "OK",
            Self::Failed => "failed",
            Self::Xrun => "buffer xrun",
            Self::Invalid => "invalid parameters or state",
            Self::BufferFull => "buffer full",
            Self::BufferEmpty => "buffer empty",
            Self::Busy => "device busy",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_converts_to_unit() {
        assert!(ReturnCode::Ok.is_ok());
        assert_eq!(ReturnCode::Ok.into_result(), Ok(()));
    }

    #[test]
    fn failure_codes_are_preserved_in_error() {
        for code in [
            ReturnCode::Failed,
            ReturnCode::Xrun,
            ReturnCode::Invalid,
            ReturnCode::BufferFull,
            ReturnCode::BufferEmpty,
            ReturnCode::Busy,
        ] {
            assert!(!code.is_ok());
            assert_eq!(code.into_result(), Err(DeviceError::Backend(code)));
        }
    }

    #[test]
    fn error_message_includes_code() {
        let err = ReturnCode::Busy.into_result().unwrap_err();
        assert_eq!(err.to_string(), "backend returned device busy");
    }

    #[test]
    fn serializes_as_snake_case() {
        let json = serde_json::to_string(&ReturnCode::BufferEmpty).unwrap();
        assert_eq!(json, "\"buffer_empty\"");
    }
}
