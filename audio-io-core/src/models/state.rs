use std::fmt;

/// Device lifecycle state machine.
///
/// State transitions:
/// ```text
/// uninitialized → configured → running → stopped
///                                 ↑         │
///                                 └─────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DeviceState {
    #[default]
    Uninitialized,
    Configured,
    Running,
    Stopped,
}

impl DeviceState {
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }

    /// Whether a start request may move this state to `Running`.
    pub fn can_start(&self) -> bool {
        matches!(self, Self::Configured | Self::Stopped)
    }
}

impl fmt::Display for DeviceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Uninitialized => "uninitialized",
            Self::Configured => "configured",
            Self::Running => "running",
            Self::Stopped => "stopped",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_allowed_between_running_periods() {
        assert!(DeviceState::Configured.can_start());
        assert!(DeviceState::Stopped.can_start());
        assert!(!DeviceState::Running.can_start());
        assert!(!DeviceState::Uninitialized.can_start());
    }

    #[test]
    fn default_is_uninitialized() {
        assert_eq!(DeviceState::default(), DeviceState::Uninitialized);
        assert!(!DeviceState::default().is_running());
    }
}
