use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use audio_io_core::models::error::DeviceError;

/// Configuration for the simulated platform.
///
/// Every field has a default, so a JSON file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Frequency of the generated capture tone in Hz (default: 440).
    pub tone_hz: f32,

    /// Peak amplitude of the tone, 0.0–1.0 (default: 0.5).
    pub amplitude: f32,

    /// Capture ring and playback tap size in milliseconds of audio (default: 500).
    pub ring_capacity_ms: u32,

    /// Period buffers allocated before any `set_buffers` call (default: 4).
    pub buffer_count: u16,

    /// Frames per period buffer (default: 1024).
    pub buffer_samples: u32,

    /// Sleep for the requested delay in `update` (default: false).
    pub realtime: bool,
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), DeviceError> {
        if !self.tone_hz.is_finite() || self.tone_hz <= 0.0 {
            return Err(DeviceError::Config(format!(
                "tone frequency must be positive, got {}",
                self.tone_hz
            )));
        }
        if !(0.0..=1.0).contains(&self.amplitude) {
            return Err(DeviceError::Config(format!(
                "amplitude must be within 0.0..=1.0, got {}",
                self.amplitude
            )));
        }
        if self.ring_capacity_ms == 0 {
            return Err(DeviceError::Config("ring capacity must be non-zero".into()));
        }
        if self.buffer_count == 0 || self.buffer_samples == 0 {
            return Err(DeviceError::Config(
                "buffer count and buffer samples must be non-zero".into(),
            ));
        }
        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<Self, DeviceError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| DeviceError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, DeviceError> {
        let json = fs::read_to_string(path)
            .map_err(|e| DeviceError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&json)
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tone_hz: 440.0,
            amplitude: 0.5,
            ring_capacity_ms: 500,
            buffer_count: 4,
            buffer_samples: 1024,
            realtime: false,
        }
    }
}
