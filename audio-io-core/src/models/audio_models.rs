use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::config::SampleFormat;

/// Sampling rates a device can negotiate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplingRate {
    Unknown,
    Hz8000,
    Hz11025,
    Hz22050,
    Hz44100,
    Hz48000,
}

impl SamplingRate {
    /// Rate in Hz, 0 for `Unknown`.
    pub fn as_hz(self) -> u32 {
        match self {
            Self::Unknown => 0,
            Self::Hz8000 => 8_000,
            Self::Hz11025 => 11_025,
            Self::Hz22050 => 22_050,
            Self::Hz44100 => 44_100,
            Self::Hz48000 => 48_000,
        }
    }

    /// Exact lookup; any rate not in the table maps to `Unknown`.
    pub fn from_hz(hz: u32) -> Self {
        match hz {
            8_000 => Self::Hz8000,
            11_025 => Self::Hz11025,
            22_050 => Self::Hz22050,
            44_100 => Self::Hz44100,
            48_000 => Self::Hz48000,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for SamplingRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Unknown => "unknown",
            Self::Hz8000 => "8kHz",
            Self::Hz11025 => "11.025kHz",
            Self::Hz22050 => "22.05kHz",
            Self::Hz44100 => "44.1kHz",
            Self::Hz48000 => "48kHz",
        };
        f.write_str(s)
    }
}

/// Bit depth and signedness of a single sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleEncoding {
    Unknown,
    U8,
    S8,
    U16,
    S16,
}

impl SampleEncoding {
    pub fn bytes_per_sample(self) -> u16 {
        match self {
            Self::Unknown => 0,
            Self::U8 | Self::S8 => 1,
            Self::U16 | Self::S16 => 2,
        }
    }

    pub fn is_signed(self) -> bool {
        matches!(self, Self::S8 | Self::S16)
    }
}

impl fmt::Display for SampleEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Unknown => "unknown",
            Self::U8 => "8bit unsigned",
            Self::S8 => "8bit signed",
            Self::U16 => "16bit unsigned",
            Self::S16 => "16bit signed",
        };
        f.write_str(s)
    }
}

/// Data-flow role of a device instance. Fixed when the device is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionType {
    Capture,
    Playback,
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Capture => f.write_str("capture"),
            Self::Playback => f.write_str("playback"),
        }
    }
}

/// Backend-specific device identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceId(pub String);

impl DeviceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Snapshot of a device as reported by a backend query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    pub id: DeviceId,
    pub name: String,
    pub max_channels: usize,
    pub supported_formats: BTreeSet<(SampleEncoding, SamplingRate)>,
    pub is_default: bool,
}

impl DeviceInfo {
    /// Whether `format` can be opened on this device.
    pub fn supports(&self, format: &SampleFormat) -> bool {
        usize::from(format.channels) <= self.max_channels
            && self
                .supported_formats
                .contains(&(format.encoding, format.rate))
    }
}

/// One backend-side period buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioBuffer {
    pub data: Vec<u8>,
    pub empty: bool,
    /// Read offset into `data` while the buffer is being drained.
    pub position: usize,
}

impl AudioBuffer {
    pub fn with_size(bytes: usize) -> Self {
        Self {
            data: vec![0; bytes],
            empty: true,
            position: 0,
        }
    }

    /// Bytes not yet consumed from a filled buffer.
    pub fn remaining(&self) -> usize {
        if self.empty {
            0
        } else {
            self.data.len() - self.position
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_lookup_is_exact() {
        assert_eq!(SamplingRate::from_hz(44_100), SamplingRate::Hz44100);
        assert_eq!(SamplingRate::from_hz(44_000), SamplingRate::Unknown);
        assert_eq!(SamplingRate::Hz22050.as_hz(), 22_050);
        assert_eq!(SamplingRate::Unknown.as_hz(), 0);
    }

    #[test]
    fn encoding_sizes() {
        assert_eq!(SampleEncoding::Unknown.bytes_per_sample(), 0);
        assert_eq!(SampleEncoding::S8.bytes_per_sample(), 1);
        assert_eq!(SampleEncoding::U16.bytes_per_sample(), 2);
        assert!(SampleEncoding::S16.is_signed());
        assert!(!SampleEncoding::U8.is_signed());
    }

    #[test]
    fn display_strings() {
        assert_eq!(SamplingRate::Hz48000.to_string(), "48kHz");
        assert_eq!(SampleEncoding::S16.to_string(), "16bit signed");
        assert_eq!(ActionType::Playback.to_string(), "playback");
    }

    #[test]
    fn device_info_supports_format() {
        let info = DeviceInfo {
            id: DeviceId::new("mic"),
            name: "Mic".into(),
            max_channels: 1,
            supported_formats: [(SampleEncoding::S16, SamplingRate::Hz22050)]
                .into_iter()
                .collect(),
            is_default: true,
        };

        assert!(info.supports(&SampleFormat::default()));

        let stereo = SampleFormat {
            channels: 2,
            ..SampleFormat::default()
        };
        assert!(!info.supports(&stereo));

        let other_rate = SampleFormat {
            rate: SamplingRate::Hz48000,
            ..SampleFormat::default()
        };
        assert!(!info.supports(&other_rate));
    }

    #[test]
    fn device_info_json_roundtrip() {
        let info = DeviceInfo {
            id: DeviceId::new("sim-capture"),
            name: "Simulated".into(),
            max_channels: 2,
            supported_formats: [(SampleEncoding::U8, SamplingRate::Hz8000)]
                .into_iter()
                .collect(),
            is_default: false,
        };
        let json = serde_json::to_string(&info).unwrap();
        assert!(json.contains("\"id\":\"sim-capture\""));
        let back: DeviceInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(back, info);
    }

    #[test]
    fn audio_buffer_remaining() {
        let mut buf = AudioBuffer::with_size(8);
        assert_eq!(buf.remaining(), 0);

        buf.empty = false;
        buf.position = 3;
        assert_eq!(buf.remaining(), 5);
    }
}
