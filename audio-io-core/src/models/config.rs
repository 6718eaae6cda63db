use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::audio_models::{SampleEncoding, SamplingRate};
use super::error::DeviceError;

/// Stream parameters negotiated with a backend.
///
/// Defaults to 22.05 kHz, 16-bit signed, mono.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SampleFormat {
    pub rate: SamplingRate,
    pub encoding: SampleEncoding,

    /// Interleaved channel count, at least 1.
    pub channels: u8,
}

impl SampleFormat {
    pub fn new(
        rate: SamplingRate,
        encoding: SampleEncoding,
        channels: u8,
    ) -> Result<Self, DeviceError> {
        let format = Self {
            rate,
            encoding,
            channels,
        };
        format.validate()?;
        Ok(format)
    }

    pub fn validate(&self) -> Result<(), DeviceError> {
        if self.channels == 0 {
            return Err(DeviceError::InvalidParams(
                "channel count must be at least 1".into(),
            ));
        }
        if self.rate == SamplingRate::Unknown {
            return Err(DeviceError::InvalidParams("unknown sampling rate".into()));
        }
        if self.encoding == SampleEncoding::Unknown {
            return Err(DeviceError::InvalidParams("unknown sample encoding".into()));
        }
        Ok(())
    }

    /// Bytes per frame: one sample for every channel.
    pub fn sample_size(&self) -> u16 {
        self.encoding.bytes_per_sample() * u16::from(self.channels)
    }

    /// Whole frames that fit in `duration` at this rate.
    pub fn frames_for(&self, duration: Duration) -> usize {
        let micros = duration.as_micros() * u128::from(self.rate.as_hz());
        (micros / 1_000_000) as usize
    }

    pub fn bytes_for(&self, duration: Duration) -> usize {
        self.frames_for(duration) * usize::from(self.sample_size())
    }
}

impl Default for SampleFormat {
    fn default() -> Self {
        Self {
            rate: SamplingRate::Hz22050,
            encoding: SampleEncoding::S16,
            channels: 1,
        }
    }
}

impl fmt::Display for SampleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}ch", self.rate, self.encoding, self.channels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let format = SampleFormat::default();
        assert!(format.validate().is_ok());
        assert_eq!(format.sample_size(), 2);
    }

    #[test]
    fn sample_size_scales_with_channels() {
        let format = SampleFormat::new(SamplingRate::Hz48000, SampleEncoding::S16, 2).unwrap();
        assert_eq!(format.sample_size(), 4);

        let format = SampleFormat::new(SamplingRate::Hz8000, SampleEncoding::U8, 3).unwrap();
        assert_eq!(format.sample_size(), 3);
    }

    #[test]
    fn zero_channels_rejected() {
        let err = SampleFormat::new(SamplingRate::Hz48000, SampleEncoding::S16, 0).unwrap_err();
        assert!(matches!(err, DeviceError::InvalidParams(_)));
    }

    #[test]
    fn unknown_rate_or_encoding_rejected() {
        assert!(SampleFormat::new(SamplingRate::Unknown, SampleEncoding::S16, 1).is_err());
        assert!(SampleFormat::new(SamplingRate::Hz8000, SampleEncoding::Unknown, 1).is_err());
    }

    #[test]
    fn duration_helpers() {
        let format = SampleFormat::new(SamplingRate::Hz48000, SampleEncoding::S16, 2).unwrap();
        assert_eq!(format.frames_for(Duration::from_millis(10)), 480);
        assert_eq!(format.bytes_for(Duration::from_millis(10)), 1920);

        let cd = SampleFormat::new(SamplingRate::Hz44100, SampleEncoding::S16, 1).unwrap();
        assert_eq!(cd.frames_for(Duration::from_millis(10)), 441);
        assert_eq!(cd.frames_for(Duration::ZERO), 0);
    }

    #[test]
    fn display_format() {
        assert_eq!(
            SampleFormat::default().to_string(),
            "22.05kHz, 16bit signed, 1ch"
        );
    }
}
