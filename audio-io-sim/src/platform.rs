//! Device enumeration and opening for the simulated platform.

use std::collections::BTreeSet;

use audio_io_core::models::audio_models::{
    ActionType, DeviceId, DeviceInfo, SampleEncoding, SamplingRate,
};
use audio_io_core::models::config::SampleFormat;
use audio_io_core::models::error::DeviceError;
use audio_io_core::traits::platform::AudioPlatform;

use crate::backend::SimBackend;
use crate::config::SimConfig;

pub const CAPTURE_DEVICE_ID: &str = "sim-capture";
pub const PLAYBACK_DEVICE_ID: &str = "sim-playback";

const ENCODINGS: [SampleEncoding; 4] = [
    SampleEncoding::U8,
    SampleEncoding::S8,
    SampleEncoding::U16,
    SampleEncoding::S16,
];

const RATES: [SamplingRate; 5] = [
    SamplingRate::Hz8000,
    SamplingRate::Hz11025,
    SamplingRate::Hz22050,
    SamplingRate::Hz44100,
    SamplingRate::Hz48000,
];

/// Every known encoding at every known rate.
pub fn all_formats() -> BTreeSet<(SampleEncoding, SamplingRate)> {
    ENCODINGS
        .iter()
        .flat_map(|&e| RATES.iter().map(move |&r| (e, r)))
        .collect()
}

/// Software platform with a fixed device list.
#[derive(Debug, Clone)]
pub struct SimPlatform {
    config: SimConfig,
    devices: Vec<DeviceInfo>,
}

impl SimPlatform {
    /// Platform with the two standard devices: a default `sim-capture` and
    /// a `sim-playback`, both stereo-capable.
    pub fn new(config: SimConfig) -> Result<Self, DeviceError> {
        let devices = vec![
            DeviceInfo {
                id: DeviceId::new(CAPTURE_DEVICE_ID),
                name: "Simulated Tone Source".into(),
                max_channels: 2,
                supported_formats: all_formats(),
                is_default: true,
            },
            DeviceInfo {
                id: DeviceId::new(PLAYBACK_DEVICE_ID),
                name: "Simulated Sink".into(),
                max_channels: 2,
                supported_formats: all_formats(),
                is_default: false,
            },
        ];
        Self::with_devices(config, devices)
    }

    pub fn with_devices(config: SimConfig, devices: Vec<DeviceInfo>) -> Result<Self, DeviceError> {
        config.validate()?;
        Ok(Self { config, devices })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }
}

impl AudioPlatform for SimPlatform {
    type Backend = SimBackend;

    fn default_device(&self) -> DeviceId {
        self.devices
            .iter()
            .find(|d| d.is_default)
            .or_else(|| self.devices.first())
            .map(|d| d.id.clone())
            .unwrap_or_else(|| DeviceId::new(CAPTURE_DEVICE_ID))
    }

    fn devices(&self) -> Vec<DeviceInfo> {
        self.devices.clone()
    }

    fn open(
        &self,
        role: ActionType,
        device: &DeviceId,
        params: SampleFormat,
    ) -> Result<SimBackend, DeviceError> {
        let info = self
            .devices
            .iter()
            .find(|d| &d.id == device)
            .ok_or_else(|| DeviceError::DeviceNotAvailable(device.to_string()))?;

        params.validate()?;
        if !info.supports(&params) {
            return Err(DeviceError::InvalidParams(format!(
                "{} not supported by {}",
                params, device
            )));
        }

        log::debug!("sim: opening {} for {}", device, role);
        Ok(SimBackend::new(info.clone(), role, params, &self.config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_standard_devices() {
        let platform = SimPlatform::new(SimConfig::default()).unwrap();
        let devices = platform.devices();

        assert_eq!(devices.len(), 2);
        assert_eq!(platform.default_device(), DeviceId::new(CAPTURE_DEVICE_ID));
        assert_eq!(devices[0].supported_formats.len(), 20);
    }

    #[test]
    fn default_falls_back_to_first_device() {
        let mut devices = SimPlatform::new(SimConfig::default()).unwrap().devices();
        devices.reverse();
        devices.iter_mut().for_each(|d| d.is_default = false);
        let platform = SimPlatform::with_devices(SimConfig::default(), devices).unwrap();

        assert_eq!(platform.default_device(), DeviceId::new(PLAYBACK_DEVICE_ID));
    }

    #[test]
    fn open_unknown_device_fails() {
        let platform = SimPlatform::new(SimConfig::default()).unwrap();
        let err = platform
            .open(ActionType::Capture, &DeviceId::new("nope"), SampleFormat::default())
            .err();
        assert_eq!(err, Some(DeviceError::DeviceNotAvailable("nope".into())));
    }

    #[test]
    fn open_rejects_unsupported_format() {
        let platform = SimPlatform::new(SimConfig::default()).unwrap();
        let surround = SampleFormat {
            channels: 6,
            ..SampleFormat::default()
        };
        let err = platform
            .open(ActionType::Playback, &DeviceId::new(PLAYBACK_DEVICE_ID), surround)
            .err();
        assert!(matches!(err, Some(DeviceError::InvalidParams(_))));
    }

    #[test]
    fn invalid_config_rejected() {
        let config = SimConfig {
            amplitude: -1.0,
            ..SimConfig::default()
        };
        assert!(SimPlatform::new(config).is_err());
    }
}
