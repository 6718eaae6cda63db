//! # audio-io-sim
//!
//! Simulated software backend for audio-io-core.
//!
//! Provides:
//! - `SimPlatform` — device enumeration and `open` for two software devices
//! - `SimBackend` — tone-generating capture and byte-sink playback
//! - `SimStats` — shared counters and a monitor tap of played bytes
//! - `SimConfig` — tone, buffer and pacing settings, loadable from JSON
//!
//! ## Usage
//! ```no_run
//! use audio_io_core::{ActionType, DeviceCore, SampleFormat, DEFAULT_UPDATE_DELAY};
//! use audio_io_sim::{SimBackend, SimConfig, SimPlatform};
//!
//! let platform = SimPlatform::new(SimConfig::default()).unwrap();
//! let device: DeviceCore<SimBackend> =
//!     DeviceCore::open(&platform, ActionType::Capture, SampleFormat::default(), None).unwrap();
//! device.start();
//! device.update(DEFAULT_UPDATE_DELAY);
//! let mut samples = [0i16; 256];
//! let (bytes, code) = device.capture_data(&mut samples);
//! device.stop();
//! ```

pub mod backend;
pub mod config;
pub mod platform;
pub mod tone;

pub use backend::{SimBackend, SimStats};
pub use config::SimConfig;
pub use platform::{SimPlatform, CAPTURE_DEVICE_ID, PLAYBACK_DEVICE_ID};
pub use tone::ToneGenerator;
