//! # audio-io-core
//!
//! Real-time audio I/O core.
//!
//! Provides a fixed-capacity, overwrite-on-overflow `RingBuffer` and a
//! `DeviceCore` that sequences a platform backend through the capture or
//! playback lifecycle under a pluggable locking policy. Platform backends
//! implement the `Backend` and `AudioPlatform` traits and plug into
//! `DeviceCore`.
//!
//! ## Architecture
//!
//! ```text
//! audio-io-core (this crate)
//! ├── traits/       ← Backend, AudioPlatform, LockingPolicy (NullLock, ExclusiveLock)
//! ├── models/       ← ReturnCode, DeviceError, SampleFormat, DeviceInfo, DeviceState, etc.
//! ├── processing/   ← RingBuffer
//! └── device/       ← DeviceCore (lifecycle + serialization)
//! ```

pub mod device;
pub mod models;
pub mod processing;
pub mod traits;

// Re-export key types at crate root for convenience.
pub use device::device_core::{DeviceCore, DEFAULT_UPDATE_DELAY};
pub use models::audio_models::{
    ActionType, AudioBuffer, DeviceId, DeviceInfo, SampleEncoding, SamplingRate,
};
pub use models::config::SampleFormat;
pub use models::error::DeviceError;
pub use models::return_code::ReturnCode;
pub use models::state::DeviceState;
pub use processing::ring_buffer::RingBuffer;
pub use traits::backend::Backend;
pub use traits::locking_policy::{ExclusiveLock, LockingPolicy, NullLock};
pub use traits::platform::AudioPlatform;
