use crate::models::audio_models::{ActionType, DeviceId, DeviceInfo};
use crate::models::config::SampleFormat;
use crate::models::error::DeviceError;

use super::backend::Backend;

/// Factory side of a platform audio API: enumerates devices and opens
/// backends bound to a role.
///
/// One implementation per OS audio API, picked once at startup.
pub trait AudioPlatform {
    type Backend: Backend;

    /// Identifier of the device to use when the caller names none.
    fn default_device(&self) -> DeviceId;

    /// Snapshot of every device this platform can open.
    fn devices(&self) -> Vec<DeviceInfo>;

    /// Open `device` for `role` with `params`.
    fn open(
        &self,
        role: ActionType,
        device: &DeviceId,
        params: SampleFormat,
    ) -> Result<Self::Backend, DeviceError>;
}
