use std::time::Duration;

use bytemuck::Pod;

use crate::models::audio_models::{ActionType, DeviceId, DeviceInfo};
use crate::models::config::SampleFormat;
use crate::models::error::DeviceError;
use crate::models::return_code::ReturnCode;
use crate::models::state::DeviceState;
use crate::traits::backend::Backend;
use crate::traits::locking_policy::{ExclusiveLock, LockingPolicy};
use crate::traits::platform::AudioPlatform;

/// Pump budget used when the caller has no better value.
pub const DEFAULT_UPDATE_DELAY: Duration = Duration::from_millis(10);

/// Backend plus the lifecycle state it drives, kept behind the policy cell.
struct DeviceSlot<B> {
    backend: B,
    state: DeviceState,
}

impl<B> DeviceSlot<B> {
    fn transition(&mut self, code: ReturnCode, next: DeviceState) {
        if code.is_ok() && self.state != next {
            log::debug!("device state {} -> {}", self.state, next);
            self.state = next;
        }
    }

    fn note_start(&self) {
        if !self.state.can_start() {
            log::debug!("start requested while {}; forwarding to backend", self.state);
        }
    }
}

/// Capture or playback device composed from a locking policy and a backend.
///
/// Every operation acquires the policy token, calls the matching backend
/// primitive and hands back its `ReturnCode` untouched. The core adds no
/// buffering and no retries; role and state rules belong to the backend.
///
/// With [`ExclusiveLock`] (the default) one instance can be shared between
/// threads and all backend calls are serialized. With
/// [`NullLock`](crate::traits::locking_policy::NullLock) the device is
/// `!Sync` and stays on one thread.
///
/// ```text
/// app ─► capture_data / fill_buffer ─► acquire token ─► Backend::do_* ─► bytes
/// ```
///
/// Stop a running device with [`stop`](Self::stop) before dropping it.
pub struct DeviceCore<B, L: LockingPolicy = ExclusiveLock> {
    role: ActionType,
    slot: L::Cell<DeviceSlot<B>>,
}

impl<B, L: LockingPolicy> DeviceCore<B, L> {
    fn lock(&self) -> L::Token<'_, DeviceSlot<B>> {
        L::acquire::<DeviceSlot<B>>(&self.slot)
    }
}

impl<B: Backend, L: LockingPolicy> DeviceCore<B, L> {
    /// Wrap an already-opened backend. `role` must be the role the backend
    /// was opened for.
    pub fn new(role: ActionType, backend: B) -> Self {
        Self {
            role,
            slot: L::new_cell(DeviceSlot {
                backend,
                state: DeviceState::Configured,
            }),
        }
    }

    /// Open `device_id` (or the platform default) for `role`.
    pub fn open<P>(
        platform: &P,
        role: ActionType,
        params: SampleFormat,
        device_id: Option<DeviceId>,
    ) -> Result<Self, DeviceError>
    where
        P: AudioPlatform<Backend = B>,
    {
        params.validate()?;
        let device_id = device_id.unwrap_or_else(|| platform.default_device());
        let backend = platform
            .open(role, &device_id, params)
            .inspect_err(|e| log::error!("failed to open {} device {}: {}", role, device_id, e))?;

        log::debug!("opened {} device {} ({})", role, device_id, params);
        Ok(Self::new(role, backend))
    }

    pub fn role(&self) -> ActionType {
        self.role
    }

    pub fn state(&self) -> DeviceState {
        self.lock().state
    }

    pub fn device_info(&self) -> DeviceInfo {
        self.lock().backend.device_info()
    }

    /// Start whichever direction this device was opened for.
    pub fn start(&self) -> ReturnCode {
        match self.role {
            ActionType::Capture => self.start_capture(),
            ActionType::Playback => self.start_playback(),
        }
    }

    pub fn start_capture(&self) -> ReturnCode {
        let mut slot = self.lock();
        slot.note_start();
        let code = slot.backend.do_start_capture();
        slot.transition(code, DeviceState::Running);
        code
    }

    pub fn start_playback(&self) -> ReturnCode {
        let mut slot = self.lock();
        slot.note_start();
        let code = slot.backend.do_start_playback();
        slot.transition(code, DeviceState::Running);
        code
    }

    pub fn stop(&self) -> ReturnCode {
        let mut slot = self.lock();
        let code = slot.backend.do_stop();
        slot.transition(code, DeviceState::Stopped);
        code
    }

    /// Configure `count` period buffers of `samples` frames each.
    pub fn set_buffers(&self, count: u16, samples: u32) -> ReturnCode {
        self.lock().backend.do_set_buffers(count, samples)
    }

    pub fn update(&self, delay: Duration) -> ReturnCode {
        self.lock().backend.do_update(delay)
    }

    pub fn get_params(&self) -> SampleFormat {
        self.lock().backend.do_get_params()
    }

    /// Fill `buffer` with captured data.
    ///
    /// Returns the number of bytes written (not elements) and the backend's
    /// code.
    pub fn capture_data<T: Pod>(&self, buffer: &mut [T]) -> (usize, ReturnCode) {
        let bytes: &mut [u8] = bytemuck::cast_slice_mut(buffer);
        self.lock().backend.do_capture_data(bytes)
    }

    /// Queue `data` for playback.
    pub fn fill_buffer<T: Pod>(&self, data: &[T]) -> ReturnCode {
        let bytes: &[u8] = bytemuck::cast_slice(data);
        self.lock().backend.do_fill_buffer(bytes)
    }
}

impl<B, L: LockingPolicy> Drop for DeviceCore<B, L> {
    fn drop(&mut self) {
        if self.lock().state.is_running() {
            log::warn!("{} device dropped while running; call stop() first", self.role);
        }
    }
}
