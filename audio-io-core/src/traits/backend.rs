use std::time::Duration;

use crate::models::audio_models::DeviceInfo;
use crate::models::config::SampleFormat;
use crate::models::return_code::ReturnCode;

/// Interface for one opened platform audio device.
///
/// A backend instance is bound to a single role, device and parameter set
/// when its `AudioPlatform` opens it. `DeviceCore` calls these primitives
/// under its locking policy and returns their codes verbatim, so every
/// state rule (wrong role, double start, reconfiguring while running) is
/// decided here.
pub trait Backend {
    /// Information about the device backing this instance.
    fn device_info(&self) -> DeviceInfo;

    fn do_start_capture(&mut self) -> ReturnCode;

    fn do_start_playback(&mut self) -> ReturnCode;

    fn do_stop(&mut self) -> ReturnCode;

    /// Configure `count` period buffers of `samples` frames each.
    fn do_set_buffers(&mut self, count: u16, samples: u32) -> ReturnCode;

    /// Pump the device for up to `delay`. A budget hint, not a bound.
    fn do_update(&mut self, delay: Duration) -> ReturnCode;

    fn do_get_params(&self) -> SampleFormat;

    /// Queue raw bytes for playback.
    fn do_fill_buffer(&mut self, data: &[u8]) -> ReturnCode;

    /// Copy captured bytes into `data`, returning how many were written.
    fn do_capture_data(&mut self, data: &mut [u8]) -> (usize, ReturnCode);
}

impl<B: Backend + ?Sized> Backend for Box<B> {
    fn device_info(&self) -> DeviceInfo {
        (**self).device_info()
    }

    fn do_start_capture(&mut self) -> ReturnCode {
        (**self).do_start_capture()
    }

    fn do_start_playback(&mut self) -> ReturnCode {
        (**self).do_start_playback()
    }

    fn do_stop(&mut self) -> ReturnCode {
        (**self).do_stop()
    }

    fn do_set_buffers(&mut self, count: u16, samples: u32) -> ReturnCode {
        (**self).do_set_buffers(count, samples)
    }

    fn do_update(&mut self, delay: Duration) -> ReturnCode {
        (**self).do_update(delay)
    }

    fn do_get_params(&self) -> SampleFormat {
        (**self).do_get_params()
    }

    fn do_fill_buffer(&mut self, data: &[u8]) -> ReturnCode {
        (**self).do_fill_buffer(data)
    }

    fn do_capture_data(&mut self, data: &mut [u8]) -> (usize, ReturnCode) {
        (**self).do_capture_data(data)
    }
}
