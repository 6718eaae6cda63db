//! Simulated device backend.
//!
//! A capture instance synthesizes a sine tone into an internal ring buffer
//! on each `update`; a playback instance drains its period buffers at the
//! negotiated rate and copies what it "plays" into a monitor tap.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use parking_lot::Mutex;

use audio_io_core::models::audio_models::{ActionType, AudioBuffer, DeviceInfo};
use audio_io_core::models::config::SampleFormat;
use audio_io_core::models::return_code::ReturnCode;
use audio_io_core::processing::ring_buffer::RingBuffer;
use audio_io_core::traits::backend::Backend;

use crate::config::SimConfig;
use crate::tone::ToneGenerator;

/// Counters and playback monitor shared with the application.
#[derive(Debug)]
pub struct SimStats {
    bytes_generated: AtomicU64,
    bytes_captured: AtomicU64,
    bytes_played: AtomicU64,
    xruns: AtomicU64,
    played_tap: Mutex<RingBuffer<u8>>,
}

impl SimStats {
    fn new(tap_capacity: usize) -> Self {
        Self {
            bytes_generated: AtomicU64::new(0),
            bytes_captured: AtomicU64::new(0),
            bytes_played: AtomicU64::new(0),
            xruns: AtomicU64::new(0),
            played_tap: Mutex::new(RingBuffer::new(tap_capacity)),
        }
    }

    pub fn bytes_generated(&self) -> u64 {
        self.bytes_generated.load(Ordering::Relaxed)
    }

    pub fn bytes_captured(&self) -> u64 {
        self.bytes_captured.load(Ordering::Relaxed)
    }

    pub fn bytes_played(&self) -> u64 {
        self.bytes_played.load(Ordering::Relaxed)
    }

    pub fn xruns(&self) -> u64 {
        self.xruns.load(Ordering::Relaxed)
    }

    /// Drain the most recently played bytes into `out`.
    pub fn take_played(&self, out: &mut [u8]) -> usize {
        self.played_tap.lock().retrieve(out)
    }

    fn record_xrun(&self) {
        self.xruns.fetch_add(1, Ordering::Relaxed);
    }
}

/// One opened simulated device.
pub struct SimBackend {
    info: DeviceInfo,
    role: ActionType,
    params: SampleFormat,
    realtime: bool,
    running: bool,
    stats: Arc<SimStats>,

    // Capture side
    tone: ToneGenerator,
    captured: RingBuffer<u8>,
    scratch: Vec<u8>,

    // Playback side: period buffers used as a queue, filled and drained in order.
    buffers: Vec<AudioBuffer>,
    period_bytes: usize,
    fill_index: usize,
    play_index: usize,
}

impl SimBackend {
    pub fn new(info: DeviceInfo, role: ActionType, params: SampleFormat, config: &SimConfig) -> Self {
        let frame = usize::from(params.sample_size()).max(1);
        let ring_frames = params
            .frames_for(Duration::from_millis(u64::from(config.ring_capacity_ms)))
            .max(1);
        let ring_bytes = ring_frames * frame;
        let period_bytes = config.buffer_samples as usize * frame;

        Self {
            info,
            role,
            params,
            realtime: config.realtime,
            running: false,
            stats: Arc::new(SimStats::new(ring_bytes)),
            tone: ToneGenerator::new(config.tone_hz, config.amplitude),
            captured: RingBuffer::new(ring_bytes),
            scratch: Vec::new(),
            buffers: vec![AudioBuffer::with_size(period_bytes); usize::from(config.buffer_count)],
            period_bytes,
            fill_index: 0,
            play_index: 0,
        }
    }

    pub fn stats(&self) -> Arc<SimStats> {
        Arc::clone(&self.stats)
    }

    fn start(&mut self, wanted: ActionType) -> ReturnCode {
        if self.role != wanted {
            log::debug!("{} requested on a {} device", wanted, self.role);
            return ReturnCode::Invalid;
        }
        if self.running {
            return ReturnCode::Busy;
        }
        self.running = true;
        ReturnCode::Ok
    }

    fn frame_bytes(&self) -> usize {
        usize::from(self.params.sample_size())
    }

    fn free_buffers(&self) -> usize {
        self.buffers.iter().filter(|b| b.empty).count()
    }

    fn pump_capture(&mut self, delay: Duration) -> ReturnCode {
        let frames = self.params.frames_for(delay);
        self.scratch.clear();
        self.tone.generate(&self.params, frames, &mut self.scratch);
        self.stats
            .bytes_generated
            .fetch_add(self.scratch.len() as u64, Ordering::Relaxed);

        if self.captured.store(&self.scratch) {
            self.stats.record_xrun();
            log::warn!(
                "capture overrun on {}: oldest data discarded",
                self.info.id
            );
            return ReturnCode::Xrun;
        }
        ReturnCode::Ok
    }

    fn pump_playback(&mut self, delay: Duration) -> ReturnCode {
        let mut due = self.params.bytes_for(delay);
        if due == 0 {
            return ReturnCode::Ok;
        }

        let mut tap = self.stats.played_tap.lock();
        while due > 0 {
            let buffer = &mut self.buffers[self.play_index];
            if buffer.empty {
                break;
            }
            let take = due.min(buffer.remaining());
            let played = &buffer.data[buffer.position..buffer.position + take];
            tap.store(played);
            buffer.position += take;
            due -= take;
            self.stats
                .bytes_played
                .fetch_add(take as u64, Ordering::Relaxed);

            if buffer.remaining() == 0 {
                buffer.empty = true;
                buffer.position = 0;
                self.play_index = (self.play_index + 1) % self.buffers.len();
            }
        }
        drop(tap);

        if due > 0 {
            self.stats.record_xrun();
            log::warn!(
                "playback underrun on {}: {} bytes short",
                self.info.id,
                due
            );
            return ReturnCode::Xrun;
        }
        ReturnCode::Ok
    }
}

impl Backend for SimBackend {
    fn device_info(&self) -> DeviceInfo {
        self.info.clone()
    }

    fn do_start_capture(&mut self) -> ReturnCode {
        self.start(ActionType::Capture)
    }

    fn do_start_playback(&mut self) -> ReturnCode {
        self.start(ActionType::Playback)
    }

    fn do_stop(&mut self) -> ReturnCode {
        if !self.running {
            return ReturnCode::Invalid;
        }
        self.running = false;
        ReturnCode::Ok
    }

    /// Capture: resizes the ring to `count × samples` frames.
    /// Playback: reallocates the period buffers, dropping queued data.
    fn do_set_buffers(&mut self, count: u16, samples: u32) -> ReturnCode {
        if count == 0 || samples == 0 {
            return ReturnCode::Invalid;
        }
        if self.running {
            return ReturnCode::Busy;
        }

        let period_bytes = samples as usize * self.frame_bytes();
        match self.role {
            ActionType::Capture => {
                self.captured = RingBuffer::new((usize::from(count) * period_bytes).max(1));
            }
            ActionType::Playback => {
                self.buffers = vec![AudioBuffer::with_size(period_bytes); usize::from(count)];
                self.period_bytes = period_bytes;
                self.fill_index = 0;
                self.play_index = 0;
            }
        }
        log::debug!(
            "{}: {} buffers of {} frames",
            self.info.id,
            count,
            samples
        );
        ReturnCode::Ok
    }

    fn do_update(&mut self, delay: Duration) -> ReturnCode {
        if !self.running {
            return ReturnCode::Invalid;
        }
        if self.realtime {
            thread::sleep(delay);
        }
        match self.role {
            ActionType::Capture => self.pump_capture(delay),
            ActionType::Playback => self.pump_playback(delay),
        }
    }

    fn do_get_params(&self) -> SampleFormat {
        self.params
    }

    fn do_fill_buffer(&mut self, data: &[u8]) -> ReturnCode {
        if self.role != ActionType::Playback {
            return ReturnCode::Invalid;
        }
        if data.is_empty() {
            return ReturnCode::Ok;
        }
        let frame = self.frame_bytes();
        if frame == 0 || data.len() % frame != 0 {
            return ReturnCode::Invalid;
        }

        let needed = data.len().div_ceil(self.period_bytes);
        if needed > self.free_buffers() {
            return ReturnCode::BufferFull;
        }

        for chunk in data.chunks(self.period_bytes) {
            let buffer = &mut self.buffers[self.fill_index];
            buffer.data.clear();
            buffer.data.extend_from_slice(chunk);
            buffer.position = 0;
            buffer.empty = false;
            self.fill_index = (self.fill_index + 1) % self.buffers.len();
        }
        ReturnCode::Ok
    }

    fn do_capture_data(&mut self, data: &mut [u8]) -> (usize, ReturnCode) {
        if self.role != ActionType::Capture {
            return (0, ReturnCode::Invalid);
        }
        if data.is_empty() {
            return (0, ReturnCode::Ok);
        }

        // Whole frames only, so the ring stays frame-aligned.
        let frame = self.frame_bytes();
        if frame == 0 {
            return (0, ReturnCode::Invalid);
        }
        let whole = data.len() - data.len() % frame;
        if whole == 0 {
            return (0, ReturnCode::Invalid);
        }

        let n = self.captured.retrieve(&mut data[..whole]);
        if n == 0 {
            return (0, ReturnCode::BufferEmpty);
        }
        self.stats
            .bytes_captured
            .fetch_add(n as u64, Ordering::Relaxed);
        (n, ReturnCode::Ok)
    }
}
