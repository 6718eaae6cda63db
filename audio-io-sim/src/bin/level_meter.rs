//! Console level meter fed from the simulated capture device.
//!
//! Usage: `level-meter [config.json]`. Set `RUST_LOG=debug` for lifecycle
//! logging.

use std::path::Path;
use std::process;
use std::time::Duration;

use audio_io_core::{
    ActionType, AudioPlatform, DeviceCore, DeviceError, ReturnCode, RingBuffer, SampleEncoding,
    SampleFormat, SamplingRate, DEFAULT_UPDATE_DELAY,
};
use audio_io_sim::{SimBackend, SimConfig, SimPlatform};

const TICKS: usize = 200;
const TICKS_PER_FRAME: usize = 5;
const BAR_WIDTH: usize = 40;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        log::error!("{}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), DeviceError> {
    let config = match std::env::args().nth(1) {
        Some(path) => SimConfig::load(Path::new(&path))?,
        None => SimConfig {
            realtime: true,
            ..SimConfig::default()
        },
    };
    let platform = SimPlatform::new(config)?;
    for info in platform.devices() {
        log::info!(
            "device {} \"{}\" (max {} ch){}",
            info.id,
            info.name,
            info.max_channels,
            if info.is_default { " [default]" } else { "" }
        );
    }

    let params = SampleFormat::new(SamplingRate::Hz22050, SampleEncoding::S16, 1)?;
    let device: DeviceCore<SimBackend> =
        DeviceCore::open(&platform, ActionType::Capture, params, None)?;
    log::info!("capturing {} from {}", device.get_params(), device.device_info().name);
    device.start().into_result()?;

    // Decouples the capture rate from the display rate.
    let mut display = RingBuffer::<i16>::new(params.frames_for(Duration::from_millis(100)));
    let mut chunk = vec![0i16; 256];
    let mut window = vec![0i16; display.capacity()];

    for tick in 0..TICKS {
        match device.update(DEFAULT_UPDATE_DELAY) {
            ReturnCode::Ok => {}
            code => log::warn!("update: {}", code),
        }

        loop {
            let (bytes, code) = device.capture_data(&mut chunk);
            if !code.is_ok() || bytes == 0 {
                break;
            }
            if display.store(&chunk[..bytes / std::mem::size_of::<i16>()]) {
                log::debug!("display ring overflowed; oldest samples dropped");
            }
        }

        if tick % TICKS_PER_FRAME == TICKS_PER_FRAME - 1 {
            let n = display.retrieve(&mut window);
            let (rms, peak) = levels(&window[..n]);
            log::info!("{}", meter_line(rms, peak));
        }
    }

    device.stop().into_result()
}

/// RMS and peak of `samples`, normalised to 0.0–1.0.
fn levels(samples: &[i16]) -> (f32, f32) {
    if samples.is_empty() {
        return (0.0, 0.0);
    }
    let scale = i16::MAX as f32;
    let mut sum = 0.0f32;
    let mut peak = 0.0f32;
    for &s in samples {
        let v = (s as f32 / scale).abs();
        sum += v * v;
        peak = peak.max(v);
    }
    ((sum / samples.len() as f32).sqrt(), peak.min(1.0))
}

fn meter_line(rms: f32, peak: f32) -> String {
    let filled = ((rms * BAR_WIDTH as f32).round() as usize).min(BAR_WIDTH);
    format!(
        "{:>5.1}% |{}{}| peak {:>5.1}%",
        rms * 100.0,
        "#".repeat(filled),
        " ".repeat(BAR_WIDTH - filled),
        peak * 100.0
    )
}
