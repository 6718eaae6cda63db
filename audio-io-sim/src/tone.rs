//! Sine tone source for the simulated capture device.

use std::f32::consts::TAU;

use audio_io_core::models::audio_models::SampleEncoding;
use audio_io_core::models::config::SampleFormat;

/// Phase-continuous sine oscillator.
#[derive(Debug, Clone)]
pub struct ToneGenerator {
    frequency: f32,
    amplitude: f32,
    /// Position within one period, 0.0..1.0.
    phase: f32,
}

impl ToneGenerator {
    pub fn new(frequency: f32, amplitude: f32) -> Self {
        Self {
            frequency,
            amplitude,
            phase: 0.0,
        }
    }

    fn next_value(&mut self, rate_hz: f32) -> f32 {
        let value = (self.phase * TAU).sin() * self.amplitude;
        self.phase += self.frequency / rate_hz;
        self.phase -= self.phase.floor();
        value
    }

    /// Append `frames` interleaved frames in `format` to `out`.
    ///
    /// Every channel of a frame carries the same value.
    pub fn generate(&mut self, format: &SampleFormat, frames: usize, out: &mut Vec<u8>) {
        let rate_hz = format.rate.as_hz() as f32;
        if rate_hz == 0.0 {
            return;
        }
        out.reserve(frames * usize::from(format.sample_size()));
        for _ in 0..frames {
            let value = self.next_value(rate_hz);
            for _ in 0..format.channels {
                encode_sample(value, format.encoding, out);
            }
        }
    }
}

/// Encode one `[-1.0, 1.0]` sample in native byte order.
///
/// Clamps out-of-range values. Unsigned encodings are offset to mid-scale.
pub fn encode_sample(value: f32, encoding: SampleEncoding, out: &mut Vec<u8>) {
    let v = value.clamp(-1.0, 1.0);
    match encoding {
        SampleEncoding::Unknown => {}
        SampleEncoding::U8 => out.push(((v * i8::MAX as f32) as i16 + 128) as u8),
        SampleEncoding::S8 => out.push((v * i8::MAX as f32) as i8 as u8),
        SampleEncoding::U16 => {
            let s = ((v * i16::MAX as f32) as i32 + 32_768) as u16;
            out.extend_from_slice(&s.to_ne_bytes());
        }
        SampleEncoding::S16 => {
            let s = (v * i16::MAX as f32) as i16;
            out.extend_from_slice(&s.to_ne_bytes());
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use audio_io_core::models::audio_models::SamplingRate;

    fn s16_mono(rate: SamplingRate) -> SampleFormat {
        SampleFormat::new(rate, SampleEncoding::S16, 1).unwrap()
    }

    fn decode_s16(bytes: &[u8]) -> Vec<f32> {
        bytes
            .chunks_exact(2)
            .map(|b| i16::from_ne_bytes([b[0], b[1]]) as f32 / i16::MAX as f32)
            .collect()
    }

    #[test]
    fn encodes_extremes_per_encoding() {
        let mut out = Vec::new();
        encode_sample(1.0, SampleEncoding::U8, &mut out);
        encode_sample(-1.0, SampleEncoding::U8, &mut out);
        encode_sample(0.0, SampleEncoding::U8, &mut out);
        assert_eq!(out, vec![255, 1, 128]);

        out.clear();
        encode_sample(-1.0, SampleEncoding::S8, &mut out);
        assert_eq!(out, vec![(-127i8) as u8]);

        out.clear();
        encode_sample(0.0, SampleEncoding::U16, &mut out);
        assert_eq!(out, 32_768u16.to_ne_bytes().to_vec());

        out.clear();
        encode_sample(2.0, SampleEncoding::S16, &mut out);
        assert_eq!(out, i16::MAX.to_ne_bytes().to_vec());

        out.clear();
        encode_sample(0.5, SampleEncoding::Unknown, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn generates_requested_frame_count() {
        let format = SampleFormat::new(SamplingRate::Hz8000, SampleEncoding::U16, 2).unwrap();
        let mut tone = ToneGenerator::new(440.0, 0.5);
        let mut out = Vec::new();
        tone.generate(&format, 100, &mut out);
        assert_eq!(out.len(), 100 * 4);
    }

    #[test]
    fn sine_has_configured_peak() {
        // 1 kHz at 8 kHz: peak lands exactly on every 8th sample, offset 2.
        let mut tone = ToneGenerator::new(1000.0, 0.5);
        let mut out = Vec::new();
        tone.generate(&s16_mono(SamplingRate::Hz8000), 16, &mut out);

        let samples = decode_s16(&out);
        assert_abs_diff_eq!(samples[0], 0.0, epsilon = 1e-3);
        assert_abs_diff_eq!(samples[2], 0.5, epsilon = 1e-3);
        assert_abs_diff_eq!(samples[6], -0.5, epsilon = 1e-3);
        assert_abs_diff_eq!(samples[10], 0.5, epsilon = 1e-3);
    }

    #[test]
    fn phase_is_continuous_across_calls() {
        let format = s16_mono(SamplingRate::Hz22050);
        let mut once = ToneGenerator::new(440.0, 0.8);
        let mut split = ToneGenerator::new(440.0, 0.8);

        let mut a = Vec::new();
        once.generate(&format, 300, &mut a);

        let mut b = Vec::new();
        split.generate(&format, 100, &mut b);
        split.generate(&format, 200, &mut b);

        for (x, y) in decode_s16(&a).into_iter().zip(decode_s16(&b)) {
            assert_abs_diff_eq!(x, y, epsilon = 1e-3);
        }
    }
}
