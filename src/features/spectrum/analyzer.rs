//! Averaged magnitude spectrum
//!
//! Splits one channel into consecutive, non-overlapping chunks of `fft_size`
//! samples, applies a Hann window to each, transforms it, and averages the
//! half-spectrum magnitudes across chunks.
//!
//! Algorithm:
//! 1. `n_chunks = floor(frame_count / fft_size)`; a trailing partial chunk is dropped
//! 2. Each chunk: `x[j] * hann[j]` → FFT → `|X[k]| / fft_size` for `k < fft_size/2`
//! 3. Sum the per-chunk vectors and divide by `n_chunks`
//!
//! A signal shorter than one window yields an all-zero spectrum.
//!
//! # Example
//!
//! ```
//! use fidelity_dsp::io::sample_buffer::SampleBuffer;
//! use fidelity_dsp::features::spectrum::analyze;
//!
//! let samples: Vec<f32> = (0..44100)
//!     .map(|i| (2.0 * std::f32::consts::PI * 1000.0 * i as f32 / 44100.0).sin())
//!     .collect();
//! let buffer = SampleBuffer::mono(samples, 44100)?;
//! let spectrum = analyze(&buffer, 2048, 0)?;
//! assert_eq!(spectrum.magnitudes.len(), 1024);
//! assert!((spectrum.peak_bin() as i64 - 46).abs() <= 1);
//! # Ok::<(), fidelity_dsp::DspError>(())
//! ```

use serde::{Deserialize, Serialize};

use super::fft::Fft;
use super::window::hann;
use crate::error::DspError;
use crate::io::sample_buffer::SampleBuffer;

/// Averaged half-spectrum of one channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpectrumResult {
    /// Mean magnitude per bin, length `fft_size / 2`
    pub magnitudes: Vec<f32>,

    /// Frequency resolution: `sample_rate / fft_size`
    pub bin_hz: f32,

    /// Transform size used
    pub fft_size: usize,

    /// Number of full chunks averaged (0 for a signal shorter than one window)
    pub chunk_count: usize,
}

impl SpectrumResult {
    /// Index of the largest magnitude (0 for an all-zero spectrum)
    pub fn peak_bin(&self) -> usize {
        self.magnitudes
            .iter()
            .enumerate()
            .fold((0, f32::MIN), |(best_i, best), (i, &m)| {
                if m > best {
                    (i, m)
                } else {
                    (best_i, best)
                }
            })
            .0
    }

    /// Centre frequency of `bin` in Hz
    pub fn frequency_of(&self, bin: usize) -> f32 {
        bin as f32 * self.bin_hz
    }

    /// Bar heights in `[0, ~1]` for drawing
    ///
    /// Covers the lower half of the half-spectrum (`fft_size / 4` bins), mapped
    /// through `log10(1 + m * 100) / 2`.
    pub fn display_levels(&self) -> Vec<f32> {
        self.magnitudes
            .iter()
            .take(self.fft_size / 4)
            .map(|&m| (1.0 + m * 100.0).log10() / 2.0)
            .collect()
    }
}

/// Reusable analyzer for a fixed FFT size
#[derive(Debug, Clone)]
pub struct SpectrumAnalyzer {
    fft: Fft,
    window: Vec<f32>,
}

impl SpectrumAnalyzer {
    /// Plan an analyzer
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if `fft_size` is not a power of two or is below 2
    pub fn new(fft_size: usize) -> Result<Self, DspError> {
        if fft_size < 2 {
            return Err(DspError::InvalidParameter(format!(
                "FFT size must be >= 2, got {}",
                fft_size
            )));
        }

        Ok(Self {
            fft: Fft::new(fft_size)?,
            window: hann(fft_size),
        })
    }

    /// Transform size
    pub fn fft_size(&self) -> usize {
        self.fft.size()
    }

    /// Analyze one channel of a buffer
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if `channel` is out of range
    pub fn analyze(&self, buffer: &SampleBuffer, channel: usize) -> Result<SpectrumResult, DspError> {
        let samples = buffer.channel(channel).ok_or_else(|| {
            DspError::InvalidParameter(format!(
                "Channel {} out of range ({} channel(s))",
                channel,
                buffer.channel_count()
            ))
        })?;

        Ok(self.analyze_samples(samples, buffer.sample_rate()))
    }

    /// Analyze a raw mono slice
    pub fn analyze_samples(&self, samples: &[f32], sample_rate: u32) -> SpectrumResult {
        let n = self.fft.size();
        let bins = n / 2;
        let chunk_count = samples.len() / n;
        let bin_hz = sample_rate as f32 / n as f32;

        let mut magnitudes = vec![0.0f32; bins];

        if chunk_count == 0 {
            log::warn!(
                "Signal ({} samples) shorter than one FFT window ({}), returning zero spectrum",
                samples.len(),
                n
            );
            return SpectrumResult {
                magnitudes,
                bin_hz,
                fft_size: n,
                chunk_count,
            };
        }

        log::debug!(
            "Analyzing spectrum: {} samples, fft_size={}, {} chunk(s), {:.2} Hz/bin",
            samples.len(),
            n,
            chunk_count,
            bin_hz
        );

        // Scratch arrays reused across chunks
        let mut re = vec![0.0f32; n];
        let mut im = vec![0.0f32; n];
        let scale = 1.0 / n as f32;

        for chunk in samples.chunks_exact(n) {
            for ((dst, &x), &w) in re.iter_mut().zip(chunk).zip(&self.window) {
                *dst = x * w;
            }
            im.fill(0.0);

            self.fft.process(&mut re, &mut im);

            for (acc, (&r, &i)) in magnitudes.iter_mut().zip(re.iter().zip(&im)) {
                *acc += (r * r + i * i).sqrt() * scale;
            }
        }

        let inv_chunks = 1.0 / chunk_count as f32;
        for m in magnitudes.iter_mut() {
            *m *= inv_chunks;
        }

        SpectrumResult {
            magnitudes,
            bin_hz,
            fft_size: n,
            chunk_count,
        }
    }
}

/// Analyze `channel` of `buffer` with a one-off analyzer
///
/// See [`SpectrumAnalyzer`] to reuse the window and twiddle tables across calls.
pub fn analyze(
    buffer: &SampleBuffer,
    fft_size: usize,
    channel: usize,
) -> Result<SpectrumResult, DspError> {
    SpectrumAnalyzer::new(fft_size)?.analyze(buffer, channel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn sine(freq: f32, sample_rate: u32, len: usize, amp: f32) -> Vec<f32> {
        (0..len)
            .map(|i| amp * (2.0 * PI * freq * i as f32 / sample_rate as f32).sin())
            .collect()
    }

    #[test]
    fn test_peak_bin_tracks_frequency() {
        let sr = 44100;
        for freq in [100.0, 440.0, 1000.0, 5000.0, 15000.0, 21000.0] {
            let buf = SampleBuffer::mono(sine(freq, sr, sr as usize, 0.8), sr).unwrap();
            let spectrum = analyze(&buf, 2048, 0).unwrap();
            let expected = (freq / spectrum.bin_hz).round() as i64;
            let got = spectrum.peak_bin() as i64;
            assert!(
                (got - expected).abs() <= 1,
                "{} Hz: expected bin {}, got {}",
                freq,
                expected,
                got
            );
        }
    }

    #[test]
    fn test_length_and_non_negative() {
        let buf = SampleBuffer::mono(sine(300.0, 8000, 5000, 0.5), 8000).unwrap();
        for size in [2, 64, 256, 1024, 4096, 8192] {
            let spectrum = analyze(&buf, size, 0).unwrap();
            assert_eq!(spectrum.magnitudes.len(), size / 2);
            assert!(spectrum.magnitudes.iter().all(|&m| m >= 0.0));
        }
    }

    #[test]
    fn test_silence_is_zero() {
        let buf = SampleBuffer::mono(vec![0.0; 10_000], 44100).unwrap();
        let spectrum = analyze(&buf, 2048, 0).unwrap();
        assert_eq!(spectrum.chunk_count, 4);
        assert!(spectrum.magnitudes.iter().all(|&m| m == 0.0));
    }

    #[test]
    fn test_short_signal_is_zero() {
        let buf = SampleBuffer::mono(sine(440.0, 44100, 2047, 1.0), 44100).unwrap();
        let spectrum = analyze(&buf, 2048, 0).unwrap();
        assert_eq!(spectrum.chunk_count, 0);
        assert_eq!(spectrum.magnitudes.len(), 1024);
        assert!(spectrum.magnitudes.iter().all(|&m| m == 0.0));

        let empty = SampleBuffer::mono(vec![], 44100).unwrap();
        let spectrum = analyze(&empty, 2048, 0).unwrap();
        assert_eq!(spectrum.magnitudes, vec![0.0; 1024]);
    }

    #[test]
    fn test_trailing_partial_chunk_dropped() {
        let mut samples = sine(1000.0, 44100, 4096, 0.5);
        let full = SampleBuffer::mono(samples.clone(), 44100).unwrap();
        samples.extend(std::iter::repeat(0.9).take(1000));
        let padded = SampleBuffer::mono(samples, 44100).unwrap();

        let a = analyze(&full, 2048, 0).unwrap();
        let b = analyze(&padded, 2048, 0).unwrap();
        assert_eq!(a.chunk_count, 2);
        assert_eq!(b.chunk_count, 2);
        assert_eq!(a.magnitudes, b.magnitudes);
    }

    #[test]
    fn test_averaging_is_arithmetic_mean() {
        let n = 256;
        let loud = sine(1000.0, 8000, n, 1.0);
        let quiet: Vec<f32> = loud.iter().map(|s| s * 0.5).collect();

        let analyzer = SpectrumAnalyzer::new(n).unwrap();
        let a = analyzer.analyze_samples(&loud, 8000);
        let b = analyzer.analyze_samples(&quiet, 8000);

        let mut both = loud.clone();
        both.extend_from_slice(&quiet);
        let mean = analyzer.analyze_samples(&both, 8000);

        for k in 0..n / 2 {
            let expected = (a.magnitudes[k] + b.magnitudes[k]) / 2.0;
            assert!((mean.magnitudes[k] - expected).abs() < 1e-6);
        }
    }

    #[test]
    fn test_bin_hz_and_channel_selection() {
        let buf = SampleBuffer::new(
            vec![vec![0.0; 4096], sine(2000.0, 16000, 4096, 0.7)],
            16000,
        )
        .unwrap();

        let left = analyze(&buf, 1024, 0).unwrap();
        let right = analyze(&buf, 1024, 1).unwrap();
        assert_eq!(left.bin_hz, 15.625);
        assert!(left.magnitudes.iter().all(|&m| m == 0.0));
        assert_eq!(right.peak_bin(), 128);
        assert_eq!(right.frequency_of(128), 2000.0);

        assert!(matches!(
            analyze(&buf, 1024, 2),
            Err(DspError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_invalid_fft_sizes() {
        let buf = SampleBuffer::mono(vec![0.0; 100], 8000).unwrap();
        for size in [0, 1, 3, 1000, 2049] {
            assert!(matches!(
                analyze(&buf, size, 0),
                Err(DspError::InvalidParameter(_))
            ));
        }
    }

    #[test]
    fn test_display_levels() {
        let spectrum = SpectrumResult {
            magnitudes: vec![0.0, 0.99, 0.09, 0.5],
            bin_hz: 10.0,
            fft_size: 8,
            chunk_count: 1,
        };
        let levels = spectrum.display_levels();
        assert_eq!(levels.len(), 2);
        assert_eq!(levels[0], 0.0);
        assert!((levels[1] - 1.0).abs() < 1e-6);
    }
}
