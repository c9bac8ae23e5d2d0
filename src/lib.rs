//! # Fidelity DSP
//!
//! Offline tools for hearing and measuring what sample-rate and bit-depth
//! reduction do to an audio signal.
//!
//! ## Features
//!
//! - **Resampling**: Band-limited (windowed sinc) sample-rate conversion
//! - **Quantization**: Bit-depth reduction to 8, 16 or 24 bits, staying in `f32`
//! - **Spectral Analysis**: Hann-windowed, chunk-averaged magnitude spectrum on a radix-2 FFT
//! - **WAV Export**: Canonical RIFF/WAVE PCM encoding at 8, 16 or 24 bits
//! - **Size Estimation**: Storage footprint at any bit depth
//!
//! ## Quick Start
//!
//! ```no_run
//! use fidelity_dsp::{compare_audio, decode_file, BitDepth, ProcessingConfig};
//! use fidelity_dsp::analysis::size::format_size;
//!
//! let original = decode_file("input.wav")?;
//!
//! let mut config = ProcessingConfig::default();
//! config.target_sample_rate = 16000;
//! config.bit_depth = BitDepth::try_from(8)?;
//!
//! let result = compare_audio(&original, &config)?;
//! println!("{} -> {}", format_size(result.original_bytes), format_size(result.processed_bytes));
//! # Ok::<(), fidelity_dsp::DspError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Decoded Input → Resampler → Quantizer → Processed
//!       │                                     │
//!       └──── Spectral Analyzer / WAV Encoder / Size Estimator ────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod config;
pub mod error;
pub mod features;
pub mod io;
pub mod processing;

// Re-export main types
pub use analysis::result::{ComparisonMetadata, ComparisonResult};
pub use analysis::size::{estimated_bytes, format_size};
pub use config::{ProcessingConfig, ResamplerConfig};
pub use error::DspError;
pub use features::spectrum::{analyze, SpectrumAnalyzer, SpectrumResult};
pub use io::decoder::{decode_bytes, decode_file};
pub use io::sample_buffer::SampleBuffer;
pub use io::wav::{encode_wav, write_wav};
pub use processing::quantizer::{quantize, BitDepth};
pub use processing::resampler::{resample, ResampleRequest, Resampler};

use analysis::size::FLOAT_BIT_DEPTH;

/// Produce the processed buffer: resample to the target rate, then quantize
///
/// # Errors
///
/// Returns `DspError::InvalidParameter` if the target rate or resampler settings are invalid
pub fn process_audio(
    buffer: &SampleBuffer,
    config: &ProcessingConfig,
) -> Result<SampleBuffer, DspError> {
    log::debug!(
        "Processing {} channel(s) x {} frames: {} Hz -> {} Hz, {}",
        buffer.channel_count(),
        buffer.frame_count(),
        buffer.sample_rate(),
        config.target_sample_rate,
        config.bit_depth
    );

    let resampler = Resampler::new(config.resampler)?;
    let resampled = resampler.process(buffer, config.target_sample_rate)?;
    Ok(quantize(&resampled, config.bit_depth))
}

/// Process a buffer and measure original vs processed
///
/// Runs [`process_audio`], then the spectral analyzer on both buffers (same
/// FFT size and channel), and the size estimator for both.
///
/// # Errors
///
/// Returns `DspError::InvalidParameter` for an invalid target rate, FFT size,
/// or analysis channel
///
/// # Example
///
/// ```
/// use fidelity_dsp::{compare_audio, ProcessingConfig, SampleBuffer};
///
/// let samples: Vec<f32> = (0..48000)
///     .map(|i| (2.0 * std::f32::consts::PI * 440.0 * i as f32 / 48000.0).sin() * 0.5)
///     .collect();
/// let original = SampleBuffer::mono(samples, 48000)?;
///
/// let mut config = ProcessingConfig::default();
/// config.target_sample_rate = 8000;
/// let result = compare_audio(&original, &config)?;
///
/// assert_eq!(result.processed.frame_count(), 8000);
/// assert_eq!(result.original_bytes, 48000 * 4);
/// assert_eq!(result.processed_bytes, 8000 * 2);
/// # Ok::<(), fidelity_dsp::DspError>(())
/// ```
pub fn compare_audio(
    buffer: &SampleBuffer,
    config: &ProcessingConfig,
) -> Result<ComparisonResult, DspError> {
    use std::time::Instant;
    let start_time = Instant::now();

    // Validate analysis parameters before doing the expensive work
    let analyzer = SpectrumAnalyzer::new(config.fft_size)?;
    if config.analysis_channel >= buffer.channel_count() {
        return Err(DspError::InvalidParameter(format!(
            "Analysis channel {} out of range ({} channel(s))",
            config.analysis_channel,
            buffer.channel_count()
        )));
    }

    let processed = process_audio(buffer, config)?;

    let original_spectrum = analyzer.analyze(buffer, config.analysis_channel)?;
    let processed_spectrum = analyzer.analyze(&processed, config.analysis_channel)?;

    let original_bytes = buffer.estimated_bytes(FLOAT_BIT_DEPTH);
    let processed_bytes = processed.estimated_bytes(config.bit_depth.bits());

    let processing_time_ms = start_time.elapsed().as_secs_f32() * 1000.0;

    log::debug!(
        "Comparison done in {:.2} ms: {} -> {} bytes",
        processing_time_ms,
        original_bytes,
        processed_bytes
    );

    let metadata = ComparisonMetadata {
        source_sample_rate: buffer.sample_rate(),
        target_sample_rate: processed.sample_rate(),
        bit_depth: config.bit_depth.bits(),
        channels: buffer.channel_count(),
        original_duration_seconds: buffer.duration_seconds(),
        processed_duration_seconds: processed.duration_seconds(),
        processing_time_ms,
        algorithm_version: env!("CARGO_PKG_VERSION").to_string(),
    };

    Ok(ComparisonResult {
        processed,
        original_spectrum,
        processed_spectrum,
        original_bytes,
        processed_bytes,
        metadata,
    })
}
