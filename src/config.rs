//! Configuration parameters for the processing pipeline

use serde::{Deserialize, Serialize};

use crate::processing::quantizer::BitDepth;

/// Resampler kernel parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResamplerConfig {
    /// Sinc zero-crossings on each side of the interpolation point (default: 16)
    /// Higher values = steeper anti-aliasing, more work per sample
    pub half_width: usize,
}

impl Default for ResamplerConfig {
    fn default() -> Self {
        Self { half_width: 16 }
    }
}

/// Pipeline configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    // Reduction
    /// Target sample rate in Hz (default: 44100)
    /// Typical choices: 8000, 16000, 44100, 48000, 96000
    pub target_sample_rate: u32,

    /// Target bit depth (default: 16)
    pub bit_depth: BitDepth,

    // Spectral analysis
    /// FFT size for spectrum estimation, power of two (default: 2048)
    pub fft_size: usize,

    /// Channel analyzed by the spectrum estimator (default: 0)
    pub analysis_channel: usize,

    // Resampling
    /// Resampler kernel parameters
    pub resampler: ResamplerConfig,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            target_sample_rate: 44100,
            bit_depth: BitDepth::Sixteen,
            fft_size: 2048,
            analysis_channel: 0,
            resampler: ResamplerConfig::default(),
        }
    }
}
