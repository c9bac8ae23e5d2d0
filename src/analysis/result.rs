//! Comparison result types

use serde::{Deserialize, Serialize};

use crate::features::spectrum::SpectrumResult;
use crate::io::sample_buffer::SampleBuffer;

/// Original vs processed audio: the processed buffer, both spectra and both sizes
#[derive(Debug, Clone)]
pub struct ComparisonResult {
    /// Resampled and quantized buffer
    pub processed: SampleBuffer,

    /// Spectrum of the original buffer
    pub original_spectrum: SpectrumResult,

    /// Spectrum of the processed buffer
    pub processed_spectrum: SpectrumResult,

    /// Footprint of the original as decoded 32-bit float samples
    pub original_bytes: u64,

    /// Footprint of the processed buffer at the target bit depth
    pub processed_bytes: u64,

    /// Comparison metadata
    pub metadata: ComparisonMetadata,
}

impl ComparisonResult {
    /// `processed_bytes / original_bytes` (0.0 when the original is empty)
    pub fn size_ratio(&self) -> f64 {
        if self.original_bytes == 0 {
            0.0
        } else {
            self.processed_bytes as f64 / self.original_bytes as f64
        }
    }
}

/// Comparison metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonMetadata {
    /// Sample rate of the original in Hz
    pub source_sample_rate: u32,

    /// Sample rate of the processed buffer in Hz
    pub target_sample_rate: u32,

    /// Bit depth the processed buffer was quantized to
    pub bit_depth: u32,

    /// Channel count (same for both buffers)
    pub channels: usize,

    /// Original duration in seconds
    pub original_duration_seconds: f64,

    /// Processed duration in seconds
    pub processed_duration_seconds: f64,

    /// Processing time in milliseconds
    pub processing_time_ms: f32,

    /// Crate version that produced the result
    pub algorithm_version: String,
}
