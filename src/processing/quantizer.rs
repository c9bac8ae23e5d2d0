//! Bit-depth reduction
//!
//! Simulates fixed-point storage: every sample is scaled to the signed integer
//! range of the target depth, rounded, and scaled back. The result stays in
//! `f32` but only takes `2 * max_level + 1` distinct values.
//!
//! Rounding is half-away-from-zero (`f64::round`). Scaling is done in `f64` so
//! that re-quantizing an already quantized buffer reproduces the same integer
//! level even at 24 bits, where `f32` alone cannot hold `sample * 8388607`
//! exactly.
//!
//! # Example
//!
//! ```
//! use fidelity_dsp::io::sample_buffer::SampleBuffer;
//! use fidelity_dsp::processing::quantizer::{quantize, BitDepth};
//!
//! let buffer = SampleBuffer::mono(vec![0.0, 0.5, -1.0], 44100)?;
//! let reduced = quantize(&buffer, BitDepth::try_from(8)?);
//! assert_eq!(reduced.channel(0).unwrap()[1], (64.0f64 / 127.0) as f32);
//! # Ok::<(), fidelity_dsp::DspError>(())
//! ```

use serde::{Deserialize, Serialize};

use crate::error::DspError;
use crate::io::sample_buffer::SampleBuffer;

/// Supported storage depths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum BitDepth {
    /// 8-bit (stored as unsigned PCM in WAV)
    Eight,
    /// 16-bit signed
    #[default]
    Sixteen,
    /// 24-bit signed, packed into 3 bytes
    TwentyFour,
}

impl BitDepth {
    /// Number of bits
    pub fn bits(self) -> u32 {
        match self {
            BitDepth::Eight => 8,
            BitDepth::Sixteen => 16,
            BitDepth::TwentyFour => 24,
        }
    }

    /// Bytes per sample in PCM storage
    pub fn bytes_per_sample(self) -> usize {
        (self.bits() / 8) as usize
    }

    /// Largest positive signed level: `2^(bits-1) - 1`
    pub fn max_level(self) -> i32 {
        (1i32 << (self.bits() - 1)) - 1
    }
}

impl TryFrom<u32> for BitDepth {
    type Error = DspError;

    fn try_from(bits: u32) -> Result<Self, Self::Error> {
        match bits {
            8 => Ok(BitDepth::Eight),
            16 => Ok(BitDepth::Sixteen),
            24 => Ok(BitDepth::TwentyFour),
            other => Err(DspError::InvalidParameter(format!(
                "Unsupported bit depth {} (expected 8, 16 or 24)",
                other
            ))),
        }
    }
}

impl From<BitDepth> for u32 {
    fn from(depth: BitDepth) -> Self {
        depth.bits()
    }
}

impl std::fmt::Display for BitDepth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-bit", self.bits())
    }
}

/// Round a normalized sample to its integer level at the given scale
///
/// Shared with the WAV encoder so both agree on every level.
#[inline]
pub(crate) fn to_level(sample: f32, max_level: f64) -> f64 {
    (sample as f64 * max_level).round()
}

/// Quantize every sample of every channel to `bit_depth`
///
/// Input outside `[-1, 1]` is not clamped, so the output may exceed that range too.
pub fn quantize(buffer: &SampleBuffer, bit_depth: BitDepth) -> SampleBuffer {
    let max_level = bit_depth.max_level() as f64;

    log::debug!(
        "Quantizing {} channel(s) x {} frames to {} (max level {})",
        buffer.channel_count(),
        buffer.frame_count(),
        bit_depth,
        max_level
    );

    let channels = buffer
        .channels()
        .iter()
        .map(|ch| {
            ch.iter()
                .map(|&s| (to_level(s, max_level) / max_level) as f32)
                .collect()
        })
        .collect();

    SampleBuffer::from_parts(channels, buffer.sample_rate())
}
