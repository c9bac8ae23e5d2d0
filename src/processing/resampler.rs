//! Sample-rate conversion
//!
//! Band-limited interpolation with a Blackman-windowed sinc kernel. Every
//! output sample `i` sits at source position `x = i * source_rate / target_rate`
//! and is the weighted sum of the source samples within `half_width`
//! zero-crossings of `x`. When downsampling the kernel is stretched by
//! `source_rate / target_rate` and its cutoff lowered to the target Nyquist
//! frequency, so content above it is attenuated instead of aliasing. Samples
//! outside the buffer count as silence.
//!
//! Output length is `round(frame_count * target_rate / source_rate)`, computed
//! in integer arithmetic, and at least one frame for non-empty input.
//!
//! # Example
//!
//! ```
//! use fidelity_dsp::io::sample_buffer::SampleBuffer;
//! use fidelity_dsp::processing::resampler::resample;
//!
//! let buffer = SampleBuffer::new(vec![vec![0.0; 44100], vec![0.0; 44100]], 44100)?;
//! let out = resample(&buffer, 8000)?;
//! assert_eq!(out.frame_count(), 8000);
//! assert_eq!(out.channel_count(), 2);
//! # Ok::<(), fidelity_dsp::DspError>(())
//! ```

use std::f64::consts::PI;

use crate::config::ResamplerConfig;
use crate::error::DspError;
use crate::features::spectrum::window::blackman;
use crate::io::sample_buffer::SampleBuffer;

/// Source and target rate of one conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResampleRequest {
    /// Native rate in Hz
    pub source_rate: u32,
    /// Requested rate in Hz
    pub target_rate: u32,
}

impl ResampleRequest {
    /// Validate both rates
    pub fn new(source_rate: u32, target_rate: u32) -> Result<Self, DspError> {
        if source_rate == 0 || target_rate == 0 {
            return Err(DspError::InvalidParameter(format!(
                "Sample rates must be > 0 (source={}, target={})",
                source_rate, target_rate
            )));
        }
        Ok(Self {
            source_rate,
            target_rate,
        })
    }

    /// True when no conversion is needed
    pub fn is_identity(&self) -> bool {
        self.source_rate == self.target_rate
    }

    /// Output frame count for `frame_count` input frames
    ///
    /// `round(frame_count * target / source)` with ties rounded up, clamped to
    /// one frame when the input is non-empty.
    pub fn output_frames(&self, frame_count: usize) -> usize {
        if frame_count == 0 {
            return 0;
        }
        let num = frame_count as u128 * self.target_rate as u128;
        let den = self.source_rate as u128;
        let rounded = (2 * num + den) / (2 * den);
        (rounded as usize).max(1)
    }
}

/// Windowed-sinc resampler
#[derive(Debug, Clone, Default)]
pub struct Resampler {
    config: ResamplerConfig,
}

impl Resampler {
    /// Create a resampler
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if `config.half_width == 0`
    pub fn new(config: ResamplerConfig) -> Result<Self, DspError> {
        if config.half_width == 0 {
            return Err(DspError::InvalidParameter(
                "Resampler half width must be > 0".to_string(),
            ));
        }
        Ok(Self { config })
    }

    /// Convert `buffer` to `target_rate`
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if `target_rate == 0`
    pub fn process(&self, buffer: &SampleBuffer, target_rate: u32) -> Result<SampleBuffer, DspError> {
        let request = ResampleRequest::new(buffer.sample_rate(), target_rate)?;
        let out_frames = request.output_frames(buffer.frame_count());

        log::debug!(
            "Resampling {} channel(s): {} Hz -> {} Hz, {} -> {} frames",
            buffer.channel_count(),
            request.source_rate,
            request.target_rate,
            buffer.frame_count(),
            out_frames
        );

        if request.is_identity() {
            return Ok(buffer.clone());
        }

        if buffer.is_empty() {
            return Ok(SampleBuffer::from_parts(
                vec![Vec::new(); buffer.channel_count()],
                target_rate,
            ));
        }

        let kernel = Kernel::new(request, self.config.half_width);
        let channels = buffer
            .channels()
            .iter()
            .map(|ch| kernel.apply(ch, out_frames))
            .collect();

        Ok(SampleBuffer::from_parts(channels, target_rate))
    }
}

/// Convert `buffer` to `target_rate` with the default kernel
pub fn resample(buffer: &SampleBuffer, target_rate: u32) -> Result<SampleBuffer, DspError> {
    Resampler::default().process(buffer, target_rate)
}

/// Table entries per sinc zero-crossing
const OVERSAMPLING: usize = 512;

/// Time mapping and filter shape shared by all channels of one conversion
///
/// The tapered sinc is tabulated once over `[0, half_width]` zero-crossings at
/// `OVERSAMPLING` phases each; taps linearly interpolate between entries.
struct Kernel {
    /// Source samples advanced per output sample
    step: f64,
    /// Cutoff relative to the source Nyquist frequency (<= 1)
    cutoff: f64,
    /// Kernel reach in source samples on each side
    reach: f64,
    /// `sinc(u) * blackman(u / half_width)` at `u = j / OVERSAMPLING`, zero-padded
    table: Vec<f32>,
}

impl Kernel {
    fn new(request: ResampleRequest, half_width: usize) -> Self {
        let step = request.source_rate as f64 / request.target_rate as f64;
        let cutoff = (1.0 / step).min(1.0);

        let last = half_width * OVERSAMPLING;
        let mut table: Vec<f32> = (0..=last)
            .map(|j| {
                let u = j as f64 / OVERSAMPLING as f64;
                let sinc = if j == 0 { 1.0 } else { (PI * u).sin() / (PI * u) };
                (sinc * blackman(u / half_width as f64)) as f32
            })
            .collect();
        // Guard entry so interpolation at the outermost point stays in bounds
        table.push(0.0);

        Self {
            step,
            cutoff,
            reach: half_width as f64 / cutoff,
            table,
        }
    }

    #[inline]
    fn weight(&self, distance: f64) -> f64 {
        let pos = (self.cutoff * distance).abs() * OVERSAMPLING as f64;
        let idx = pos as usize;
        if idx + 1 >= self.table.len() {
            return 0.0;
        }
        let frac = pos - idx as f64;
        let a = self.table[idx] as f64;
        let b = self.table[idx + 1] as f64;
        self.cutoff * (a + (b - a) * frac)
    }

    fn apply(&self, input: &[f32], out_frames: usize) -> Vec<f32> {
        let len = input.len() as i64;
        let mut output = Vec::with_capacity(out_frames);

        for i in 0..out_frames {
            let x = i as f64 * self.step;
            let first = ((x - self.reach).ceil() as i64).max(0);
            let last = ((x + self.reach).floor() as i64).min(len - 1);

            let mut acc = 0.0f64;
            for k in first..=last {
                acc += input[k as usize] as f64 * self.weight(x - k as f64);
            }
            output.push(acc as f32);
        }

        output
    }
}
