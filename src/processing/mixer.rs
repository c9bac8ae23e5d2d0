//! A/B blend of original and processed audio
//!
//! Renders what a listener hears with the comparison slider at `position`
//! (0 = only original, 100 = only processed): both buffers start together on
//! one output clock, weighted by `(100 - position) / 100` and `position / 100`.

use crate::error::DspError;
use crate::io::sample_buffer::SampleBuffer;
use crate::processing::resampler::Resampler;

/// Gains `(original, processed)` for a slider position, clamped to `[0, 100]`
pub fn blend_gains(position: f32) -> (f32, f32) {
    let p = if position.is_nan() { 0.0 } else { position.clamp(0.0, 100.0) };
    ((100.0 - p) / 100.0, p / 100.0)
}

/// Mix `original` and `processed` at slider `position`
///
/// The output runs at the original's sample rate; `processed` is resampled to
/// it first if needed. Output length is that of the longer input; the shorter
/// one is silent past its end.
///
/// # Errors
///
/// `InvalidParameter` if the channel counts differ
pub fn blend(
    original: &SampleBuffer,
    processed: &SampleBuffer,
    position: f32,
) -> Result<SampleBuffer, DspError> {
    if original.channel_count() != processed.channel_count() {
        return Err(DspError::InvalidParameter(format!(
            "Cannot blend {} channel(s) with {} channel(s)",
            original.channel_count(),
            processed.channel_count()
        )));
    }

    let (gain_a, gain_b) = blend_gains(position);

    let aligned;
    let processed = if processed.sample_rate() != original.sample_rate() {
        aligned = Resampler::default().process(processed, original.sample_rate())?;
        &aligned
    } else {
        processed
    };

    let frames = original.frame_count().max(processed.frame_count());

    log::debug!(
        "Blending at position {:.0}: gains {:.2}/{:.2}, {} frames",
        position,
        gain_a,
        gain_b,
        frames
    );

    let channels = original
        .channels()
        .iter()
        .zip(processed.channels())
        .map(|(a, b)| {
            (0..frames)
                .map(|i| {
                    let x = a.get(i).copied().unwrap_or(0.0);
                    let y = b.get(i).copied().unwrap_or(0.0);
                    x * gain_a + y * gain_b
                })
                .collect()
        })
        .collect();

    Ok(SampleBuffer::from_parts(channels, original.sample_rate()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gains() {
        assert_eq!(blend_gains(0.0), (1.0, 0.0));
        assert_eq!(blend_gains(100.0), (0.0, 1.0));
        assert_eq!(blend_gains(50.0), (0.5, 0.5));
        assert_eq!(blend_gains(-10.0), (1.0, 0.0));
        assert_eq!(blend_gains(250.0), (0.0, 1.0));
    }

    #[test]
    fn test_endpoints_select_one_side() {
        let a = SampleBuffer::mono(vec![0.5; 10], 8000).unwrap();
        let b = SampleBuffer::mono(vec![-0.25; 10], 8000).unwrap();

        let only_a = blend(&a, &b, 0.0).unwrap();
        assert_eq!(only_a, a);

        let only_b = blend(&a, &b, 100.0).unwrap();
        assert_eq!(only_b, b);

        let mid = blend(&a, &b, 50.0).unwrap();
        assert!(mid.channel(0).unwrap().iter().all(|&s| (s - 0.125).abs() < 1e-7));
    }

    #[test]
    fn test_shorter_input_padded_with_silence() {
        let a = SampleBuffer::mono(vec![1.0; 4], 8000).unwrap();
        let b = SampleBuffer::mono(vec![1.0; 6], 8000).unwrap();
        let mixed = blend(&a, &b, 25.0).unwrap();
        assert_eq!(mixed.channel(0).unwrap(), &[1.0, 1.0, 1.0, 1.0, 0.25, 0.25]);
    }

    #[test]
    fn test_processed_resampled_to_original_rate() {
        let a = SampleBuffer::mono(vec![0.0; 4410], 44100).unwrap();
        let b = SampleBuffer::mono(vec![0.0; 800], 8000).unwrap();
        let mixed = blend(&a, &b, 50.0).unwrap();
        assert_eq!(mixed.sample_rate(), 44100);
        assert_eq!(mixed.frame_count(), 4410);
    }

    #[test]
    fn test_channel_mismatch_rejected() {
        let a = SampleBuffer::mono(vec![0.0; 4], 8000).unwrap();
        let b = SampleBuffer::new(vec![vec![0.0; 4], vec![0.0; 4]], 8000).unwrap();
        assert!(matches!(blend(&a, &b, 50.0), Err(DspError::InvalidParameter(_))));
    }
}
