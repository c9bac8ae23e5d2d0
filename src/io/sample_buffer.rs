//! Decoded audio held in memory
//!
//! A [`SampleBuffer`] is one `Vec<f32>` per channel plus a sample rate. Every
//! transform in the crate reads a buffer by reference and returns a new one.

use crate::error::DspError;

/// Planar, normalized floating-point audio
///
/// Values are conceptually in `[-1.0, 1.0]` but are not clamped.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    channels: Vec<Vec<f32>>,
    sample_rate: u32,
}

impl SampleBuffer {
    /// Create a buffer from per-channel sample arrays
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` if there are no channels or `sample_rate == 0`
    /// - `ChannelMismatch` if the channel arrays differ in length
    pub fn new(channels: Vec<Vec<f32>>, sample_rate: u32) -> Result<Self, DspError> {
        if channels.is_empty() {
            return Err(DspError::InvalidParameter(
                "Sample buffer needs at least one channel".to_string(),
            ));
        }

        if sample_rate == 0 {
            return Err(DspError::InvalidParameter(
                "Sample rate must be > 0".to_string(),
            ));
        }

        let frames = channels[0].len();
        if let Some((idx, ch)) = channels.iter().enumerate().find(|(_, c)| c.len() != frames) {
            return Err(DspError::ChannelMismatch(format!(
                "channel {} has {} frames, channel 0 has {}",
                idx,
                ch.len(),
                frames
            )));
        }

        Ok(Self {
            channels,
            sample_rate,
        })
    }

    /// Create a single-channel buffer
    pub fn mono(samples: Vec<f32>, sample_rate: u32) -> Result<Self, DspError> {
        Self::new(vec![samples], sample_rate)
    }

    /// Create a buffer from frame-major interleaved samples
    ///
    /// A trailing partial frame is dropped.
    pub fn from_interleaved(
        samples: &[f32],
        channel_count: usize,
        sample_rate: u32,
    ) -> Result<Self, DspError> {
        if channel_count == 0 {
            return Err(DspError::InvalidParameter(
                "Channel count must be > 0".to_string(),
            ));
        }

        let frames = samples.len() / channel_count;
        let mut channels: Vec<Vec<f32>> =
            (0..channel_count).map(|_| Vec::with_capacity(frames)).collect();
        for frame in samples.chunks_exact(channel_count) {
            for (ch, &s) in channels.iter_mut().zip(frame) {
                ch.push(s);
            }
        }

        Self::new(channels, sample_rate)
    }

    /// Build a buffer from channels produced by a transform of an already valid buffer
    pub(crate) fn from_parts(channels: Vec<Vec<f32>>, sample_rate: u32) -> Self {
        debug_assert!(!channels.is_empty());
        debug_assert!(sample_rate > 0);
        debug_assert!(channels.windows(2).all(|w| w[0].len() == w[1].len()));
        Self {
            channels,
            sample_rate,
        }
    }

    /// Sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of channels (always >= 1)
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Number of samples per channel
    pub fn frame_count(&self) -> usize {
        self.channels[0].len()
    }

    /// True when the buffer holds no frames
    pub fn is_empty(&self) -> bool {
        self.frame_count() == 0
    }

    /// Duration in seconds
    pub fn duration_seconds(&self) -> f64 {
        self.frame_count() as f64 / self.sample_rate as f64
    }

    /// All channels
    pub fn channels(&self) -> &[Vec<f32>] {
        &self.channels
    }

    /// One channel, if it exists
    pub fn channel(&self, index: usize) -> Option<&[f32]> {
        self.channels.get(index).map(Vec::as_slice)
    }

    /// Iterate samples frame-major, channel-minor
    pub fn interleaved(&self) -> impl Iterator<Item = f32> + '_ {
        (0..self.frame_count()).flat_map(move |i| self.channels.iter().map(move |ch| ch[i]))
    }

    /// Consume the buffer, returning its channels
    pub fn into_channels(self) -> Vec<Vec<f32>> {
        self.channels
    }

    /// Storage footprint at the given bit depth
    pub fn estimated_bytes(&self, bit_depth: u32) -> u64 {
        crate::analysis::size::estimated_bytes(
            self.frame_count() as u64,
            self.channel_count() as u32,
            bit_depth,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_validates_channels() {
        assert!(matches!(
            SampleBuffer::new(vec![], 44100),
            Err(DspError::InvalidParameter(_))
        ));
        assert!(matches!(
            SampleBuffer::new(vec![vec![0.0; 4], vec![0.0; 3]], 44100),
            Err(DspError::ChannelMismatch(_))
        ));
        assert!(matches!(
            SampleBuffer::new(vec![vec![0.0; 4]], 0),
            Err(DspError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_empty_buffer_is_valid() {
        let buf = SampleBuffer::new(vec![vec![], vec![]], 8000).unwrap();
        assert_eq!(buf.frame_count(), 0);
        assert_eq!(buf.channel_count(), 2);
        assert!(buf.is_empty());
        assert_eq!(buf.duration_seconds(), 0.0);
    }

    #[test]
    fn test_interleaving() {
        let buf = SampleBuffer::from_interleaved(&[0.1, -0.1, 0.2, -0.2, 0.3], 2, 48000).unwrap();
        assert_eq!(buf.frame_count(), 2);
        assert_eq!(buf.channel(0).unwrap(), &[0.1, 0.2]);
        assert_eq!(buf.channel(1).unwrap(), &[-0.1, -0.2]);
        assert!(buf.channel(2).is_none());

        let round: Vec<f32> = buf.interleaved().collect();
        assert_eq!(round, vec![0.1, -0.1, 0.2, -0.2]);
    }

    #[test]
    fn test_estimated_bytes() {
        let buf = SampleBuffer::new(vec![vec![0.0; 1000], vec![0.0; 1000]], 44100).unwrap();
        assert_eq!(buf.estimated_bytes(16), 4000);
        assert_eq!(buf.estimated_bytes(32), 8000);
    }
}
