//! Canonical RIFF/WAVE PCM encoder
//!
//! Writes a 44-byte header followed by interleaved samples (frame-major,
//! channel-minor). Sample conversion matches the quantizer's scale factors:
//!
//! | Depth | Stored as | Value |
//! |---|---|---|
//! | 8 | unsigned byte | `round(s * 127 + 128)` |
//! | 16 | `i16` LE | `round(s * 32767)` |
//! | 24 | 3 bytes LE | `round(s * 8388607) & 0xFFFFFF` |
//!
//! Out-of-range samples saturate to the container's integer range.

use std::io::Write;

use crate::error::DspError;
use crate::io::sample_buffer::SampleBuffer;
use crate::processing::quantizer::{to_level, BitDepth};

/// Size of the canonical header
pub const HEADER_LEN: usize = 44;

/// Header fields derived from a buffer and a bit depth
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavHeader {
    /// Channel count
    pub num_channels: u16,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// 8, 16 or 24
    pub bits_per_sample: u16,
    /// Size of the PCM payload in bytes
    pub data_size: u32,
}

impl WavHeader {
    /// Compute header fields for `buffer` at `bit_depth`
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` if block align or byte rate overflow their fields
    /// - `EncodingError` if the payload does not fit the 32-bit size fields
    pub fn for_buffer(buffer: &SampleBuffer, bit_depth: BitDepth) -> Result<Self, DspError> {
        let block_align = buffer.channel_count() as u64 * bit_depth.bytes_per_sample() as u64;
        if block_align > u16::MAX as u64
            || block_align * buffer.sample_rate() as u64 > u32::MAX as u64
        {
            return Err(DspError::InvalidParameter(format!(
                "{} channel(s) at {} Hz, {} do not fit the WAV format fields",
                buffer.channel_count(),
                buffer.sample_rate(),
                bit_depth
            )));
        }
        let num_channels = buffer.channel_count() as u16;

        let data_size = buffer.frame_count() as u64
            * buffer.channel_count() as u64
            * bit_depth.bytes_per_sample() as u64;

        if data_size > (u32::MAX - 36) as u64 {
            return Err(DspError::EncodingError(format!(
                "PCM payload of {} bytes exceeds the RIFF size limit",
                data_size
            )));
        }

        Ok(Self {
            num_channels,
            sample_rate: buffer.sample_rate(),
            bits_per_sample: bit_depth.bits() as u16,
            data_size: data_size as u32,
        })
    }

    /// `NumChannels * BitsPerSample / 8`
    pub fn block_align(&self) -> u16 {
        self.num_channels * (self.bits_per_sample / 8)
    }

    /// `SampleRate * BlockAlign`
    pub fn byte_rate(&self) -> u32 {
        self.sample_rate * self.block_align() as u32
    }

    /// `36 + data_size`
    pub fn chunk_size(&self) -> u32 {
        36 + self.data_size
    }

    /// Serialize the 44 header bytes
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut out = [0u8; HEADER_LEN];
        out[0..4].copy_from_slice(b"RIFF");
        out[4..8].copy_from_slice(&self.chunk_size().to_le_bytes());
        out[8..12].copy_from_slice(b"WAVE");

        out[12..16].copy_from_slice(b"fmt ");
        out[16..20].copy_from_slice(&16u32.to_le_bytes()); // sub-chunk size
        out[20..22].copy_from_slice(&1u16.to_le_bytes()); // PCM
        out[22..24].copy_from_slice(&self.num_channels.to_le_bytes());
        out[24..28].copy_from_slice(&self.sample_rate.to_le_bytes());
        out[28..32].copy_from_slice(&self.byte_rate().to_le_bytes());
        out[32..34].copy_from_slice(&self.block_align().to_le_bytes());
        out[34..36].copy_from_slice(&self.bits_per_sample.to_le_bytes());

        out[36..40].copy_from_slice(b"data");
        out[40..44].copy_from_slice(&self.data_size.to_le_bytes());
        out
    }
}

/// Append one sample's PCM bytes to `out`
#[inline]
fn push_sample(out: &mut Vec<u8>, sample: f32, bit_depth: BitDepth, max_level: f64) {
    match bit_depth {
        BitDepth::Eight => {
            // `as u8` saturates to [0, 255]
            let value = (sample as f64 * max_level + 128.0).round();
            out.push(value as u8);
        }
        BitDepth::Sixteen => {
            let value = to_level(sample, max_level) as i16;
            out.extend_from_slice(&value.to_le_bytes());
        }
        BitDepth::TwentyFour => {
            let value = to_level(sample, max_level).clamp(-8_388_608.0, 8_388_607.0) as i32;
            let masked = (value & 0x00FF_FFFF) as u32;
            out.extend_from_slice(&masked.to_le_bytes()[..3]);
        }
    }
}

/// Encode `buffer` as a complete WAV byte stream
///
/// # Errors
///
/// - `InvalidParameter` if `bits_per_sample` is not 8, 16 or 24
/// - `EncodingError` if the payload exceeds the RIFF size limit
///
/// # Example
///
/// ```
/// use fidelity_dsp::io::sample_buffer::SampleBuffer;
/// use fidelity_dsp::io::wav::encode_wav;
///
/// let buffer = SampleBuffer::mono(vec![0.0; 100], 8000)?;
/// let bytes = encode_wav(&buffer, 16)?;
/// assert_eq!(bytes.len(), 244);
/// assert_eq!(&bytes[0..4], b"RIFF");
/// # Ok::<(), fidelity_dsp::DspError>(())
/// ```
pub fn encode_wav(buffer: &SampleBuffer, bits_per_sample: u32) -> Result<Vec<u8>, DspError> {
    let bit_depth = BitDepth::try_from(bits_per_sample)?;
    encode_wav_with_depth(buffer, bit_depth)
}

/// Encode with an already validated depth
pub fn encode_wav_with_depth(
    buffer: &SampleBuffer,
    bit_depth: BitDepth,
) -> Result<Vec<u8>, DspError> {
    let header = WavHeader::for_buffer(buffer, bit_depth)?;

    let mut out = Vec::with_capacity(HEADER_LEN + header.data_size as usize);
    write_with_header(&mut out, buffer, &header, bit_depth)?;

    debug_assert_eq!(out.len(), HEADER_LEN + header.data_size as usize);
    Ok(out)
}

/// Stream the same bytes as [`encode_wav_with_depth`] into `writer`
///
/// Samples are converted and written one frame at a time, so the payload is
/// never held in memory as a whole. Wrap files in a `BufWriter`.
///
/// # Errors
///
/// Header errors as for [`encode_wav`], and `Io` if the writer fails
pub fn write_wav<W: Write>(
    writer: &mut W,
    buffer: &SampleBuffer,
    bit_depth: BitDepth,
) -> Result<(), DspError> {
    let header = WavHeader::for_buffer(buffer, bit_depth)?;
    write_with_header(writer, buffer, &header, bit_depth)?;
    writer.flush()?;
    Ok(())
}

fn write_with_header<W: Write>(
    writer: &mut W,
    buffer: &SampleBuffer,
    header: &WavHeader,
    bit_depth: BitDepth,
) -> Result<(), DspError> {
    let max_level = bit_depth.max_level() as f64;

    log::debug!(
        "Encoding WAV: {} ch, {} Hz, {}, {} data bytes",
        header.num_channels,
        header.sample_rate,
        bit_depth,
        header.data_size
    );

    writer.write_all(&header.to_bytes())?;

    // One interleaved frame of PCM bytes, reused
    let mut frame = Vec::with_capacity(header.block_align() as usize);
    for i in 0..buffer.frame_count() {
        frame.clear();
        for ch in buffer.channels() {
            push_sample(&mut frame, ch[i], bit_depth, max_level);
        }
        writer.write_all(&frame)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn u32_at(bytes: &[u8], offset: usize) -> u32 {
        u32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap())
    }

    fn u16_at(bytes: &[u8], offset: usize) -> u16 {
        u16::from_le_bytes(bytes[offset..offset + 2].try_into().unwrap())
    }

    #[test]
    fn test_header_mono_16bit() {
        let buf = SampleBuffer::mono(vec![0.0; 100], 8000).unwrap();
        let bytes = encode_wav(&buf, 16).unwrap();

        assert_eq!(bytes.len(), 244);
        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(u32_at(&bytes, 4), 236);
        assert_eq!(&bytes[8..12], b"WAVE");
        assert_eq!(&bytes[12..16], b"fmt ");
        assert_eq!(u32_at(&bytes, 16), 16);
        assert_eq!(u16_at(&bytes, 20), 1);
        assert_eq!(u16_at(&bytes, 22), 1);
        assert_eq!(u32_at(&bytes, 24), 8000);
        assert_eq!(u32_at(&bytes, 28), 16000);
        assert_eq!(u16_at(&bytes, 32), 2);
        assert_eq!(u16_at(&bytes, 34), 16);
        assert_eq!(&bytes[36..40], b"data");
        assert_eq!(u32_at(&bytes, 40), 200);
    }

    #[test]
    fn test_header_stereo_24bit() {
        let buf = SampleBuffer::new(vec![vec![0.0; 10], vec![0.0; 10]], 48000).unwrap();
        let bytes = encode_wav(&buf, 24).unwrap();

        assert_eq!(bytes.len(), 44 + 10 * 2 * 3);
        assert_eq!(u16_at(&bytes, 22), 2);
        assert_eq!(u32_at(&bytes, 28), 48000 * 6);
        assert_eq!(u16_at(&bytes, 32), 6);
        assert_eq!(u16_at(&bytes, 34), 24);
        assert_eq!(u32_at(&bytes, 40), 60);
        assert_eq!(u32_at(&bytes, 4), 96);
    }

    #[test]
    fn test_8bit_unsigned() {
        let buf = SampleBuffer::mono(vec![0.0, 1.0, -1.0, 0.5, 2.0, -2.0], 8000).unwrap();
        let bytes = encode_wav(&buf, 8).unwrap();
        assert_eq!(&bytes[44..], &[128, 255, 1, 192, 255, 0]);
    }

    #[test]
    fn test_16bit_signed_le() {
        let buf = SampleBuffer::mono(vec![1.0, -1.0, 0.5, 1.5], 8000).unwrap();
        let bytes = encode_wav(&buf, 16).unwrap();
        let data = &bytes[44..];
        assert_eq!(i16::from_le_bytes([data[0], data[1]]), 32767);
        assert_eq!(i16::from_le_bytes([data[2], data[3]]), -32767);
        assert_eq!(i16::from_le_bytes([data[4], data[5]]), 16384);
        assert_eq!(i16::from_le_bytes([data[6], data[7]]), i16::MAX);
    }

    #[test]
    fn test_24bit_three_bytes() {
        let buf = SampleBuffer::mono(vec![1.0, -1.0, 0.0], 8000).unwrap();
        let bytes = encode_wav(&buf, 24).unwrap();
        let data = &bytes[44..];
        assert_eq!(data.len(), 9);
        assert_eq!(&data[0..3], &[0xFF, 0xFF, 0x7F]);
        // -8388607 = 0xFF800001 → low 24 bits
        assert_eq!(&data[3..6], &[0x01, 0x00, 0x80]);
        assert_eq!(&data[6..9], &[0, 0, 0]);
    }

    #[test]
    fn test_interleaving_order() {
        let buf = SampleBuffer::new(vec![vec![1.0, 0.0], vec![-1.0, 0.5]], 8000).unwrap();
        let bytes = encode_wav(&buf, 8).unwrap();
        assert_eq!(&bytes[44..], &[255, 1, 128, 192]);
    }

    #[test]
    fn test_rejects_unsupported_depth() {
        let buf = SampleBuffer::mono(vec![0.0; 4], 8000).unwrap();
        for bits in [0, 4, 12, 32] {
            assert!(matches!(
                encode_wav(&buf, bits),
                Err(DspError::InvalidParameter(_))
            ));
        }
    }

    #[test]
    fn test_empty_buffer() {
        let buf = SampleBuffer::mono(vec![], 44100).unwrap();
        let bytes = encode_wav(&buf, 16).unwrap();
        assert_eq!(bytes.len(), 44);
        assert_eq!(u32_at(&bytes, 4), 36);
        assert_eq!(u32_at(&bytes, 40), 0);
    }

    #[test]
    fn test_write_wav_matches_encode() {
        let buf = SampleBuffer::mono(vec![0.25, -0.25, 0.75], 22050).unwrap();
        let mut sink = Vec::new();
        write_wav(&mut sink, &buf, BitDepth::TwentyFour).unwrap();
        assert_eq!(sink, encode_wav(&buf, 24).unwrap());
    }

    /// Records every `write` call it receives
    #[derive(Default)]
    struct RecordingWriter {
        bytes: Vec<u8>,
        largest_write: usize,
    }

    impl Write for RecordingWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.largest_write = self.largest_write.max(buf.len());
            self.bytes.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_wav_streams_frames() {
        let left: Vec<f32> = (0..5000).map(|i| (i as f32 * 0.003).sin() * 0.8).collect();
        let right: Vec<f32> = left.iter().map(|s| -s * 0.5).collect();
        let buf = SampleBuffer::new(vec![left, right], 44100).unwrap();

        let mut writer = RecordingWriter::default();
        write_wav(&mut writer, &buf, BitDepth::Sixteen).unwrap();

        assert_eq!(writer.bytes, encode_wav(&buf, 16).unwrap());
        // Header, then one 4-byte stereo frame per write
        assert_eq!(writer.largest_write, HEADER_LEN);
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_wav_reports_writer_failure() {
        let buf = SampleBuffer::mono(vec![0.0; 10], 8000).unwrap();
        let result = write_wav(&mut FailingWriter, &buf, BitDepth::Eight);
        assert!(matches!(result, Err(DspError::Io(ref msg)) if msg.contains("disk full")));
    }

    #[test]
    fn test_24bit_saturates_out_of_range() {
        let buf = SampleBuffer::mono(vec![1.5, -1.5, 100.0, -100.0], 8000).unwrap();
        let bytes = encode_wav(&buf, 24).unwrap();
        let data = &bytes[44..];
        assert_eq!(data.len(), 12);
        assert_eq!(&data[0..3], &[0xFF, 0xFF, 0x7F]);
        // -8388608 = 0xFF800000 → low 24 bits
        assert_eq!(&data[3..6], &[0x00, 0x00, 0x80]);
        assert_eq!(&data[6..9], &[0xFF, 0xFF, 0x7F]);
        assert_eq!(&data[9..12], &[0x00, 0x00, 0x80]);
    }
}
