//! Audio decoding using Symphonia
//!
//! Decodes a whole file (or an in-memory byte stream) into a planar
//! [`SampleBuffer`]. The crate is built with Symphonia's WAV/PCM support.

use std::fs::File;
use std::io::Cursor;
use std::path::Path;

use symphonia::core::audio::SampleBuffer as InterleavedBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::{MediaSource, MediaSourceStream};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::error::DspError;
use crate::io::sample_buffer::SampleBuffer;

/// Decode an audio file
///
/// # Arguments
///
/// * `path` - Path to audio file; its extension is used as a probe hint
///
/// # Errors
///
/// `Io` if the file cannot be opened, `DecodingError` if it cannot be decoded
pub fn decode_file<P: AsRef<Path>>(path: P) -> Result<SampleBuffer, DspError> {
    let path = path.as_ref();
    log::debug!("Decoding audio file: {}", path.display());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let file = File::open(path)?;
    decode_source(Box::new(file), hint)
}

/// Decode an in-memory encoded stream
///
/// `extension` (e.g. `"wav"`) is an optional probe hint.
pub fn decode_bytes(bytes: Vec<u8>, extension: Option<&str>) -> Result<SampleBuffer, DspError> {
    log::debug!("Decoding {} bytes of encoded audio", bytes.len());

    let mut hint = Hint::new();
    if let Some(ext) = extension {
        hint.with_extension(ext);
    }

    decode_source(Box::new(Cursor::new(bytes)), hint)
}

fn decode_source(source: Box<dyn MediaSource>, hint: Hint) -> Result<SampleBuffer, DspError> {
    let mss = MediaSourceStream::new(source, Default::default());

    let probed = symphonia::default::get_probe().format(
        &hint,
        mss,
        &FormatOptions::default(),
        &MetadataOptions::default(),
    )?;
    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| DspError::DecodingError("No supported audio track found".to_string()))?;

    let track_id = track.id;
    let codec_params = track.codec_params.clone();

    let sample_rate = codec_params
        .sample_rate
        .ok_or_else(|| DspError::DecodingError("Unknown sample rate".to_string()))?;

    let mut decoder =
        symphonia::default::get_codecs().make(&codec_params, &DecoderOptions::default())?;

    let mut channels: Vec<Vec<f32>> = codec_params
        .channels
        .map(|c| vec![Vec::new(); c.count()])
        .unwrap_or_default();

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(Error::IoError(ref e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => break,
            Err(err) => return Err(err.into()),
        };

        if packet.track_id() != track_id {
            continue;
        }

        match decoder.decode(&packet) {
            Ok(decoded) => {
                let spec = *decoded.spec();
                let count = spec.channels.count();

                if channels.is_empty() {
                    channels = vec![Vec::new(); count];
                } else if channels.len() != count {
                    return Err(DspError::DecodingError(format!(
                        "Channel count changed mid-stream ({} -> {})",
                        channels.len(),
                        count
                    )));
                }

                let mut interleaved = InterleavedBuffer::<f32>::new(decoded.capacity() as u64, spec);
                interleaved.copy_interleaved_ref(decoded);

                for frame in interleaved.samples().chunks_exact(count) {
                    for (ch, &s) in channels.iter_mut().zip(frame) {
                        ch.push(s);
                    }
                }
            }
            Err(Error::DecodeError(msg)) => {
                // Skip decode errors (can happen with corrupted packets)
                log::warn!("Skipping undecodable packet: {}", msg);
                continue;
            }
            Err(err) => return Err(err.into()),
        }
    }

    if channels.is_empty() {
        return Err(DspError::DecodingError(
            "Stream has no channel layout".to_string(),
        ));
    }

    let buffer = SampleBuffer::new(channels, sample_rate)?;
    log::debug!(
        "Decoded {} channel(s) x {} frames at {} Hz",
        buffer.channel_count(),
        buffer.frame_count(),
        buffer.sample_rate()
    );
    Ok(buffer)
}
