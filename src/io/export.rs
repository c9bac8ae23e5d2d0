//! WAV export to disk
//!
//! File names follow `audio-<original|processed>-<rate>hz-<bits>bit.wav`.

use std::fmt;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::error::DspError;
use crate::io::sample_buffer::SampleBuffer;
use crate::io::wav::write_wav;
use crate::processing::quantizer::BitDepth;

/// Which side of the comparison is exported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    /// The decoded input
    Original,
    /// The resampled and quantized output
    Processed,
}

impl fmt::Display for ExportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportKind::Original => write!(f, "original"),
            ExportKind::Processed => write!(f, "processed"),
        }
    }
}

/// Export file name
///
/// Both kinds are named after the selected processing settings.
///
/// ```
/// use fidelity_dsp::io::export::{export_file_name, ExportKind};
/// use fidelity_dsp::processing::quantizer::BitDepth;
///
/// assert_eq!(
///     export_file_name(ExportKind::Processed, 16000, BitDepth::Eight),
///     "audio-processed-16000hz-8bit.wav"
/// );
/// ```
pub fn export_file_name(kind: ExportKind, sample_rate: u32, bit_depth: BitDepth) -> String {
    format!("audio-{}-{}hz-{}bit.wav", kind, sample_rate, bit_depth.bits())
}

/// Encode `buffer` at `bit_depth` and write it into `dir`
///
/// `name_rate` is the rate used in the file name (the selected target rate).
/// The header always carries the buffer's own sample rate.
///
/// Returns the path of the written file.
pub fn export_wav(
    dir: &Path,
    kind: ExportKind,
    buffer: &SampleBuffer,
    bit_depth: BitDepth,
    name_rate: u32,
) -> Result<PathBuf, DspError> {
    let path = dir.join(export_file_name(kind, name_rate, bit_depth));

    log::debug!("Exporting {} audio to {}", kind, path.display());

    let mut writer = BufWriter::new(File::create(&path)?);
    write_wav(&mut writer, buffer, bit_depth)?;

    Ok(path)
}
