//! Example: Compare a file against its reduced version
//!
//! Usage:
//!   cargo run --release --example compare_file -- <file> [--rate HZ] [--bits N] [--out DIR]
//!
//! Decodes the file, resamples and quantizes it, prints sizes and spectral
//! peaks for both versions, and writes both as WAV into `--out` (default: `.`).

use fidelity_dsp::analysis::size::format_size;
use fidelity_dsp::io::export::{export_wav, ExportKind};
use fidelity_dsp::{compare_audio, decode_file, BitDepth, ProcessingConfig};
use std::env;
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::init();

    let mut args: Vec<String> = env::args().skip(1).collect();

    let mut config = ProcessingConfig::default();
    let mut out_dir = PathBuf::from(".");
    let mut input: Option<String> = None;

    while let Some(a) = args.first().cloned() {
        args.remove(0);
        match a.as_str() {
            "--rate" => {
                let v = args.first().ok_or("--rate requires a value")?.parse::<u32>()?;
                args.remove(0);
                config.target_sample_rate = v;
            }
            "--bits" => {
                let v = args.first().ok_or("--bits requires a value")?.parse::<u32>()?;
                args.remove(0);
                config.bit_depth = BitDepth::try_from(v)?;
            }
            "--out" => {
                let v = args.first().ok_or("--out requires a value")?.clone();
                args.remove(0);
                out_dir = PathBuf::from(v);
            }
            "--help" | "-h" => {
                eprintln!(
                    "Usage: compare_file <file> [--rate HZ] [--bits 8|16|24] [--out DIR]\n\
                     \n\
                     --rate HZ   Target sample rate (default: 44100)\n\
                     --bits N    Target bit depth (default: 16)\n\
                     --out DIR   Export directory (default: .)\n"
                );
                return Ok(());
            }
            _ => input = Some(a),
        }
    }

    let Some(input) = input else {
        eprintln!("ERROR: Provide an audio file path. Use --help for usage.");
        std::process::exit(2);
    };

    let original = decode_file(&input)?;
    let result = compare_audio(&original, &config)?;

    let peak = |s: &fidelity_dsp::SpectrumResult| s.frequency_of(s.peak_bin());

    println!("Comparison Results:");
    println!(
        "  Original:  {} Hz / {} ch / {:.2}s / {} (32-bit float) / peak {:.1} Hz",
        original.sample_rate(),
        original.channel_count(),
        result.metadata.original_duration_seconds,
        format_size(result.original_bytes),
        peak(&result.original_spectrum)
    );
    println!(
        "  Processed: {} Hz / {} ch / {:.2}s / {} ({}) / peak {:.1} Hz",
        result.processed.sample_rate(),
        result.processed.channel_count(),
        result.metadata.processed_duration_seconds,
        format_size(result.processed_bytes),
        config.bit_depth,
        peak(&result.processed_spectrum)
    );
    println!("  Size ratio: {:.3}", result.size_ratio());
    println!("  Processing time: {:.2} ms", result.metadata.processing_time_ms);

    // The original is exported at the selected depth too
    for (kind, buffer) in [
        (ExportKind::Original, &original),
        (ExportKind::Processed, &result.processed),
    ] {
        let path = export_wav(
            &out_dir,
            kind,
            buffer,
            config.bit_depth,
            config.target_sample_rate,
        )?;
        println!("  Wrote {}", path.display());
    }

    Ok(())
}
