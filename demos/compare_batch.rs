//! Example: Compare multiple audio files in parallel
//!
//! Usage:
//!   cargo run --release --example compare_batch -- [--jobs N] [--json] [--rate HZ] [--bits N] <file1> <file2> ...
//!
//! Notes:
//! - Parallelism is across files (batch-level). Each comparison is still single-threaded.
//! - Default workers: (available CPU threads - 1), keeping one core free for the system.

use fidelity_dsp::analysis::size::format_size;
use fidelity_dsp::{compare_audio, decode_file, BitDepth, ComparisonMetadata, ProcessingConfig};
use rayon::prelude::*;
use serde::Serialize;
use std::env;
use std::time::Instant;

#[derive(Serialize)]
struct ItemOut {
    file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    original_bytes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    processed_bytes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    original_peak_hz: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    processed_peak_hz: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<ComparisonMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ItemOut {
    fn failed(file: String, error: String) -> Self {
        Self {
            file,
            original_bytes: None,
            processed_bytes: None,
            original_peak_hz: None,
            processed_peak_hz: None,
            metadata: None,
            error: Some(error),
        }
    }
}

fn default_jobs() -> usize {
    let n = std::thread::available_parallelism().map(|v| v.get()).unwrap_or(1);
    std::cmp::max(1, n.saturating_sub(1))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args: Vec<String> = env::args().skip(1).collect();

    let mut json = false;
    let mut jobs: Option<usize> = None;
    let mut config = ProcessingConfig::default();
    let mut paths: Vec<String> = Vec::new();

    while let Some(a) = args.first().cloned() {
        args.remove(0);
        match a.as_str() {
            "--json" => json = true,
            "--jobs" => {
                let v = args
                    .first()
                    .ok_or("--jobs requires a value")?
                    .parse::<usize>()?;
                args.remove(0);
                jobs = Some(std::cmp::max(1, v));
            }
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
            "--help" | "-h" => {
                eprintln!(
                    "Usage: compare_batch [--jobs N] [--json] [--rate HZ] [--bits N] <file1> <file2> ...\n\
                     \n\
                     --jobs N   Parallel workers (default: CPU-1)\n\
                     --json     Emit one JSON object per line (JSONL)\n\
                     --rate HZ  Target sample rate (default: 44100)\n\
                     --bits N   Target bit depth, 8/16/24 (default: 16)\n"
                );
                return Ok(());
            }
            _ => paths.push(a),
        }
    }

    if paths.is_empty() {
        eprintln!("ERROR: Provide at least one audio file path. Use --help for usage.");
        std::process::exit(2);
    }

    let jobs = jobs.unwrap_or_else(default_jobs);
    eprintln!("Batch: {} files, jobs={}", paths.len(), jobs);

    let t0 = Instant::now();
    let pool = rayon::ThreadPoolBuilder::new().num_threads(jobs).build()?;

    let outs: Vec<ItemOut> = pool.install(|| {
        paths
            .par_iter()
            .map(|path| {
                let original = match decode_file(path) {
                    Ok(buffer) => buffer,
                    Err(e) => return ItemOut::failed(path.clone(), format!("decode failed: {e}")),
                };
                match compare_audio(&original, &config) {
                    Ok(res) => ItemOut {
                        file: path.clone(),
                        original_bytes: Some(res.original_bytes),
                        processed_bytes: Some(res.processed_bytes),
                        original_peak_hz: Some(
                            res.original_spectrum
                                .frequency_of(res.original_spectrum.peak_bin()),
                        ),
                        processed_peak_hz: Some(
                            res.processed_spectrum
                                .frequency_of(res.processed_spectrum.peak_bin()),
                        ),
                        metadata: Some(res.metadata),
                        error: None,
                    },
                    Err(e) => ItemOut::failed(path.clone(), format!("comparison failed: {e}")),
                }
            })
            .collect()
    });

    for (idx, o) in outs.iter().enumerate() {
        if json {
            println!("{}", serde_json::to_string(o)?);
            continue;
        }
        match (&o.error, o.original_bytes, o.processed_bytes) {
            (None, Some(orig), Some(proc_)) => println!(
                "[{}/{}] {}: {} -> {} (peak {:.1} Hz -> {:.1} Hz)",
                idx + 1,
                outs.len(),
                o.file,
                format_size(orig),
                format_size(proc_),
                o.original_peak_hz.unwrap_or(0.0),
                o.processed_peak_hz.unwrap_or(0.0)
            ),
            _ => println!(
                "[{}/{}] {}: ERROR: {}",
                idx + 1,
                outs.len(),
                o.file,
                o.error.as_deref().unwrap_or("unknown error")
            ),
        }
    }

    let ok = outs.iter().filter(|o| o.error.is_none()).count();
    eprintln!(
        "Done: ok={}/{} wall={:.0}ms",
        ok,
        outs.len(),
        t0.elapsed().as_secs_f64() * 1000.0
    );

    Ok(())
}
