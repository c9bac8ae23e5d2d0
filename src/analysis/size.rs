//! Storage footprint estimates

/// Bit depth of the decoded in-memory representation (32-bit float)
pub const FLOAT_BIT_DEPTH: u32 = 32;

/// Bytes needed to store `frame_count` frames of `channel_count` channels at `bit_depth`
///
/// `frame_count * channel_count * bit_depth / 8`, floored. Any depth is accepted.
///
/// # Example
///
/// ```
/// use fidelity_dsp::analysis::size::estimated_bytes;
///
/// assert_eq!(estimated_bytes(1000, 2, 16), 4000);
/// assert_eq!(estimated_bytes(3, 1, 12), 4);
/// ```
pub fn estimated_bytes(frame_count: u64, channel_count: u32, bit_depth: u32) -> u64 {
    let bits = frame_count as u128 * channel_count as u128 * bit_depth as u128;
    (bits / 8).min(u64::MAX as u128) as u64
}

/// Human-readable size: `B` below 1 KiB, `KB` below 1 MiB, `MB` above
pub fn format_size(bytes: u64) -> String {
    let bytes = bytes as f64;
    if bytes < 1024.0 {
        format!("{:.2} B", bytes)
    } else if bytes < 1024.0 * 1024.0 {
        format!("{:.2} KB", bytes / 1024.0)
    } else {
        format!("{:.2} MB", bytes / (1024.0 * 1024.0))
    }
}
