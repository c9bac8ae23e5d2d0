//! Audio I/O modules
//!
//! In-memory sample buffers, decoding using Symphonia, and PCM/WAV export.

pub mod decoder;
pub mod export;
pub mod sample_buffer;
pub mod wav;
