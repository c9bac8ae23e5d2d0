//! Audio reduction modules
//!
//! This module contains the transforms that produce the processed buffer:
//! - Sample-rate conversion (windowed sinc)
//! - Bit-depth quantization
//! - A/B blending of original and processed audio

pub mod mixer;
pub mod quantizer;
pub mod resampler;
