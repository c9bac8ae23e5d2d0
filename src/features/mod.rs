//! Feature extraction modules
//!
//! - Spectral analysis (FFT, windowing, averaged magnitude spectrum)

pub mod spectrum;
