//! Spectral analysis
//!
//! A from-scratch radix-2 FFT, window functions, and the averaged
//! magnitude-spectrum estimator built on them.

pub mod analyzer;
pub mod fft;
pub mod window;

pub use analyzer::{analyze, SpectrumAnalyzer, SpectrumResult};
