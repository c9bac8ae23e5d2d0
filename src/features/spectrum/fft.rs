//! Radix-2 Cooley–Tukey FFT
//!
//! In-place, iterative, decimation-in-time over two parallel `f32` arrays
//! (real and imaginary). The size must be a power of two.
//!
//! Algorithm:
//! 1. Permute the input by bit-reversed index (`log2(size)` bits)
//! 2. For `stage = 2, 4, ..., size`, combine even/odd halves of every block with
//!    twiddle `W = exp(-2πi·k / stage)` for `k ∈ [0, stage/2)`
//!
//! Twiddles for every stage are the `size/stage`-strided entries of a single
//! table of `exp(-2πi·k / size)`, computed once in `f64`.

use std::f64::consts::PI;

use crate::error::DspError;

/// Reverse the low `bits` bits of `x`
#[inline]
pub fn reverse_bits(mut x: usize, bits: u32) -> usize {
    let mut result = 0;
    for _ in 0..bits {
        result = (result << 1) | (x & 1);
        x >>= 1;
    }
    result
}

/// A planned transform of fixed size
#[derive(Debug, Clone)]
pub struct Fft {
    size: usize,
    log2_size: u32,
    twiddle_re: Vec<f32>,
    twiddle_im: Vec<f32>,
}

impl Fft {
    /// Plan a transform of `size` points
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if `size` is zero or not a power of two
    pub fn new(size: usize) -> Result<Self, DspError> {
        if size == 0 || !size.is_power_of_two() {
            return Err(DspError::InvalidParameter(format!(
                "FFT size must be a power of two, got {}",
                size
            )));
        }

        let half = size / 2;
        let mut twiddle_re = Vec::with_capacity(half);
        let mut twiddle_im = Vec::with_capacity(half);
        for k in 0..half {
            let angle = -2.0 * PI * k as f64 / size as f64;
            twiddle_re.push(angle.cos() as f32);
            twiddle_im.push(angle.sin() as f32);
        }

        Ok(Self {
            size,
            log2_size: size.trailing_zeros(),
            twiddle_re,
            twiddle_im,
        })
    }

    /// Transform size
    pub fn size(&self) -> usize {
        self.size
    }

    /// Forward transform in place
    ///
    /// # Panics
    ///
    /// If either slice length differs from the planned size.
    pub fn process(&self, re: &mut [f32], im: &mut [f32]) {
        assert_eq!(re.len(), self.size, "real part length must equal FFT size");
        assert_eq!(im.len(), self.size, "imaginary part length must equal FFT size");

        let n = self.size;

        for i in 0..n {
            let j = reverse_bits(i, self.log2_size);
            if j > i {
                re.swap(i, j);
                im.swap(i, j);
            }
        }

        let mut stage = 2;
        while stage <= n {
            let half = stage / 2;
            let stride = n / stage;

            for block in (0..n).step_by(stage) {
                for k in 0..half {
                    let w_re = self.twiddle_re[k * stride];
                    let w_im = self.twiddle_im[k * stride];

                    let even = block + k;
                    let odd = even + half;

                    let t_re = re[odd] * w_re - im[odd] * w_im;
                    let t_im = re[odd] * w_im + im[odd] * w_re;

                    re[odd] = re[even] - t_re;
                    im[odd] = im[even] - t_im;
                    re[even] += t_re;
                    im[even] += t_im;
                }
            }

            stage *= 2;
        }
    }
}
