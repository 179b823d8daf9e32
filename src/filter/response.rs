//! Magnitude response of an FIR kernel.
use rustfft::{num_complex::Complex, FftPlanner};

use crate::error::{FilterError, Result};

/// `|H(f)|` at `n_freqs` equally spaced normalised frequencies from 0 (DC) to
/// 1 (Nyquist) inclusive.
///
/// Computed with a zero-padded FFT. The FFT length is the smallest multiple of
/// `2 · (n_freqs - 1)` that holds the whole kernel.
pub fn frequency_response(h: &[f64], n_freqs: usize) -> Result<Vec<f64>> {
    if n_freqs < 2 {
        return Err(FilterError::invalid(format!(
            "frequency response needs at least 2 points, got {n_freqs}"
        )));
    }
    if h.is_empty() {
        return Err(FilterError::invalid("kernel must not be empty"));
    }
    let base = 2 * (n_freqs - 1);
    let factor = h.len().div_ceil(base);
    let n_fft = base * factor;

    let mut buf: Vec<Complex<f64>> = h
        .iter()
        .map(|&re| Complex { re, im: 0.0 })
        .chain(std::iter::repeat(Complex::default()))
        .take(n_fft)
        .collect();
    let mut planner: FftPlanner<f64> = FftPlanner::new();
    planner.plan_fft_forward(n_fft).process(&mut buf);

    Ok((0..n_freqs).map(|k| buf[k * factor].norm()).collect())
}
